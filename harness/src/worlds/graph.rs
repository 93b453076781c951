//! `WeightedGraph`: an explicit digraph of named nodes.
//!
//! Edges keep their insertion order, which is the successor order the engine
//! sees. A node can be marked broken: asking it for successors fails with
//! [`StateError::Malformed`], which is how lock tests exercise error
//! propagation. Step costs are not checked here, so a graph can also carry
//! negative or NaN edges for the engine to reject.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use lodestar_kernel::space::{SearchState, StateError, Successor};

use crate::contract::SearchWorldV1;
use crate::worlds::WorldError;

#[derive(Debug, Default)]
struct Topology {
    names: Vec<String>,
    edges: Vec<Vec<(usize, f64)>>,
    broken: Vec<bool>,
}

/// A position in a [`WeightedGraph`].
///
/// Equality and hashing use the node index only; states from different
/// graphs must not be mixed in one search.
#[derive(Clone)]
pub struct GraphState {
    topology: Rc<Topology>,
    node: usize,
}

impl GraphState {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.topology.names[self.node]
    }
}

impl PartialEq for GraphState {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for GraphState {}

impl Hash for GraphState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl fmt::Debug for GraphState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl SearchState for GraphState {
    /// Name of the node the edge leads to.
    type Action = String;

    fn successors(&self) -> Result<Vec<Successor<Self>>, StateError> {
        if self.topology.broken[self.node] {
            return Err(StateError::Malformed {
                detail: format!("node {} is broken", self.name()),
            });
        }
        Ok(self.topology.edges[self.node]
            .iter()
            .map(|&(to, cost)| {
                let next = Self {
                    topology: Rc::clone(&self.topology),
                    node: to,
                };
                Successor::new(next.name().to_string(), next, cost)
            })
            .collect())
    }
}

/// Builder for [`WeightedGraph`]. Nodes are declared implicitly by edges.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    topology: Topology,
    index: HashMap<String, usize>,
    heuristic: HashMap<usize, f64>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.topology.names.len();
        self.topology.names.push(name.to_string());
        self.topology.edges.push(Vec::new());
        self.topology.broken.push(false);
        self.index.insert(name.to_string(), i);
        i
    }

    /// Declare a node with no edges.
    #[must_use]
    pub fn node(mut self, name: &str) -> Self {
        self.intern(name);
        self
    }

    /// Add a directed edge. Edges from one node are generated in the order added.
    #[must_use]
    pub fn edge(mut self, from: &str, to: &str, cost: f64) -> Self {
        let from = self.intern(from);
        let to = self.intern(to);
        self.topology.edges[from].push((to, cost));
        self
    }

    /// Make `name` fail when expanded.
    #[must_use]
    pub fn broken(mut self, name: &str) -> Self {
        let i = self.intern(name);
        self.topology.broken[i] = true;
        self
    }

    /// Heuristic value for `name`; nodes without one estimate 0.
    #[must_use]
    pub fn heuristic(mut self, name: &str, h: f64) -> Self {
        let i = self.intern(name);
        self.heuristic.insert(i, h);
        self
    }

    /// Finish the graph with a start node and one or more goal nodes.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownNode`] if `start` or a goal was never declared.
    pub fn build(self, id: &str, start: &str, goals: &[&str]) -> Result<WeightedGraph, WorldError> {
        let lookup = |name: &str| {
            self.index
                .get(name)
                .copied()
                .ok_or_else(|| WorldError::UnknownNode {
                    name: name.to_string(),
                })
        };
        let start = lookup(start)?;
        let goals = goals
            .iter()
            .map(|g| lookup(g))
            .collect::<Result<Vec<_>, _>>()?;
        let heuristic = (0..self.topology.names.len())
            .map(|i| self.heuristic.get(&i).copied().unwrap_or(0.0))
            .collect();
        Ok(WeightedGraph {
            id: format!("graph:{id}"),
            topology: Rc::new(self.topology),
            index: self.index,
            heuristic,
            start,
            goals,
        })
    }
}

/// Explicit weighted digraph world.
#[derive(Debug)]
pub struct WeightedGraph {
    id: String,
    topology: Rc<Topology>,
    index: HashMap<String, usize>,
    heuristic: Vec<f64>,
    start: usize,
    goals: Vec<usize>,
}

impl WeightedGraph {
    /// State for the node called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownNode`] if there is no such node.
    pub fn state(&self, name: &str) -> Result<GraphState, WorldError> {
        let node = self
            .index
            .get(name)
            .copied()
            .ok_or_else(|| WorldError::UnknownNode {
                name: name.to_string(),
            })?;
        Ok(GraphState {
            topology: Rc::clone(&self.topology),
            node,
        })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.topology.names.len()
    }

    /// The path graph `A -1-> B -1-> C -1-> D`, goal `D`.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`GraphBuilder::build`].
    pub fn line() -> Result<Self, WorldError> {
        GraphBuilder::new()
            .edge("A", "B", 1.0)
            .edge("B", "C", 1.0)
            .edge("C", "D", 1.0)
            .build("line", "A", &["D"])
    }

    /// [`WeightedGraph::line`] plus a direct `A -10-> D` shortcut.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`GraphBuilder::build`].
    pub fn line_with_shortcut() -> Result<Self, WorldError> {
        GraphBuilder::new()
            .edge("A", "B", 1.0)
            .edge("A", "D", 10.0)
            .edge("B", "C", 1.0)
            .edge("C", "D", 1.0)
            .build("line_with_shortcut", "A", &["D"])
    }

    /// Diamond `A -2-> B -3-> D`, `A -1-> C -1-> D`, then `D -1-> E`, goal `E`.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`GraphBuilder::build`].
    pub fn diamond() -> Result<Self, WorldError> {
        GraphBuilder::new()
            .edge("A", "B", 2.0)
            .edge("A", "C", 1.0)
            .edge("B", "D", 3.0)
            .edge("C", "D", 1.0)
            .edge("D", "E", 1.0)
            .build("diamond", "A", &["E"])
    }
}

impl SearchWorldV1 for WeightedGraph {
    type State = GraphState;

    fn world_id(&self) -> &str {
        &self.id
    }

    fn initial_state(&self) -> GraphState {
        GraphState {
            topology: Rc::clone(&self.topology),
            node: self.start,
        }
    }

    fn is_goal(&self, state: &GraphState) -> bool {
        self.goals.contains(&state.node)
    }

    fn heuristic(&self, state: &GraphState) -> f64 {
        self.heuristic[state.node]
    }

    fn state_label(&self, state: &GraphState) -> String {
        state.name().to_string()
    }
}
