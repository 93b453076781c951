//! Search nodes and path reconstruction.

use std::rc::Rc;

use lodestar_kernel::space::SearchState;

/// An immutable search node.
///
/// Nodes are shared through `Rc`: the frontier, the children that point back
/// at their parent, and finally the caller holding a goal node all reference
/// the same allocation. Returning a goal node therefore hands the caller the
/// whole root-to-goal chain without copying it.
#[derive(Debug)]
pub struct SearchNode<S: SearchState> {
    /// The state this node wraps.
    pub state: S,
    /// Parent node (`None` for the root).
    pub parent: Option<Rc<SearchNode<S>>>,
    /// Action that produced `state` from the parent's state (`None` for the root).
    pub action: Option<S::Action>,
    /// Cumulative path cost from the root.
    pub gval: f64,
    /// Cached heuristic estimate for `state`.
    pub hval: f64,
    /// Frontier ordering key, computed by the active f-value function.
    pub fval: f64,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Generation counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl<S: SearchState> SearchNode<S> {
    /// Build the root node. `fval` starts at 0 until the engine assigns it.
    #[must_use]
    pub fn root(state: S, hval: f64) -> Self {
        Self {
            state,
            parent: None,
            action: None,
            gval: 0.0,
            hval,
            fval: 0.0,
            depth: 0,
            creation_order: 0,
        }
    }

    /// Build a child of `parent` reached by `action` at `step_cost`.
    #[must_use]
    pub fn child(
        parent: &Rc<Self>,
        action: S::Action,
        state: S,
        step_cost: f64,
        hval: f64,
        creation_order: u64,
    ) -> Self {
        Self {
            state,
            parent: Some(Rc::clone(parent)),
            action: Some(action),
            gval: parent.gval + step_cost,
            hval,
            fval: 0.0,
            depth: parent.depth + 1,
            creation_order,
        }
    }

    /// Iterate from this node up to the root (lazy; call again to restart).
    #[must_use]
    pub fn ancestors(&self) -> Ancestors<'_, S> {
        Ancestors { next: Some(self) }
    }

    /// Returns `true` if `state` appears on the path from the root to this node.
    #[must_use]
    pub fn path_contains(&self, state: &S) -> bool {
        self.ancestors().any(|n| &n.state == state)
    }

    /// Nodes from the root to this node.
    #[must_use]
    pub fn path(&self) -> Vec<&SearchNode<S>> {
        let mut path: Vec<&SearchNode<S>> = self.ancestors().collect();
        path.reverse();
        path
    }

    /// States from the root to this node.
    #[must_use]
    pub fn states(&self) -> Vec<&S> {
        self.path().into_iter().map(|n| &n.state).collect()
    }

    /// Actions from the root to this node (one fewer than [`Self::states`]).
    #[must_use]
    pub fn actions(&self) -> Vec<&S::Action> {
        self.path()
            .into_iter()
            .filter_map(|n| n.action.as_ref())
            .collect()
    }
}

impl<S: SearchState> Drop for SearchNode<S> {
    // Unlink iteratively: dropping a deep chain must not recurse once per ancestor.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(rc) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut node) => next = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Goal-to-root walk over parent links.
pub struct Ancestors<'a, S: SearchState> {
    next: Option<&'a SearchNode<S>>,
}

impl<'a, S: SearchState> Iterator for Ancestors<'a, S> {
    type Item = &'a SearchNode<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}
