//! Reference worlds for the runner, lock tests and benches.

pub mod graph;
pub mod grid;
pub mod sliding_tile;

/// Failure building a world from its description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The textual layout could not be parsed.
    #[error("world layout invalid: {detail}")]
    Parse { detail: String },
    /// A node name was referenced before being declared.
    #[error("unknown node: {name}")]
    UnknownNode { name: String },
}
