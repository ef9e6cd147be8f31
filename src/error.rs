use thiserror::Error;

/// A disagreement between the forward index, the reverse index and the edge
/// order log of an [`EdgeIndex`](crate::EdgeIndex).
///
/// Nodes are captured by their `Debug` rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsistencyError {
    #[error("Edge {from} -> {to} is in the forward index but not in the reverse index")]
    MissingReverse { from: String, to: String },

    #[error("Edge {from} -> {to} is in the reverse index but not in the forward index")]
    MissingForward { from: String, to: String },

    #[error("Source {from} is kept in the forward index with no targets")]
    EmptyTargetSet { from: String },

    #[error("Target {to} is kept in the reverse index with no sources")]
    EmptySourceSet { to: String },

    #[error("Edge {from} -> {to} has no entry in the edge order")]
    UnorderedEdge { from: String, to: String },

    #[error("Edge order lists {from} -> {to}, which is not in the index")]
    StaleOrderEntry { from: String, to: String },
}

impl ConsistencyError {
    pub(crate) fn missing_reverse<N: std::fmt::Debug>(source: &N, target: &N) -> Self {
        Self::MissingReverse {
            from: format!("{:?}", source),
            to: format!("{:?}", target),
        }
    }

    pub(crate) fn missing_forward<N: std::fmt::Debug>(source: &N, target: &N) -> Self {
        Self::MissingForward {
            from: format!("{:?}", source),
            to: format!("{:?}", target),
        }
    }

    pub(crate) fn unordered_edge<N: std::fmt::Debug>(source: &N, target: &N) -> Self {
        Self::UnorderedEdge {
            from: format!("{:?}", source),
            to: format!("{:?}", target),
        }
    }

    pub(crate) fn stale_order_entry<N: std::fmt::Debug>(source: &N, target: &N) -> Self {
        Self::StaleOrderEntry {
            from: format!("{:?}", source),
            to: format!("{:?}", target),
        }
    }
}
