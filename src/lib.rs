//! A directed-graph edge index: a set of `(source, target)` edges between
//! opaque nodes, queryable in both directions.
//!
//! The index is not synchronized. Share it across threads behind a lock.

pub use edge_index::EdgeIndex;
pub use error::ConsistencyError;
pub use iter::Edges;

mod edge_index;
mod error;
mod iter;
