//! Graph types and traversals.
//!
//! - `dag`: the keyed directed acyclic graph, its traversals and the resumable
//!   topological iterator
//! - `access`: per-call traversal state shared by the algorithms

pub(crate) mod access;
pub mod dag;

pub use dag::{Batches, KeyedDag, TopologicalIter, Vertex, VertexId};
