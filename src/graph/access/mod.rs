//! Shared traversal state used by the graph implementations.

pub(crate) mod visited;
