//! Error type for fallible edge operations.

use core::fmt;

/// A precondition violation on an edge operation.
///
/// The panicking [`KeyedDag::attach`](crate::KeyedDag::attach) and
/// [`KeyedDag::detach`](crate::KeyedDag::detach) abort with this error's message;
/// [`KeyedDag::try_attach`](crate::KeyedDag::try_attach) and
/// [`KeyedDag::try_detach`](crate::KeyedDag::try_detach) return it instead.
///
/// A rejected cycle or a missing edge is *not* an error: those come back as `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DagError<K> {
    /// Source and destination are the same key.
    SelfLoop(K),
    /// The key does not name a vertex in the graph.
    VertexNotFound {
        /// The missing key.
        key: K,
        /// Which end of the edge it was given for.
        end: EdgeEnd,
    },
}

/// Which end of an edge a key was passed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEnd {
    /// The edge's source (tail).
    Source,
    /// The edge's destination (head).
    Destination,
}

impl<K> DagError<K> {
    /// The key that caused the error.
    pub fn key(&self) -> &K {
        match self {
            Self::SelfLoop(key) | Self::VertexNotFound { key, .. } => key,
        }
    }
}

impl<K: fmt::Debug> fmt::Display for DagError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLoop(key) => {
                write!(f, "dag: source key {key:?} is the same as the destination key")
            }
            Self::VertexNotFound {
                key,
                end: EdgeEnd::Source,
            } => write!(f, "dag: vertex of source key {key:?} does not exist"),
            Self::VertexNotFound {
                key,
                end: EdgeEnd::Destination,
            } => write!(f, "dag: vertex of destination key {key:?} does not exist"),
        }
    }
}

impl<K: fmt::Debug> std::error::Error for DagError<K> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DagError::SelfLoop(3).to_string(),
            "dag: source key 3 is the same as the destination key"
        );
        let err = DagError::VertexNotFound {
            key: "b",
            end: EdgeEnd::Destination,
        };
        assert_eq!(
            err.to_string(),
            "dag: vertex of destination key \"b\" does not exist"
        );
        assert_eq!(*err.key(), "b");
    }
}
