//! Vertex records stored in the DAG arena.

use core::fmt;
use std::collections::BTreeMap;

use super::VertexId;

/// An ordered edge set: neighbour key -> neighbour arena slot.
pub(crate) type EdgeSet<K> = BTreeMap<K, VertexId>;

/// A uniquely keyed node carrying a payload and its two edge sets.
///
/// `out` holds the destinations of edges leaving this vertex and `in` the sources
/// of edges arriving at it, both ordered by key. The owning graph only ever
/// mutates the two sides of an edge together, so `a.out` contains `b` exactly
/// when `b.in` contains `a`.
pub struct Vertex<K, V> {
    key: K,
    value: V,
    id: VertexId,
    out: EdgeSet<K>,
    in_: EdgeSet<K>,
    detached: bool,
}

impl<K, V> Vertex<K, V> {
    pub(crate) fn new(key: K, value: V, id: VertexId) -> Self {
        Self {
            key,
            value,
            id,
            out: BTreeMap::new(),
            in_: BTreeMap::new(),
            detached: false,
        }
    }

    /// The vertex key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The vertex payload.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Mutable access to the payload. Edge sets stay read-only.
    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Consumes the vertex, returning its key and payload.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    /// The arena slot this vertex occupies (or occupied, once deleted).
    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Number of outgoing edges.
    #[inline]
    pub fn out_degree(&self) -> usize {
        self.out.len()
    }

    /// Number of incoming edges.
    #[inline]
    pub fn in_degree(&self) -> usize {
        self.in_.len()
    }

    /// Keys of the destinations of outgoing edges, in key order.
    pub fn out_keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.out.keys()
    }

    /// Keys of the sources of incoming edges, in key order.
    pub fn in_keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.in_.keys()
    }

    /// Returns `true` once the vertex has been deleted from its graph.
    ///
    /// A detached vertex has empty edge sets and takes no further part in traversals.
    #[inline]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    #[inline]
    pub(crate) fn out_edges(&self) -> &EdgeSet<K> {
        &self.out
    }

    #[inline]
    pub(crate) fn in_edges(&self) -> &EdgeSet<K> {
        &self.in_
    }

    #[inline]
    pub(crate) fn out_edges_mut(&mut self) -> &mut EdgeSet<K> {
        &mut self.out
    }

    #[inline]
    pub(crate) fn in_edges_mut(&mut self) -> &mut EdgeSet<K> {
        &mut self.in_
    }

    /// Marks the vertex as removed from its graph and drops both edge sets.
    pub(crate) fn detach_all(&mut self) {
        self.out.clear();
        self.in_.clear();
        self.detached = true;
    }
}

impl<K: fmt::Display, V> fmt::Display for Vertex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Vertex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("out", &self.out.keys().collect::<Vec<_>>())
            .field("in", &self.in_.keys().collect::<Vec<_>>())
            .finish()
    }
}
