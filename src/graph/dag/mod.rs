//! A keyed directed acyclic graph with cycle-safe edge mutation.
//!
//! Vertices are addressed by an ordered key and stored in a [`SlotArena`]. The
//! graph keeps a global `BTreeMap` index from key to arena slot, and every vertex
//! keeps two ordered edge sets (out and in) mapping neighbour keys to neighbour
//! slots. Edges are only ever inserted after a reachability check, so the graph
//! is acyclic at every point in time.
//!
//! ## Example
//!
//! ```rust
//! use keyed_dag::KeyedDag;
//!
//! let mut dag = KeyedDag::new();
//! for (key, job) in [(1, "fetch"), (2, "build"), (3, "test")] {
//!     dag.insert(key, job);
//! }
//!
//! assert!(dag.attach(&1, &2));
//! assert!(dag.attach(&2, &3));
//! // 3 already depends on 1, so 3 -> 1 would close a loop.
//! assert!(!dag.attach(&3, &1));
//!
//! let order: Vec<_> = dag.iter().map(|v| *v.value()).collect();
//! assert_eq!(order, ["fetch", "build", "test"]);
//! ```

use core::fmt;
use std::borrow::Borrow;
use std::collections::btree_map::{self, BTreeMap};

use crate::collections::{SlotArena, SlotKey};
use crate::error::{DagError, EdgeEnd};
use crate::graph::access::visited::VisitedSet;
use crate::macros::{dag_debug, dag_trace};

mod iter;
mod math_assert;
mod traversal;
mod vertex;


pub use iter::{Batches, TopologicalIter};
pub use vertex::Vertex;

use math_assert::debug_assert_edge_mirrored;

/// Identity of a vertex inside its graph's arena.
///
/// Ids are stable while the vertex is live. Once the vertex is deleted its id
/// never resolves again, even if the slot is reused.
pub type VertexId = SlotKey;

/// A directed acyclic graph over uniquely keyed vertices.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `insert` / `search` | \(O(\log n)\) | Ordered vertex index |
/// | `delete` | \(O(d \log d)\) | Touches only the deleted vertex's neighbours |
/// | `attach` | \(O(n + m)\) | Reachability search from the destination |
/// | `detach` | \(O(\log n + \log d)\) | |
/// | `bfs` / `dfs` / `topological` | \(O(n + m)\) | Visited state is per call |
/// | `iter` | \(O(n)\) to build | Then \(O(d)\) per emitted vertex |
///
/// ### Invariants
/// - The edge relation is acyclic.
/// - `a.out` holds `b` exactly when `b.in` holds `a`.
/// - Every id stored in an edge set resolves to a live vertex.
pub struct KeyedDag<K, V> {
    index: BTreeMap<K, VertexId>,
    arena: SlotArena<Vertex<K, V>>,
    edge_count: usize,
}

impl<K, V> KeyedDag<K, V> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            index: BTreeMap::new(),
            arena: SlotArena::new(),
            edge_count: 0,
        }
    }

    /// Creates an empty graph with arena space for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: BTreeMap::new(),
            arena: SlotArena::with_capacity(capacity),
            edge_count: 0,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Looks up a vertex by arena id.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<K, V>> {
        self.arena.get(id)
    }

    /// Live vertices in key order.
    pub fn vertices(
        &self,
    ) -> impl DoubleEndedIterator<Item = &Vertex<K, V>> + ExactSizeIterator + '_ {
        self.index.values().map(move |&id| self.slot(id))
    }

    /// Live keys in order.
    pub fn keys(&self) -> btree_map::Keys<'_, K, VertexId> {
        self.index.keys()
    }

    /// Removes every vertex and edge.
    pub fn clear(&mut self) {
        self.index.clear();
        self.arena.clear();
        self.edge_count = 0;
    }

    /// Resolves an id that the graph itself stored.
    #[inline]
    pub(crate) fn slot(&self, id: VertexId) -> &Vertex<K, V> {
        self.arena
            .get(id)
            .expect("vertex id stored in the graph must be live")
    }

    #[inline]
    fn slot_mut(&mut self, id: VertexId) -> &mut Vertex<K, V> {
        self.arena
            .get_mut(id)
            .expect("vertex id stored in the graph must be live")
    }

    /// Number of arena slots, the bound for per-slot side tables.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.arena.slot_count()
    }

    /// Returns `true` if `target` can be reached from `from` by following out-edges.
    ///
    /// Every vertex reaches itself.
    pub(crate) fn reaches(&self, from: VertexId, target: VertexId) -> bool {
        let mut visited = VisitedSet::new(self.slot_count());
        let mut stack = vec![from];
        visited.try_visit(from);

        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            for &next in self.slot(id).out_edges().values() {
                if visited.try_visit(next) {
                    stack.push(next);
                }
            }
        }
        false
    }
}

impl<K: Ord + Clone, V> KeyedDag<K, V> {
    /// Inserts a vertex unless the key is already present.
    ///
    /// Returns the vertex stored under `key` and whether it was created by this
    /// call. An existing vertex is left untouched and `value` is dropped: the
    /// first write wins.
    pub fn insert(&mut self, key: K, value: V) -> (&mut Vertex<K, V>, bool) {
        let (id, created) = match self.index.entry(key) {
            btree_map::Entry::Occupied(entry) => (*entry.get(), false),
            btree_map::Entry::Vacant(entry) => {
                let key = entry.key().clone();
                let id = self.arena.insert_with_key(|id| Vertex::new(key, value, id));
                entry.insert(id);
                dag_trace!(vertex = %id, "vertex created");
                (id, true)
            }
        };
        (self.slot_mut(id), created)
    }

    /// Deletes the vertex stored under `key`, with every edge touching it.
    ///
    /// The returned vertex is detached: its edge sets are empty. Returns `None`
    /// if no such vertex exists.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<Vertex<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.index.remove(key)?;
        let mut vex = self
            .arena
            .remove(id)
            .expect("indexed vertex must be present in the arena");

        for &dest in vex.out_edges().values() {
            self.slot_mut(dest).in_edges_mut().remove::<K>(vex.key());
        }
        for &src in vex.in_edges().values() {
            self.slot_mut(src).out_edges_mut().remove::<K>(vex.key());
        }

        let excised = vex.out_degree() + vex.in_degree();
        self.edge_count -= excised;
        vex.detach_all();
        dag_trace!(vertex = %id, excised, "vertex deleted");
        Some(vex)
    }

    /// Looks up a vertex by key.
    pub fn search<Q>(&self, key: &Q) -> Option<&Vertex<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.get(key).map(|&id| self.slot(id))
    }

    /// Looks up a vertex by key for payload mutation.
    pub fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut Vertex<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = *self.index.get(key)?;
        Some(self.slot_mut(id))
    }

    /// Returns `true` if a vertex is stored under `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// The arena id of the vertex stored under `key`.
    pub fn id_of<Q>(&self, key: &Q) -> Option<VertexId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.get(key).copied()
    }

    /// Returns `true` if the edge `src -> dest` exists.
    pub fn has_edge<Q>(&self, src: &Q, dest: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(src)
            .is_some_and(|vex| vex.out_edges().contains_key(dest))
    }

    /// Returns `true` if `to` can be reached from `from` along out-edges.
    ///
    /// A vertex reaches itself. Unknown keys reach nothing.
    pub fn is_reachable<Q>(&self, from: &Q, to: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match (self.id_of(from), self.id_of(to)) {
            (Some(from), Some(to)) => self.reaches(from, to),
            _ => false,
        }
    }

    /// Adds the edge `src -> dest` unless it would close a cycle.
    ///
    /// Returns `Ok(false)` without touching the graph when `dest` can already
    /// reach `src`. Attaching an edge that already exists returns `Ok(true)` and
    /// changes nothing.
    ///
    /// # Errors
    /// [`DagError::SelfLoop`] if `src == dest`, [`DagError::VertexNotFound`] if
    /// either key is absent.
    pub fn try_attach(&mut self, src: &K, dest: &K) -> Result<bool, DagError<K>> {
        let (src_id, dest_id) = self.endpoints(src, dest)?;

        // dest ~> src plus src -> dest would be a loop.
        if self.reaches(dest_id, src_id) {
            dag_debug!(
                src = %src_id,
                dest = %dest_id,
                "attach rejected: edge would close a cycle"
            );
            return Ok(false);
        }

        let (src_vex, dest_vex) = self
            .arena
            .get2_mut(src_id, dest_id)
            .expect("endpoints resolved to two distinct live vertices");
        let fresh = src_vex.out_edges_mut().insert(dest.clone(), dest_id).is_none();
        dest_vex.in_edges_mut().insert(src.clone(), src_id);
        debug_assert_edge_mirrored(src_vex, dest_vex, true);

        if fresh {
            self.edge_count += 1;
            dag_trace!(src = %src_id, dest = %dest_id, "edge attached");
        }
        Ok(true)
    }

    /// Removes the edge `src -> dest`.
    ///
    /// Returns `Ok(false)` if there was no such edge.
    ///
    /// # Errors
    /// Same preconditions as [`try_attach`](Self::try_attach).
    pub fn try_detach(&mut self, src: &K, dest: &K) -> Result<bool, DagError<K>> {
        let (src_id, dest_id) = self.endpoints(src, dest)?;

        if self.slot_mut(src_id).out_edges_mut().remove(dest).is_none() {
            return Ok(false);
        }
        let reverse = self.slot_mut(dest_id).in_edges_mut().remove(src);
        debug_assert!(reverse.is_some(), "detached edge {src_id} -> {dest_id} had no in-side");
        debug_assert_edge_mirrored(self.slot(src_id), self.slot(dest_id), false);

        self.edge_count -= 1;
        dag_trace!(src = %src_id, dest = %dest_id, "edge detached");
        Ok(true)
    }

    /// Adds the edge `src -> dest` unless it would close a cycle.
    ///
    /// Returns `false` when the edge was rejected because `dest` can already
    /// reach `src`.
    ///
    /// # Panics
    /// Panics if `src == dest` or if either key is absent. Use
    /// [`try_attach`](Self::try_attach) to get these as errors.
    pub fn attach(&mut self, src: &K, dest: &K) -> bool
    where
        K: fmt::Debug,
    {
        self.try_attach(src, dest).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Removes the edge `src -> dest`, returning `false` if it did not exist.
    ///
    /// # Panics
    /// Panics if `src == dest` or if either key is absent. Use
    /// [`try_detach`](Self::try_detach) to get these as errors.
    pub fn detach(&mut self, src: &K, dest: &K) -> bool
    where
        K: fmt::Debug,
    {
        self.try_detach(src, dest).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Starts a resumable topological iteration over the current graph.
    ///
    /// The iterator borrows the graph, so the graph cannot change underneath it.
    pub fn iter(&self) -> TopologicalIter<'_, K, V> {
        TopologicalIter::new(self)
    }

    fn endpoints(&self, src: &K, dest: &K) -> Result<(VertexId, VertexId), DagError<K>> {
        if src == dest {
            return Err(DagError::SelfLoop(src.clone()));
        }
        let src_id = self.id_of(src).ok_or_else(|| DagError::VertexNotFound {
            key: src.clone(),
            end: EdgeEnd::Source,
        })?;
        let dest_id = self.id_of(dest).ok_or_else(|| DagError::VertexNotFound {
            key: dest.clone(),
            end: EdgeEnd::Destination,
        })?;
        Ok((src_id, dest_id))
    }

    /// Validates the structural invariants of the graph.
    ///
    /// This method checks that:
    /// 1. The key index and the arena agree on every vertex
    /// 2. Every edge has both its out side and its in side
    /// 3. The cached edge count matches the edge sets
    /// 4. The edge relation is acyclic
    ///
    /// Returns `true` if all invariants hold.
    pub fn validate_invariants(&self) -> bool {
        if self.index.len() != self.arena.len() {
            return false;
        }

        let mut edges = 0usize;
        for (key, &id) in &self.index {
            let Some(vex) = self.arena.get(id) else {
                return false;
            };
            if vex.key() != key || vex.id() != id || vex.is_detached() {
                return false;
            }
            for (dest_key, &dest_id) in vex.out_edges() {
                match self.arena.get(dest_id) {
                    Some(dest) if dest.key() == dest_key => {
                        if dest.in_edges().get(key) != Some(&id) {
                            return false;
                        }
                    }
                    _ => return false,
                }
            }
            for (src_key, &src_id) in vex.in_edges() {
                match self.arena.get(src_id) {
                    Some(src) if src.key() == src_key => {
                        if src.out_edges().get(key) != Some(&id) {
                            return false;
                        }
                    }
                    _ => return false,
                }
            }
            edges += vex.out_degree();
        }

        if edges != self.edge_count {
            return false;
        }

        let mut emitted = 0usize;
        self.topological(|_| {
            emitted += 1;
            true
        });
        math_assert::topological_order_implies_acyclic(emitted, self.len())
    }
}

impl<K, V> Default for KeyedDag<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V> fmt::Debug for KeyedDag<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.vertices()
                    .map(|vex| (vex.key(), vex.out_keys().collect::<Vec<_>>())),
            )
            .finish()
    }
}

impl<K: Ord + Clone, V> Extend<(K, V)> for KeyedDag<K, V> {
    /// Inserts every vertex; keys already present keep their existing payload.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for KeyedDag<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dag = Self::new();
        dag.extend(iter);
        dag
    }
}

impl<'a, K: Ord + Clone, V> IntoIterator for &'a KeyedDag<K, V> {
    type Item = &'a Vertex<K, V>;
    type IntoIter = TopologicalIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
