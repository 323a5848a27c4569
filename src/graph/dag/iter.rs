//! Resumable topological iteration.
//!
//! [`TopologicalIter`] takes a private snapshot of every vertex's in-degree when
//! it is created and then runs Kahn's algorithm one step at a time. Consumption
//! is either vertex by vertex ([`Iterator::next`]) or one whole frontier at a
//! time ([`TopologicalIter::next_batch`]), which hands out dependency layers for
//! staged processing.
//!
//! ```text
//! Ready (frontier >= 1) --next / next_batch--> ... --> Drained (frontier = 0)
//! ```
//!
//! Drained is terminal. The iterator holds a shared borrow of the graph, so the
//! graph cannot be mutated while an iteration is in progress.

use core::fmt;
use core::iter::FusedIterator;
use std::collections::VecDeque;

use super::{KeyedDag, Vertex, VertexId};

/// A stateful Kahn iterator over a [`KeyedDag`].
///
/// Yields every vertex after all of its in-edge sources. The initial frontier is
/// the set of zero in-degree vertices in key order.
pub struct TopologicalIter<'a, K, V> {
    dag: &'a KeyedDag<K, V>,
    frontier: VecDeque<VertexId>,
    in_degree: Vec<usize>,
    /// Vertices not yet emitted.
    remaining: usize,
}

impl<'a, K, V> TopologicalIter<'a, K, V> {
    pub(crate) fn new(dag: &'a KeyedDag<K, V>) -> Self {
        let (frontier, in_degree) = dag.kahn_seed();
        Self {
            dag,
            frontier,
            in_degree,
            remaining: dag.len(),
        }
    }

    /// Returns `true` while the frontier holds at least one vertex.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.frontier.is_empty()
    }

    /// Number of vertices ready to be emitted right now.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Drains the entire current frontier as one generation.
    ///
    /// The vertices in the returned batch have no edges between them. After
    /// the batch is taken, their out-neighbours are released exactly as
    /// [`next`](Iterator::next) would release them, forming the next frontier.
    /// Returns `None` once the iterator is drained.
    pub fn next_batch(&mut self) -> Option<Vec<&'a Vertex<K, V>>> {
        if !self.is_valid() {
            return None;
        }

        let dag = self.dag;
        let batch: Vec<&'a Vertex<K, V>> = self.frontier.drain(..).map(|id| dag.slot(id)).collect();
        for vex in &batch {
            dag.kahn_release(vex, &mut self.in_degree, &mut self.frontier);
        }
        self.remaining -= batch.len();
        Some(batch)
    }

    /// Turns the iterator into an iterator of generations.
    pub fn batches(self) -> Batches<'a, K, V> {
        Batches { inner: self }
    }
}

impl<'a, K, V> Iterator for TopologicalIter<'a, K, V> {
    type Item = &'a Vertex<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let dag = self.dag;
        let id = self.frontier.pop_front()?;
        let vex = dag.slot(id);
        dag.kahn_release(vex, &mut self.in_degree, &mut self.frontier);
        self.remaining -= 1;
        Some(vex)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.frontier.len(), Some(self.remaining))
    }
}

impl<K, V> FusedIterator for TopologicalIter<'_, K, V> {}

impl<K, V> fmt::Debug for TopologicalIter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopologicalIter")
            .field("frontier", &self.frontier)
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Iterator over the dependency generations of a [`TopologicalIter`].
///
/// Created by [`TopologicalIter::batches`].
pub struct Batches<'a, K, V> {
    inner: TopologicalIter<'a, K, V>,
}

impl<'a, K, V> Iterator for Batches<'a, K, V> {
    type Item = Vec<&'a Vertex<K, V>>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_batch()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower = usize::from(self.inner.is_valid());
        (lower, Some(self.inner.remaining))
    }
}

impl<K, V> FusedIterator for Batches<'_, K, V> {}

impl<K, V> fmt::Debug for Batches<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Batches").field(&self.inner).finish()
    }
}
