//! Callback-driven traversals: BFS, DFS and eager topological order.
//!
//! Every traversal takes a visitor `f(&Vertex) -> bool`; returning `false` stops
//! the walk immediately. Roots are taken from the vertex index in key order and
//! neighbours in edge-set key order, so the visiting order is deterministic.

use std::collections::VecDeque;

use super::{KeyedDag, Vertex, VertexId};
use crate::graph::access::visited::VisitedSet;

impl<K, V> KeyedDag<K, V> {
    /// Breadth-first traversal over every vertex.
    ///
    /// Each unvisited vertex, in key order, roots a queue-based walk over
    /// out-edges. A vertex is marked when enqueued, so it is never queued twice
    /// even when reachable from several roots.
    pub fn bfs<F>(&self, mut f: F)
    where
        F: FnMut(&Vertex<K, V>) -> bool,
    {
        let mut queue = VecDeque::with_capacity(self.len());
        let mut visited = VisitedSet::new(self.slot_count());

        for root in self.vertices() {
            if visited.try_visit(root.id()) {
                queue.push_back(root.id());
            }

            while let Some(id) = queue.pop_front() {
                let vex = self.slot(id);
                for &next in vex.out_edges().values() {
                    if visited.try_visit(next) {
                        queue.push_back(next);
                    }
                }

                if !f(vex) {
                    return;
                }
            }
        }
    }

    /// Depth-first traversal over every vertex, in recursive pre-order.
    ///
    /// Uses an explicit stack. Out-edges are pushed in reverse key order so the
    /// smallest key is explored first, which reproduces the order of a naive
    /// recursive DFS. Stale stack entries for vertices that were visited after
    /// being pushed are skipped at pop time.
    pub fn dfs<F>(&self, mut f: F)
    where
        F: FnMut(&Vertex<K, V>) -> bool,
    {
        let mut stack: Vec<VertexId> = Vec::new();
        let mut visited = VisitedSet::new(self.slot_count());

        for root in self.vertices() {
            stack.push(root.id());

            while let Some(id) = stack.pop() {
                if !visited.try_visit(id) {
                    continue;
                }

                let vex = self.slot(id);
                for &next in vex.out_edges().values().rev() {
                    if !visited.is_visited(next) {
                        stack.push(next);
                    }
                }

                if !f(vex) {
                    return;
                }
            }
        }
    }

    /// Topological traversal using Kahn's algorithm.
    ///
    /// Every vertex is visited after all of its in-edge sources. Zero in-degree
    /// vertices are seeded in key order; ties after that follow edge-set order.
    pub fn topological<F>(&self, mut f: F)
    where
        F: FnMut(&Vertex<K, V>) -> bool,
    {
        let (mut queue, mut in_degree) = self.kahn_seed();

        while let Some(id) = queue.pop_front() {
            let vex = self.slot(id);
            self.kahn_release(vex, &mut in_degree, &mut queue);

            if !f(vex) {
                return;
            }
        }
    }

    /// Snapshots in-degrees per arena slot and queues the zero in-degree vertices.
    pub(crate) fn kahn_seed(&self) -> (VecDeque<VertexId>, Vec<usize>) {
        let mut in_degree = vec![0usize; self.slot_count()];
        let mut queue = VecDeque::new();

        for vex in self.vertices() {
            match vex.in_degree() {
                0 => queue.push_back(vex.id()),
                degree => in_degree[vex.id().index()] = degree,
            }
        }
        (queue, in_degree)
    }

    /// Emits `vex`: decrements each out-neighbour and queues the ones that drop to zero.
    pub(crate) fn kahn_release(
        &self,
        vex: &Vertex<K, V>,
        in_degree: &mut [usize],
        queue: &mut VecDeque<VertexId>,
    ) {
        for &next in vex.out_edges().values() {
            let remaining = &mut in_degree[next.index()];
            *remaining -= 1;
            if *remaining == 0 {
                queue.push_back(next);
            }
        }
    }
}
