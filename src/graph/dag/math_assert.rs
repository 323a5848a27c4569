//! Debug-only invariant helpers.
//!
//! Release builds compile the edge checks away.

use super::Vertex;

/// Debug-asserts that the edge `src -> dest` is recorded on both sides, or on
/// neither side when `present` is `false`.
///
/// Checks the key under which each side is stored as well as the id it points
/// at, so a stale id left behind by a reused slot is caught too.
#[inline(always)]
pub(crate) fn debug_assert_edge_mirrored<K: Ord, V>(
    src: &Vertex<K, V>,
    dest: &Vertex<K, V>,
    present: bool,
) {
    if cfg!(debug_assertions) {
        let out_side = src.out_edges().get(dest.key());
        let in_side = dest.in_edges().get(src.key());
        if present {
            let (from, to) = (src.id(), dest.id());
            debug_assert_eq!(out_side, Some(&to), "out-side of {from} -> {to}");
            debug_assert_eq!(in_side, Some(&from), "in-side of {from} -> {to}");
        } else {
            debug_assert!(
                out_side.is_none() && in_side.is_none(),
                "edge {} -> {} left half attached",
                src.id(),
                dest.id()
            );
        }
    }
}

/// A Kahn pass that emits every vertex proves the graph acyclic.
///
/// Vertices on a cycle never reach in-degree zero, so they are never emitted.
pub(crate) const fn topological_order_implies_acyclic(
    order_len: usize,
    node_count: usize,
) -> bool {
    order_len == node_count
}
