//! Visited sets for graph traversals.
//!
//! Traversals key their visited state by arena slot, not by vertex key. A set is
//! allocated per traversal call and sized to the arena's slot count, so no state
//! leaks from one call to the next.

use crate::collections::SlotKey;

/// A dense, word-packed visited set over arena slots.
pub(crate) struct VisitedSet {
    words: Vec<u64>,
    len: usize,
}

impl VisitedSet {
    const BITS: usize = u64::BITS as usize;

    #[inline]
    pub(crate) fn new(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(Self::BITS)],
            len: bits,
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` iff this call observed the slot as not-yet-visited and marks it visited.
    #[inline(always)]
    pub(crate) fn try_visit(&mut self, slot: SlotKey) -> bool {
        let idx = slot.index();
        debug_assert!(idx < self.len(), "slot {idx} out of bounds for {}", self.len());
        let word = &mut self.words[idx / Self::BITS];
        let mask = 1u64 << (idx % Self::BITS);
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    #[inline(always)]
    pub(crate) fn is_visited(&self, slot: SlotKey) -> bool {
        let idx = slot.index();
        self.words[idx / Self::BITS] & (1u64 << (idx % Self::BITS)) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::SlotArena;

    #[test]
    fn visited_set_marks_once() {
        let mut arena = SlotArena::new();
        let keys: Vec<_> = (0..130).map(|i| arena.insert(i)).collect();
        let mut visited = VisitedSet::new(arena.slot_count());
        assert_eq!(visited.len(), 130);

        assert!(!visited.is_visited(keys[129]));
        assert!(visited.try_visit(keys[129]));
        assert!(!visited.try_visit(keys[129]));
        assert!(visited.is_visited(keys[129]));

        assert!(visited.try_visit(keys[0]));
        assert!(!visited.is_visited(keys[64]));
    }
}
