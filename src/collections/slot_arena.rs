//! `SlotArena` — a generational arena for graph node storage.
//!
//! Values live in a dense `Vec` of slots. Removed slots are threaded onto an
//! intrusive free list and reused by later insertions.
//!
//! Implementation details:
//! - Each slot carries a generation counter. Even = occupied, odd = free.
//! - Keys remember the generation they were issued with, so a key from a removed
//!   value never aliases a value later stored in the same slot (ABA protection).
//! - Slot indices are stable for the lifetime of a value, which lets callers keep
//!   dense side tables (visited flags, in-degree counters) indexed by
//!   [`SlotKey::index`].

use core::fmt;

/// Sentinel for "no free slot".
const NIL: u32 = u32::MAX;

/// A key for accessing a [`SlotArena`].
///
/// Contains an index and a generation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    index: u32,
    generation: u32,
}

impl SlotKey {
    #[inline]
    fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// The dense slot index this key refers to.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// The generation the key was issued with.
    #[inline(always)]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Internal slot state.
enum SlotData<T> {
    Occupied(T),
    /// Index of the next free slot, or `NIL`.
    Free(u32),
}

struct Entry<T> {
    /// Generation counter. Even = occupied, Odd = free.
    generation: u32,
    data: SlotData<T>,
}

/// A generational slot arena.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `insert` | \(O(1)\) amortized | Reuses the most recently freed slot first |
/// | `get` / `get_mut` | \(O(1)\) | Generation checked |
/// | `remove` | \(O(1)\) | Slot pushed onto the free list |
/// | `iter` | \(O(\text{slots})\) | Skips free slots |
pub struct SlotArena<T> {
    slots: Vec<Entry<T>>,
    free_head: u32,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Creates a new empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: NIL,
            len: 0,
        }
    }

    /// Creates a new arena with space for `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: NIL,
            len: 0,
        }
    }

    /// Number of live values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots ever allocated (live or free).
    ///
    /// Every [`SlotKey::index`] issued by this arena is strictly below this bound,
    /// so side tables sized to `slot_count()` can be indexed without checks.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Inserts a value, returning its key.
    ///
    /// # Panics
    /// Panics if the arena would exceed `u32::MAX - 1` slots.
    pub fn insert(&mut self, value: T) -> SlotKey {
        self.insert_with_key(|_| value)
    }

    /// Inserts a value built from the key it is about to be stored under.
    ///
    /// # Panics
    /// Panics if the arena would exceed `u32::MAX - 1` slots.
    pub fn insert_with_key<F>(&mut self, f: F) -> SlotKey
    where
        F: FnOnce(SlotKey) -> T,
    {
        self.len += 1;

        if self.free_head != NIL {
            let idx = self.free_head;
            let entry = &mut self.slots[idx as usize];
            if let SlotData::Free(next_free) = entry.data {
                self.free_head = next_free;
            } else {
                unreachable!("free list points at an occupied slot");
            }
            // Free (odd) -> occupied (even).
            entry.generation = entry.generation.wrapping_add(1);
            let key = SlotKey::new(idx, entry.generation);
            entry.data = SlotData::Occupied(f(key));
            key
        } else {
            let idx = u32::try_from(self.slots.len())
                .ok()
                .filter(|&i| i != NIL)
                .expect("slot arena index space exhausted");
            let key = SlotKey::new(idx, 0);
            self.slots.push(Entry {
                generation: 0,
                data: SlotData::Occupied(f(key)),
            });
            key
        }
    }

    /// Returns a shared reference to the value for `key`, if it is still live.
    #[inline]
    pub fn get(&self, key: SlotKey) -> Option<&T> {
        match self.slots.get(key.index()) {
            Some(Entry {
                generation,
                data: SlotData::Occupied(value),
            }) if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value for `key`, if it is still live.
    #[inline]
    pub fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        match self.slots.get_mut(key.index()) {
            Some(Entry {
                generation,
                data: SlotData::Occupied(value),
            }) if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    /// Returns mutable references to two distinct live values at once.
    ///
    /// Returns `None` if either key is stale or both keys name the same slot.
    pub fn get2_mut(&mut self, a: SlotKey, b: SlotKey) -> Option<(&mut T, &mut T)> {
        if a.index == b.index || self.get(a).is_none() || self.get(b).is_none() {
            return None;
        }

        let (lo, hi, swapped) = if a.index < b.index {
            (a.index(), b.index(), false)
        } else {
            (b.index(), a.index(), true)
        };
        let (head, tail) = self.slots.split_at_mut(hi);
        match (&mut head[lo].data, &mut tail[0].data) {
            (SlotData::Occupied(x), SlotData::Occupied(y)) => {
                if swapped {
                    Some((y, x))
                } else {
                    Some((x, y))
                }
            }
            _ => None,
        }
    }

    /// Removes the value for `key`, returning it.
    pub fn remove(&mut self, key: SlotKey) -> Option<T> {
        let idx = key.index;
        let entry = self.slots.get_mut(idx as usize)?;
        if entry.generation != key.generation || entry.generation % 2 != 0 {
            return None;
        }

        let data = core::mem::replace(&mut entry.data, SlotData::Free(self.free_head));
        // Occupied (even) -> free (odd).
        entry.generation = entry.generation.wrapping_add(1);
        self.free_head = idx;
        self.len -= 1;

        match data {
            SlotData::Occupied(value) => Some(value),
            SlotData::Free(_) => unreachable!("even generation on a free slot"),
        }
    }

    /// Returns `true` if `key` refers to a live value.
    #[inline]
    pub fn contains_key(&self, key: SlotKey) -> bool {
        self.get(key).is_some()
    }

    /// Removes every value. Slots are kept for reuse.
    pub fn clear(&mut self) {
        if self.slots.is_empty() {
            return;
        }

        let cap = self.slots.len();
        for (idx, entry) in self.slots.iter_mut().enumerate() {
            if entry.generation % 2 == 0 {
                entry.generation = entry.generation.wrapping_add(1);
            }
            // Rebuild the free list in ascending slot order.
            let next = if idx + 1 < cap { (idx + 1) as u32 } else { NIL };
            entry.data = SlotData::Free(next);
        }
        self.free_head = 0;
        self.len = 0;
    }

    /// Iterates over live `(key, value)` pairs in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.slots.iter().enumerate(),
            remaining: self.len,
        }
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SlotArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the live values of a [`SlotArena`].
pub struct Iter<'a, T> {
    slots: core::iter::Enumerate<core::slice::Iter<'a, Entry<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotKey, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for (idx, entry) in self.slots.by_ref() {
            if let SlotData::Occupied(value) = &entry.data {
                self.remaining -= 1;
                return Some((SlotKey::new(idx as u32, entry.generation), value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
