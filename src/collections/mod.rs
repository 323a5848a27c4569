//! Storage primitives backing the graph types.

pub mod slot_arena;

pub use slot_arena::{SlotArena, SlotKey};
