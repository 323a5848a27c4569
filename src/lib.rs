//! # `keyed_dag` - Keyed Directed Acyclic Graph
//!
//! An in-memory directed acyclic graph over uniquely keyed vertices. Edges are
//! checked for cycles as they are attached, so the graph is acyclic at every
//! point in time, and four traversal modes run over the current state:
//! breadth-first, depth-first, eager topological, and a resumable topological
//! iterator that hands out dependency layers one generation at a time.
//!
//! ## Guarantees
//!
//! ### Structural
//! - **Acyclicity**: [`KeyedDag::attach`] searches for a path from the
//!   destination back to the source before inserting anything. A rejected edge
//!   leaves the graph untouched.
//! - **Mirrored adjacency**: every vertex keeps an ordered out-edge set and an
//!   ordered in-edge set. Both sides of an edge are written and removed
//!   together.
//! - **Complete deletion**: [`KeyedDag::delete`] excises every edge touching the
//!   vertex before handing it back.
//!
//! ### Identity
//! - Vertices live in a generational [`SlotArena`](collections::SlotArena).
//!   Edge sets and traversal state refer to arena slots, never to raw pointers.
//! - A [`VertexId`] of a deleted vertex never resolves again, even after its
//!   slot is reused.
//!
//! ### Determinism
//! - Traversal roots follow key order, neighbours follow edge-set key order.
//!   Two graphs with the same keys and edges traverse identically.
//!
//! ## Failure Model
//!
//! Two tiers:
//! - **Expected outcomes** come back as ordinary values: `false` for a rejected
//!   cycle or a missing edge, `None` for an unknown key, `created = false` for a
//!   duplicate insert.
//! - **Precondition violations** (self-loop, unknown endpoint) are programmer
//!   errors. [`KeyedDag::attach`] and [`KeyedDag::detach`] panic on them;
//!   [`KeyedDag::try_attach`] and [`KeyedDag::try_detach`] return a [`DagError`].
//!
//! ## Features
//!
//! - `tracing`: emit `trace`/`debug` events for vertex and edge mutations under
//!   the `keyed_dag` target.
//! - `proptest`: expose [`strategy`](crate::strategy) with `proptest`
//!   strategies that generate random acyclic graphs for downstream tests.
//!
//! ## Example
//!
//! ```rust
//! use keyed_dag::KeyedDag;
//!
//! let mut dag = KeyedDag::new();
//! for step in ["checkout", "deps", "lint", "build", "test"] {
//!     dag.insert(step, ());
//! }
//! dag.attach(&"checkout", &"deps");
//! dag.attach(&"checkout", &"lint");
//! dag.attach(&"deps", &"build");
//! dag.attach(&"build", &"test");
//! dag.attach(&"lint", &"test");
//!
//! let stages: Vec<Vec<&str>> = dag
//!     .iter()
//!     .batches()
//!     .map(|batch| batch.iter().map(|v| *v.key()).collect())
//!     .collect();
//! assert_eq!(
//!     stages,
//!     vec![vec!["checkout"], vec!["deps", "lint"], vec!["build"], vec!["test"]]
//! );
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod macros;

pub mod collections;
pub mod error;
pub mod graph;
#[cfg(feature = "proptest")]
pub mod strategy;

pub use error::{DagError, EdgeEnd};
pub use graph::{Batches, KeyedDag, TopologicalIter, Vertex, VertexId};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Arena ids are two `u32`s and stay `Copy`-cheap.
    assert!(mem::size_of::<VertexId>() == 8);
    assert!(mem::size_of::<Option<VertexId>>() <= 12);
};
