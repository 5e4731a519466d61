#![forbid(unsafe_code)]

//! Element tree data model and operations for Pagecraft.
//!
//! This crate holds the page-builder core that everything else is built
//! on: the recursive, ordered [`Element`] tree, the pure tree operations
//! in [`ops`], and the JSON layout persistence in [`persist`].
//!
//! # Design Invariants
//!
//! 1. Every [`ElementId`] is unique across the tree at all times.
//! 2. A node's `parent_id` always names the container currently holding
//!    it as a direct child (or is absent for root-level nodes).
//! 3. Only container kinds (Row, Grid) ever own children.
//! 4. The tree is acyclic; `ops::move_element` rejects any move that
//!    would re-parent a node under its own descendant.
//! 5. Child order is a total order; inserting at index `i` shifts
//!    existing children at `>= i` right.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing target id | Tree changed mid-gesture | Silent no-op |
//! | Cycle-creating move | Drop onto own descendant | Silent no-op |
//! | Malformed layout JSON | Corrupt or foreign file | `PersistError`, tree unchanged |

pub mod element;
pub mod ops;
pub mod persist;

pub use element::{Element, ElementId, ElementKind, StyleMap, UpdateFields};
pub use ops::{Detached, MoveOutcome};
pub use persist::{PersistError, PersistResult};
