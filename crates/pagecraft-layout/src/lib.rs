#![forbid(unsafe_code)]

//! Drop-target resolution for Pagecraft canvases.
//!
//! This crate answers one question during a drag: *if the user released
//! right now, where would the element land?* It is pure geometry — no
//! tree access, no mutation — so the editor can call it on every
//! pointer move without cost or side effects.
//!
//! The entry points are [`resolve_drop`], which maps a pointer position
//! over a single container to a [`DropHint`], and [`innermost_zone`],
//! which arbitrates between nested containers that all contain the
//! pointer.
//!
//! # Invariants
//!
//! 1. Resolution is pure: the same inputs always produce the same hint.
//! 2. A hint's insertion index never exceeds the container's child
//!    count; feeding it to a tree insert cannot go out of range.
//! 3. A pointer outside a container's bounds never produces a hint for
//!    that container.
//! 4. When containers nest, only the deepest one under the pointer
//!    resolves.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Pointer outside every zone | Drag left the canvas | No hint; gesture abandons on release |
//! | Unparseable grid column style | Hand-edited style value | [`DEFAULT_GRID_COLUMNS`] |
//! | Degenerate (empty) bounds | Container not yet laid out | Containment fails, no hint |

pub mod geometry;
pub mod resolver;

pub use geometry::{Bounds, Point};
pub use resolver::{
    ContainerLayout, DEFAULT_GRID_COLUMNS, DropHint, DropSide, DropZone, ResolverConfig,
    grid_columns_from_style, innermost_zone, resolve_drop,
};
