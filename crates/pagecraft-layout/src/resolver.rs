#![forbid(unsafe_code)]

//! Pointer-to-slot drop resolution.
//!
//! Given a container's bounds, its layout flow, its child count, and a
//! pointer position, [`resolve_drop`] computes where a dropped element
//! would be inserted. The result is a [`DropHint`]: a reference child
//! index plus a [`DropSide`] saying whether insertion lands before or
//! after that child. [`DropHint::insertion_index`] collapses the pair
//! into the index passed to the tree operations.
//!
//! # Algorithm
//!
//! Each container divides its content span evenly among its children
//! (or treats the whole span as one slot when empty). A pointer inside
//! a child's slot is refined by its fractional position: the leading
//! third means "before this child", everything else means "after" (the
//! middle third is an alias for "after" — there is no replace
//! semantics). Thin edge bands at the leading and trailing edges of
//! the container pin the result to the first and last slot so that a
//! drop near the border always works even over tall children.
//!
//! - Vertical containers resolve along the y axis.
//! - Rows resolve along the x axis.
//! - Grids resolve a row index along the y axis, then map it to a flat
//!   child index using the grid's column count.
//!
//! ## Invariants
//!
//! 1. `resolve_drop` returns `None` exactly when the pointer is outside
//!    the container's bounds (half-open containment).
//! 2. Any returned hint has `insertion_index() <= child_count`.
//! 3. When `child_count > 0`, the hint's `index` references an existing
//!    child (`index < child_count`).
//! 4. An empty container always resolves to slot 0.

use pagecraft_core::{Element, ElementId, ElementKind, StyleMap};
use tracing::trace;

use crate::geometry::{Bounds, Point};

/// Column count assumed for grids whose style does not specify one.
pub const DEFAULT_GRID_COLUMNS: usize = 2;

// ---------------------------------------------------------------------------
// ContainerLayout
// ---------------------------------------------------------------------------

/// How a container flows its children, for resolution purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerLayout {
    /// Children stack top to bottom. Also used for the root canvas.
    Vertical,
    /// Children flow left to right on one line.
    Row,
    /// Children wrap into fixed-width rows of `columns` cells.
    Grid { columns: usize },
}

impl ContainerLayout {
    /// Resolution flow for a container element.
    ///
    /// Grids read their column count from the element's style; rows and
    /// everything else (including the root canvas, which has no element)
    /// flow vertically.
    #[must_use]
    pub fn for_element(element: &Element) -> Self {
        match element.kind {
            ElementKind::Row => Self::Row,
            ElementKind::Grid => Self::Grid {
                columns: grid_columns_from_style(&element.style),
            },
            _ => Self::Vertical,
        }
    }
}

/// Parse the column count out of a `gridTemplateColumns` style value
/// such as `repeat(3, 1fr)`. Missing or unparseable values fall back to
/// [`DEFAULT_GRID_COLUMNS`].
#[must_use]
pub fn grid_columns_from_style(style: &StyleMap) -> usize {
    let parsed = style
        .get("gridTemplateColumns")
        .and_then(|v| v.split("repeat(").nth(1))
        .and_then(|rest| rest.split([',', ')']).next())
        .and_then(|n| n.trim().parse::<usize>().ok());
    match parsed {
        Some(columns) if columns > 0 => columns,
        _ => DEFAULT_GRID_COLUMNS,
    }
}

// ---------------------------------------------------------------------------
// ResolverConfig
// ---------------------------------------------------------------------------

/// Tuning knobs for the tri-band resolution rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Width in pixels of the pinned bands at the container's leading
    /// and trailing edges.
    pub edge_band: f32,
    /// Slot fraction below which the pointer means "before this child".
    pub before_fraction: f32,
    /// Slot fraction above which the pointer means "after this child".
    /// The band between the two fractions also resolves to "after".
    pub after_fraction: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            edge_band: 10.0,
            before_fraction: 0.33,
            after_fraction: 0.66,
        }
    }
}

impl ResolverConfig {
    #[must_use]
    pub fn with_edge_band(mut self, edge_band: f32) -> Self {
        self.edge_band = edge_band;
        self
    }

    #[must_use]
    pub fn with_before_fraction(mut self, fraction: f32) -> Self {
        self.before_fraction = fraction;
        self
    }

    #[must_use]
    pub fn with_after_fraction(mut self, fraction: f32) -> Self {
        self.after_fraction = fraction;
        self
    }
}

// ---------------------------------------------------------------------------
// DropHint
// ---------------------------------------------------------------------------

/// Which flank of the reference child an insertion lands on.
///
/// Rows render `Before` as a left-edge indicator and `After` as a
/// right-edge one; vertical containers and grids render them above and
/// below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Before,
    After,
}

/// A resolved drop slot: insertion lands on the [`DropSide`] flank of
/// the child at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropHint {
    /// Reference child index. References an existing child whenever the
    /// container is non-empty; `0` for an empty container.
    pub index: usize,
    pub side: DropSide,
}

impl DropHint {
    #[must_use]
    pub const fn new(index: usize, side: DropSide) -> Self {
        Self { index, side }
    }

    /// The index to pass to an insert or move operation.
    #[must_use]
    pub const fn insertion_index(&self) -> usize {
        match self.side {
            DropSide::Before => self.index,
            DropSide::After => self.index + 1,
        }
    }
}

/// Flat insertion index expressed as a hint relative to an existing
/// child: `0` maps to before-first, anything else to after its
/// predecessor.
fn hint_for_insertion(insertion: usize) -> DropHint {
    if insertion == 0 {
        DropHint::new(0, DropSide::Before)
    } else {
        DropHint::new(insertion - 1, DropSide::After)
    }
}

// ---------------------------------------------------------------------------
// resolve_drop
// ---------------------------------------------------------------------------

/// Resolve a pointer position over a container to a drop slot.
///
/// Returns `None` when the pointer is outside `bounds`; callers treat
/// that as "no pending drop" and clear any indicator.
#[must_use]
pub fn resolve_drop(
    bounds: Bounds,
    layout: ContainerLayout,
    child_count: usize,
    pointer: Point,
    config: &ResolverConfig,
) -> Option<DropHint> {
    if !bounds.contains(pointer) {
        return None;
    }
    if child_count == 0 {
        return Some(DropHint::new(0, DropSide::Before));
    }

    let hint = match layout {
        ContainerLayout::Vertical => {
            let insertion = resolve_axis(
                pointer.y - bounds.y,
                bounds.height,
                child_count,
                child_count,
                config,
            );
            hint_for_insertion(insertion)
        }
        ContainerLayout::Row => {
            // Rows keep the hovered child as the reference so the
            // indicator can be drawn on its left or right edge.
            let offset = pointer.x - bounds.x;
            if offset < config.edge_band {
                DropHint::new(0, DropSide::Before)
            } else if offset > bounds.width - config.edge_band {
                DropHint::new(child_count - 1, DropSide::After)
            } else {
                let slot = bounds.width / child_count as f32;
                let hover = ((offset / slot) as usize).min(child_count - 1);
                let fraction = (offset - hover as f32 * slot) / slot;
                let side = if fraction < config.before_fraction {
                    DropSide::Before
                } else {
                    DropSide::After
                };
                DropHint::new(hover, side)
            }
        }
        ContainerLayout::Grid { columns } => {
            let columns = columns.max(1);
            let rows = child_count.div_ceil(columns).max(1);
            let insertion_row = resolve_axis(
                pointer.y - bounds.y,
                bounds.height,
                rows,
                child_count,
                config,
            );
            hint_for_insertion((insertion_row * columns).min(child_count))
        }
    };
    trace!(?layout, child_count, ?hint, "drop resolved");
    Some(hint)
}

/// Tri-band resolution along one axis.
///
/// `offset` is the pointer's distance from the container's leading edge
/// along the flow axis, `extent` the container's size on that axis, and
/// `slots` the number of occupied slots the span is divided into. The
/// returned insertion index is in `[0, max_insertion]`.
fn resolve_axis(
    offset: f32,
    extent: f32,
    slots: usize,
    max_insertion: usize,
    config: &ResolverConfig,
) -> usize {
    if offset < config.edge_band {
        return 0;
    }
    if offset > extent - config.edge_band {
        return max_insertion;
    }

    let slot_size = extent / slots.max(1) as f32;
    if slot_size <= 0.0 {
        return 0;
    }
    let hover = ((offset / slot_size) as usize).min(slots.saturating_sub(1));
    let fraction = (offset - hover as f32 * slot_size) / slot_size;

    let insertion = if fraction < config.before_fraction {
        hover
    } else {
        // Middle and trailing bands both mean "after this slot".
        hover + 1
    };
    insertion.min(max_insertion)
}

// ---------------------------------------------------------------------------
// Drop zones
// ---------------------------------------------------------------------------

/// A container currently able to receive drops, registered with its
/// canvas-space bounds and nesting depth (root canvas is depth 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    /// `None` for the root canvas.
    pub id: Option<ElementId>,
    pub bounds: Bounds,
    pub depth: usize,
}

impl DropZone {
    #[must_use]
    pub const fn new(id: Option<ElementId>, bounds: Bounds, depth: usize) -> Self {
        Self { id, bounds, depth }
    }
}

/// Pick the deepest zone containing the pointer.
///
/// Nested containers shadow their ancestors: once an inner zone claims
/// the pointer, outer zones must not resolve. Among zones at equal
/// depth the last registered wins.
#[must_use]
pub fn innermost_zone(zones: &[DropZone], pointer: Point) -> Option<&DropZone> {
    zones
        .iter()
        .filter(|z| z.bounds.contains(pointer))
        .max_by_key(|z| z.depth)
}
