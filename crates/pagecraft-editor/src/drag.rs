#![forbid(unsafe_code)]

//! Drag gesture tracking.
//!
//! A [`DragGesture`] lives from pointer-down on a palette entry or an
//! existing element until pointer-up. While active it re-resolves the
//! candidate drop slot on every pointer move and remembers only the
//! *last* valid target; releasing with no valid target abandons the
//! gesture without mutating anything.
//!
//! ## Invariants
//!
//! 1. At most one gesture is active at a time; [`DragGesture::release`]
//!    consumes it.
//! 2. A hover target is only ever the innermost drop zone under the
//!    pointer, and only if that zone still names a live container (or
//!    the root canvas).
//! 3. Leaving every zone clears the pending target; a fast pointer that
//!    never fired a hover over a container resolves to "no target".
//!
//! ## Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Released outside all zones | Drop on empty canvas chrome | Gesture abandoned, tree untouched |
//! | Hovered zone names a deleted element | Stale zone registration | Target cleared |
//! | Hovered zone names a leaf element | Stale zone registration | Target cleared |

use pagecraft_core::ops::find_by_id;
use pagecraft_core::{Element, ElementId, ElementKind};
use pagecraft_layout::{
    ContainerLayout, DropHint, DropZone, Point, ResolverConfig, innermost_zone, resolve_drop,
};
use tracing::trace;

// ---------------------------------------------------------------------------
// DragPayload
// ---------------------------------------------------------------------------

/// What is being dragged: a fresh block from the palette, or an element
/// already in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    NewElement { kind: ElementKind },
    Existing { id: ElementId },
}

impl DragPayload {
    #[must_use]
    pub const fn new_element(kind: ElementKind) -> Self {
        Self::NewElement { kind }
    }

    #[must_use]
    pub const fn existing(id: ElementId) -> Self {
        Self::Existing { id }
    }

    /// True for palette drags that will create a fresh element.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        matches!(self, Self::NewElement { .. })
    }
}

// ---------------------------------------------------------------------------
// DragGesture
// ---------------------------------------------------------------------------

/// The container and slot the drop would currently land in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTarget {
    /// `None` for the root canvas.
    pub container: Option<ElementId>,
    pub hint: DropHint,
}

/// A resolved drop, ready to hand to the editor session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropRequest {
    pub payload: DragPayload,
    /// `None` for the root canvas.
    pub container: Option<ElementId>,
    pub index: usize,
}

/// An in-flight drag.
#[derive(Debug, Clone)]
pub struct DragGesture {
    payload: DragPayload,
    hover: Option<HoverTarget>,
    config: ResolverConfig,
}

impl DragGesture {
    #[must_use]
    pub fn new(payload: DragPayload) -> Self {
        Self {
            payload,
            hover: None,
            config: ResolverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn payload(&self) -> DragPayload {
        self.payload
    }

    /// The pending drop slot, if the pointer is over a valid container.
    #[must_use]
    pub const fn hover(&self) -> Option<&HoverTarget> {
        self.hover.as_ref()
    }

    /// Re-resolve the pending target from the current pointer position.
    ///
    /// `zones` are the registered drop zones in canvas space; `tree` is
    /// consulted to validate that a hovered zone still names a live
    /// container element and to read its layout flow and child count.
    pub fn pointer_moved(&mut self, zones: &[DropZone], tree: &[Element], pointer: Point) {
        let Some(zone) = innermost_zone(zones, pointer) else {
            self.leave();
            return;
        };

        let (layout, child_count) = match zone.id {
            None => (ContainerLayout::Vertical, tree.len()),
            Some(id) => match find_by_id(tree, id) {
                Some(el) if el.is_container() => {
                    (ContainerLayout::for_element(el), el.children.len())
                }
                _ => {
                    trace!(%id, "hovered zone no longer names a container");
                    self.leave();
                    return;
                }
            },
        };

        self.hover = resolve_drop(zone.bounds, layout, child_count, pointer, &self.config)
            .map(|hint| HoverTarget {
                container: zone.id,
                hint,
            });
    }

    /// Clear the pending target; called when the pointer leaves every
    /// zone or the hovered container disappears.
    pub fn leave(&mut self) {
        self.hover = None;
    }

    /// End the gesture. Returns the resolved drop, or `None` if the
    /// pointer had no valid target at release time.
    #[must_use]
    pub fn release(self) -> Option<DropRequest> {
        let hover = self.hover?;
        Some(DropRequest {
            payload: self.payload,
            container: hover.container,
            index: hover.hint.insertion_index(),
        })
    }
}
