#![forbid(unsafe_code)]

//! The Pagecraft editing layer: session state, drag gestures, and
//! render tree production.
//!
//! An [`EditorSession`] owns the element tree and the single selection
//! and exposes the full mutation API. A [`DragGesture`] tracks one
//! drag from pickup to release, re-resolving its drop slot through
//! `pagecraft-layout` on every pointer move. [`render_tree`] turns the
//! tree into presentation nodes for either canvas mode.
//!
//! Everything here is single-threaded and synchronous: mutations run
//! on the caller's thread, replace the tree atomically, and notify
//! subscribers before the call returns.

pub mod drag;
pub mod render;
pub mod sample;
pub mod session;

pub use drag::{DragGesture, DragPayload, DropRequest, HoverTarget};
pub use render::{ParamBag, RenderMode, RenderNode, RenderOptions, render_tree, substitute_params};
pub use sample::{sample_layout, sample_params};
pub use session::{EditorSession, IdAllocator};
