#![forbid(unsafe_code)]

//! Pagecraft public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use pagecraft_core::ops::{self, Detached, MoveOutcome};
pub use pagecraft_core::persist::{self, PersistError, PersistResult};
pub use pagecraft_core::{Element, ElementId, ElementKind, StyleMap, UpdateFields};

// --- Layout re-exports -----------------------------------------------------

pub use pagecraft_layout::{
    Bounds, ContainerLayout, DropHint, DropSide, DropZone, Point, ResolverConfig, innermost_zone,
    resolve_drop,
};

// --- Editor re-exports -----------------------------------------------------

pub use pagecraft_editor::{
    DragGesture, DragPayload, DropRequest, EditorSession, HoverTarget, IdAllocator, ParamBag,
    RenderMode, RenderNode, RenderOptions, render_tree, sample_layout, sample_params,
    substitute_params,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for pagecraft apps.
#[derive(Debug)]
pub enum Error {
    /// Layout serialization or validation failure.
    Persist(PersistError),
    /// I/O failure while reading or writing a layout document.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persist(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<PersistError> for Error {
    fn from(err: PersistError) -> Self {
        Self::Persist(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for pagecraft APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DragGesture, DragPayload, EditorSession, Element, ElementId, ElementKind, Error,
        RenderMode, RenderOptions, Result, UpdateFields, render_tree,
    };

    pub use crate::{core, editor, layout};
}

pub use pagecraft_core as core;
pub use pagecraft_editor as editor;
pub use pagecraft_layout as layout;
