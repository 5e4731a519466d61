#![forbid(unsafe_code)]

//! Layout persistence.
//!
//! The persisted form is the element tree serialized as nested JSON
//! records matching the data model field-for-field (`id`, `kind`,
//! `content`, `style`, optional `children`, optional `parentId`,
//! optional `imageUrl`). Loading validates the shape before the tree is
//! handed to a session: duplicate ids, children on leaf kinds, and
//! inconsistent parent back-references are all load failures, and a
//! failed load leaves the in-memory tree untouched.

use crate::element::{Element, ElementId};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Errors from layout save/load.
#[derive(Debug)]
pub enum PersistError {
    /// The JSON could not be encoded or decoded.
    Json(serde_json::Error),
    /// The JSON parsed but does not form a valid element tree.
    Invalid(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "layout JSON error: {err}"),
            Self::Invalid(msg) => write!(f, "invalid layout: {msg}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Result type for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Serialize a layout to JSON.
pub fn save_layout(tree: &[Element]) -> PersistResult<String> {
    Ok(serde_json::to_string(tree)?)
}

/// Deserialize and validate a layout.
///
/// Round-tripping a tree through [`save_layout`] and back reproduces an
/// equivalent tree (same ids, structure, and field values).
pub fn load_layout(json: &str) -> PersistResult<Vec<Element>> {
    let tree: Vec<Element> = serde_json::from_str(json).inspect_err(|err| {
        warn!(%err, "layout failed to parse");
    })?;
    validate(&tree).inspect_err(|err| {
        warn!(%err, "layout failed validation");
    })?;
    Ok(tree)
}

/// Check the tree invariants on a freshly loaded layout.
pub fn validate(tree: &[Element]) -> PersistResult<()> {
    let mut seen = HashSet::new();
    validate_level(tree, None, &mut seen)
}

fn validate_level(
    nodes: &[Element],
    parent: Option<ElementId>,
    seen: &mut HashSet<ElementId>,
) -> PersistResult<()> {
    for el in nodes {
        if !seen.insert(el.id) {
            return Err(PersistError::Invalid(format!("duplicate id {}", el.id)));
        }
        if !el.children.is_empty() && !el.kind.is_container() {
            return Err(PersistError::Invalid(format!(
                "{} element {} has children",
                el.kind.label(),
                el.id
            )));
        }
        if el.parent_id != parent {
            return Err(PersistError::Invalid(format!(
                "element {} has parentId {:?}, expected {:?}",
                el.id,
                el.parent_id.map(|id| id.0),
                parent.map(|id| id.0)
            )));
        }
        validate_level(&el.children, Some(el.id), seen)?;
    }
    Ok(())
}

/// The largest id present in the tree, or 0 for an empty tree.
///
/// Sessions resume their id allocator strictly above this after a load
/// so loaded ids are never reallocated.
#[must_use]
pub fn max_id(tree: &[Element]) -> u64 {
    tree.iter()
        .map(|el| el.id.0.max(max_id(&el.children)))
        .max()
        .unwrap_or(0)
}
