#![forbid(unsafe_code)]

//! Element tree node types.
//!
//! An [`Element`] is one node of the page tree: a typed content block
//! with a string payload, a freeform style map, and (for container
//! kinds) an ordered child list. Kind-appropriate defaults for newly
//! dropped blocks come from [`ElementKind::default_content`] and
//! [`ElementKind::default_style`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Freeform style-property map. Key set is unvalidated; the last write
/// for a key wins.
pub type StyleMap = HashMap<String, String>;

/// Opaque unique identifier for an element.
///
/// Assigned at creation, stable for the node's lifetime, never reused
/// after deletion within a session (the session allocator is monotonic
/// and resumes above the maximum id of any loaded layout).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of block kinds.
///
/// Row and Grid are container kinds (may own children); the rest are
/// leaf kinds and never acquire children through any operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Heading,
    Text,
    Button,
    Image,
    Row,
    Grid,
}

impl ElementKind {
    /// Whether elements of this kind may own children.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Row | Self::Grid)
    }

    /// Lowercase label, used for badges and diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Text => "text",
            Self::Button => "button",
            Self::Image => "image",
            Self::Row => "row",
            Self::Grid => "grid",
        }
    }

    /// Initial content for a freshly dropped block of this kind.
    #[must_use]
    pub const fn default_content(&self) -> &'static str {
        match self {
            Self::Heading => "Heading",
            Self::Text => "Text paragraph",
            Self::Button => "Button",
            Self::Image | Self::Grid | Self::Row => "",
        }
    }

    /// Initial style map for a freshly dropped block of this kind.
    #[must_use]
    pub fn default_style(&self) -> StyleMap {
        let mut style = StyleMap::new();
        style.insert("width".into(), "100%".into());
        style.insert("padding".into(), "1rem".into());

        match self {
            Self::Heading => {
                style.insert("fontSize".into(), "1.5rem".into());
                style.insert("fontWeight".into(), "bold".into());
                style.insert("textAlign".into(), "left".into());
            }
            Self::Text => {
                style.insert("fontSize".into(), "1rem".into());
                style.insert("lineHeight".into(), "1.5".into());
            }
            Self::Button => {
                style.insert("backgroundColor".into(), "#3b82f6".into());
                style.insert("color".into(), "white".into());
                style.insert("padding".into(), "0.5rem 1rem".into());
                style.insert("borderRadius".into(), "0.25rem".into());
                style.insert("textAlign".into(), "center".into());
                style.insert("fontWeight".into(), "500".into());
            }
            Self::Image => {}
            Self::Grid => {
                style.insert("display".into(), "grid".into());
                style.insert("gridTemplateColumns".into(), "repeat(2, 1fr)".into());
                style.insert("gap".into(), "1rem".into());
                style.insert("minHeight".into(), "100px".into());
                style.insert("padding".into(), "0.5rem".into());
            }
            Self::Row => {
                style.insert("display".into(), "flex".into());
                style.insert("flexDirection".into(), "row".into());
                style.insert("gap".into(), "1rem".into());
                style.insert("minHeight".into(), "50px".into());
                style.insert("padding".into(), "0.5rem".into());
            }
        }

        style
    }
}

/// A node in the page tree.
///
/// `children` is meaningful only for container kinds and is omitted
/// from the persisted form when empty. `parent_id` is a weak
/// back-reference kept consistent by the tree operations; traversal
/// always goes through the tree itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub style: StyleMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
}

impl Element {
    /// Create an element with kind-appropriate default content and style.
    #[must_use]
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            content: kind.default_content().to_string(),
            style: kind.default_style(),
            image_url: None,
            children: Vec::new(),
            parent_id: None,
        }
    }

    /// Replace the content string.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set a single style property (last write wins).
    #[must_use]
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    /// Set the image URL (meaningful for Image kind).
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Append a child, fixing up its `parent_id`. Ignored on leaf kinds.
    #[must_use]
    pub fn child(mut self, mut node: Element) -> Self {
        if self.kind.is_container() {
            node.parent_id = Some(self.id);
            self.children.push(node);
        }
        self
    }

    /// Whether this element may own children.
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Count this node and all descendants.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_len).sum::<usize>()
    }
}

/// Partial fields merged into an element by [`crate::ops::update`].
///
/// `style` entries are merged key-by-key into the existing map rather
/// than replacing it wholesale; `content` and `image_url` replace the
/// current value when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateFields {
    pub content: Option<String>,
    pub style: Option<StyleMap>,
    pub image_url: Option<String>,
}

impl UpdateFields {
    /// Update that replaces the content string.
    #[must_use]
    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
            ..Self::default()
        }
    }

    /// Update that merges a single style property.
    #[must_use]
    pub fn style_property(property: impl Into<String>, value: impl Into<String>) -> Self {
        let mut style = StyleMap::new();
        style.insert(property.into(), value.into());
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    /// Update that replaces the image URL.
    #[must_use]
    pub fn image_url(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Merge a style property into this update.
    #[must_use]
    pub fn with_style_property(
        mut self,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.style
            .get_or_insert_with(StyleMap::new)
            .insert(property.into(), value.into());
        self
    }

    /// Whether this update carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.style.is_none() && self.image_url.is_none()
    }
}
