#![forbid(unsafe_code)]

//! Render tree production for the two canvas modes.
//!
//! Both modes recurse identically over the element tree and differ
//! only in decoration: **edit** mode marks the selected node, gives it
//! a kind-label badge, and attaches the pending drop hint to the
//! hovered container; **preview** mode carries no editing decorations
//! and substitutes `{{object.property}}` tokens in content against a
//! flat parameter bag.
//!
//! Substitution is best-effort by design: a token whose property is
//! missing from the bag, or whose shape is malformed, renders as the
//! literal source text rather than an error.

use pagecraft_core::{Element, ElementId, ElementKind, StyleMap};
use pagecraft_layout::DropHint;
use std::collections::HashMap;

use crate::drag::HoverTarget;

/// Externally supplied values for preview substitution, keyed by
/// property name.
pub type ParamBag = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Edit,
    Preview,
}

/// Inputs the renderer needs beyond the tree itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions<'a> {
    pub mode: RenderMode,
    pub selection: Option<ElementId>,
    /// Pending drop slot from an active drag, if any.
    pub hover: Option<&'a HoverTarget>,
    /// Parameter bag for preview substitution.
    pub params: Option<&'a ParamBag>,
}

impl<'a> RenderOptions<'a> {
    /// Edit-mode options with the session's current selection and the
    /// active gesture's hover target.
    #[must_use]
    pub const fn edit(selection: Option<ElementId>, hover: Option<&'a HoverTarget>) -> Self {
        Self {
            mode: RenderMode::Edit,
            selection,
            hover,
            params: None,
        }
    }

    /// Preview-mode options over a parameter bag.
    #[must_use]
    pub const fn preview(params: &'a ParamBag) -> Self {
        Self {
            mode: RenderMode::Preview,
            selection: None,
            hover: None,
            params: Some(params),
        }
    }

    /// The drop hint aimed at the root canvas, if any.
    #[must_use]
    pub fn canvas_drop_hint(&self) -> Option<DropHint> {
        match (self.mode, self.hover) {
            (RenderMode::Edit, Some(h)) if h.container.is_none() => Some(h.hint),
            _ => None,
        }
    }
}

/// One renderable node: the element's presentation fields plus the
/// decorations its mode calls for.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Content after substitution (preview) or verbatim (edit).
    pub text: String,
    pub style: StyleMap,
    pub image_url: Option<String>,
    pub selected: bool,
    /// Kind label badge, shown on the selected node only.
    pub badge: Option<&'static str>,
    /// Pending drop slot, attached to the hovered container only.
    pub drop_hint: Option<DropHint>,
    pub children: Vec<RenderNode>,
}

/// Produce render nodes for a whole tree.
#[must_use]
pub fn render_tree(tree: &[Element], options: &RenderOptions<'_>) -> Vec<RenderNode> {
    tree.iter().map(|el| render_element(el, options)).collect()
}

fn render_element(element: &Element, options: &RenderOptions<'_>) -> RenderNode {
    let (text, selected, badge, drop_hint) = match options.mode {
        RenderMode::Edit => {
            let selected = options.selection == Some(element.id);
            let badge = selected.then(|| element.kind.label());
            let drop_hint = options
                .hover
                .filter(|h| h.container == Some(element.id))
                .map(|h| h.hint);
            (element.content.clone(), selected, badge, drop_hint)
        }
        RenderMode::Preview => {
            let text = match options.params {
                Some(params) => substitute_params(&element.content, params),
                None => element.content.clone(),
            };
            (text, false, None, None)
        }
    };

    RenderNode {
        id: element.id,
        kind: element.kind,
        text,
        style: element.style.clone(),
        image_url: element.image_url.clone(),
        selected,
        badge,
        drop_hint,
        children: render_tree(&element.children, options),
    }
}

/// Replace each well-formed `{{object.property}}` token whose property
/// exists in `params`; all other text, including malformed or unknown
/// tokens, passes through verbatim.
#[must_use]
pub fn substitute_params(text: &str, params: &ParamBag) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(end) => {
                let token = &after_open[..end];
                match lookup_token(token, params) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(token);
                        out.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                // Unterminated token; emit the remainder as-is.
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// A token resolves only if it has the shape `object.property` with
/// identifier-like parts and the property is present in the bag.
fn lookup_token<'a>(token: &str, params: &'a ParamBag) -> Option<&'a String> {
    let (object, property) = token.split_once('.')?;
    if object.is_empty() || property.is_empty() {
        return None;
    }
    let ident = |s: &str| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !ident(object) || !ident(property) {
        return None;
    }
    params.get(property)
}
