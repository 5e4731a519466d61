#![forbid(unsafe_code)]

//! Pure tree operations.
//!
//! Every mutating operation takes the tree by value and returns the
//! successor tree. Ownership transfer is the Rust rendering of
//! "immutable snapshot replaced atomically": a caller that keeps a
//! clone of the previous tree observes no change in it, and each event
//! handler sees exactly one consistent tree.
//!
//! Target-id misses are silent no-ops rather than errors: the tree can
//! legitimately change between when a drag starts and when it resolves,
//! and a stale drop must never crash the editor.

use crate::element::{Element, ElementId, UpdateFields};
use tracing::debug;

/// A node detached by [`remove`], together with the id of the container
/// that held it (`None` means it was a root-level element).
#[derive(Debug, Clone, PartialEq)]
pub struct Detached {
    pub element: Element,
    pub parent_id: Option<ElementId>,
}

/// Why a [`move_element`] call did or did not change the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The node was detached and re-inserted at the target.
    Moved,
    /// No node with the given id exists.
    NotFound,
    /// The target container equals the moved node or is one of its
    /// descendants; applying the move would create a cycle.
    CycleRejected,
    /// The target container id does not name a container in the tree.
    TargetMissing,
}

impl MoveOutcome {
    /// Whether the tree changed.
    #[must_use]
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved)
    }
}

/// Depth-first lookup by id.
#[must_use]
pub fn find_by_id(tree: &[Element], id: ElementId) -> Option<&Element> {
    for el in tree {
        if el.id == id {
            return Some(el);
        }
        if let Some(found) = find_by_id(&el.children, id) {
            return Some(found);
        }
    }
    None
}

/// Whether any node in the tree has the given id.
#[must_use]
pub fn contains_id(tree: &[Element], id: ElementId) -> bool {
    find_by_id(tree, id).is_some()
}

/// Collect every id in the tree, depth-first, into `out`.
pub fn collect_ids(tree: &[Element], out: &mut Vec<ElementId>) {
    for el in tree {
        out.push(el.id);
        collect_ids(&el.children, out);
    }
}

/// Whether `id` lies strictly inside the subtree rooted at `ancestor`.
#[must_use]
pub fn is_descendant(tree: &[Element], ancestor: ElementId, id: ElementId) -> bool {
    find_by_id(tree, ancestor).is_some_and(|node| contains_id(&node.children, id))
}

/// Insert `element` into the root sequence (when `container` is `None`)
/// or into the named container's children, at `index` clamped to
/// `[0, len]`.
///
/// A missing or non-container target id is a silent no-op: the element
/// is dropped on the floor and the tree returned unchanged.
#[must_use]
pub fn insert(
    tree: Vec<Element>,
    mut element: Element,
    container: Option<ElementId>,
    index: usize,
) -> Vec<Element> {
    match container {
        None => {
            element.parent_id = None;
            let mut tree = tree;
            let index = index.min(tree.len());
            tree.insert(index, element);
            tree
        }
        Some(cid) => {
            let mut slot = Some(element);
            let tree = insert_into(tree, cid, &mut slot, index);
            if slot.is_some() {
                debug!(container = %cid, "insert target missing; dropping no-op");
            }
            tree
        }
    }
}

fn insert_into(
    tree: Vec<Element>,
    container: ElementId,
    slot: &mut Option<Element>,
    index: usize,
) -> Vec<Element> {
    tree.into_iter()
        .map(|mut el| {
            if el.id == container && el.is_container() {
                if let Some(mut node) = slot.take() {
                    node.parent_id = Some(container);
                    let index = index.min(el.children.len());
                    el.children.insert(index, node);
                }
            } else if !el.children.is_empty() {
                el.children = insert_into(std::mem::take(&mut el.children), container, slot, index);
            }
            el
        })
        .collect()
}

/// Detach the node with `id` from wherever it is, at any depth.
///
/// Returns the pruned tree and the detached node with its former parent
/// id. An unknown id returns the tree unchanged and `None`.
#[must_use]
pub fn remove(tree: Vec<Element>, id: ElementId) -> (Vec<Element>, Option<Detached>) {
    let mut detached = None;
    let tree = remove_from(tree, id, None, &mut detached);
    (tree, detached)
}

fn remove_from(
    tree: Vec<Element>,
    id: ElementId,
    parent: Option<ElementId>,
    detached: &mut Option<Detached>,
) -> Vec<Element> {
    let mut out = Vec::with_capacity(tree.len());
    for mut el in tree {
        if el.id == id && detached.is_none() {
            *detached = Some(Detached {
                element: el,
                parent_id: parent,
            });
            continue;
        }
        if !el.children.is_empty() {
            let owner = el.id;
            el.children = remove_from(std::mem::take(&mut el.children), id, Some(owner), detached);
        }
        out.push(el);
    }
    out
}

/// Relocate the node with `id` to `new_index` inside `target` (or the
/// root sequence when `target` is `None`), preserving its identity and
/// subtree and rewriting its `parent_id`.
///
/// Guards, each a no-op with a reported [`MoveOutcome`]: the node must
/// exist; the target (when given) must be a container present in the
/// tree; and the target must not be the node itself or one of its
/// descendants, which would create a cycle. The resolver never offers
/// such a target in practice, but the operation defends independently.
#[must_use]
pub fn move_element(
    tree: Vec<Element>,
    id: ElementId,
    new_index: usize,
    target: Option<ElementId>,
) -> (Vec<Element>, MoveOutcome) {
    if !contains_id(&tree, id) {
        return (tree, MoveOutcome::NotFound);
    }

    if let Some(tid) = target {
        if tid == id || is_descendant(&tree, id, tid) {
            debug!(id = %id, target = %tid, "move rejected: would create cycle");
            return (tree, MoveOutcome::CycleRejected);
        }
        let target_is_container =
            find_by_id(&tree, tid).is_some_and(Element::is_container);
        if !target_is_container {
            debug!(id = %id, target = %tid, "move rejected: target missing");
            return (tree, MoveOutcome::TargetMissing);
        }
    }

    let (pruned, detached) = remove(tree, id);
    match detached {
        Some(Detached { mut element, .. }) => {
            element.parent_id = target;
            (insert(pruned, element, target, new_index), MoveOutcome::Moved)
        }
        // Unreachable in practice given the contains_id check above.
        None => (pruned, MoveOutcome::NotFound),
    }
}

/// Merge `fields` into the node with `id`, at any depth.
///
/// Style entries merge key-by-key (last write wins); content and image
/// URL replace the current value when present. Siblings and all other
/// nodes are structurally untouched. Unknown id is a silent no-op.
#[must_use]
pub fn update(tree: Vec<Element>, id: ElementId, fields: &UpdateFields) -> Vec<Element> {
    tree.into_iter()
        .map(|mut el| {
            if el.id == id {
                if let Some(content) = &fields.content {
                    el.content = content.clone();
                }
                if let Some(style) = &fields.style {
                    for (property, value) in style {
                        el.style.insert(property.clone(), value.clone());
                    }
                }
                if let Some(url) = &fields.image_url {
                    el.image_url = Some(url.clone());
                }
            } else if !el.children.is_empty() {
                el.children = update(std::mem::take(&mut el.children), id, fields);
            }
            el
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn leaf(id: u64, kind: ElementKind) -> Element {
        Element::new(ElementId(id), kind)
    }

    /// Root [text(1), row(2)[button(3), text(4)], grid(5)[text(6)]]
    fn fixture() -> Vec<Element> {
        vec![
            leaf(1, ElementKind::Text),
            leaf(2, ElementKind::Row)
                .child(leaf(3, ElementKind::Button))
                .child(leaf(4, ElementKind::Text)),
            leaf(5, ElementKind::Grid).child(leaf(6, ElementKind::Text)),
        ]
    }

    fn ids(tree: &[Element]) -> Vec<u64> {
        let mut out = Vec::new();
        collect_ids(tree, &mut out);
        out.into_iter().map(|id| id.0).collect()
    }

    // --- find_by_id ---

    #[test]
    fn find_root_and_nested() {
        let tree = fixture();
        assert_eq!(find_by_id(&tree, ElementId(1)).map(|e| e.id.0), Some(1));
        assert_eq!(find_by_id(&tree, ElementId(4)).map(|e| e.id.0), Some(4));
        assert_eq!(find_by_id(&tree, ElementId(6)).map(|e| e.id.0), Some(6));
        assert!(find_by_id(&tree, ElementId(99)).is_none());
    }

    #[test]
    fn descendant_checks() {
        let tree = fixture();
        assert!(is_descendant(&tree, ElementId(2), ElementId(3)));
        assert!(!is_descendant(&tree, ElementId(2), ElementId(2)));
        assert!(!is_descendant(&tree, ElementId(2), ElementId(6)));
        assert!(!is_descendant(&tree, ElementId(1), ElementId(2)));
    }

    // --- insert ---

    #[test]
    fn insert_at_root_index() {
        let tree = insert(fixture(), leaf(7, ElementKind::Heading), None, 1);
        assert_eq!(ids(&tree), vec![1, 7, 2, 3, 4, 5, 6]);
        assert!(find_by_id(&tree, ElementId(7)).unwrap().parent_id.is_none());
    }

    #[test]
    fn insert_root_index_clamped() {
        let tree = insert(fixture(), leaf(7, ElementKind::Heading), None, 100);
        assert_eq!(tree.last().unwrap().id, ElementId(7));

        let tree = insert(fixture(), leaf(8, ElementKind::Heading), None, 0);
        assert_eq!(tree.first().unwrap().id, ElementId(8));
    }

    #[test]
    fn insert_into_nested_container() {
        let tree = insert(fixture(), leaf(7, ElementKind::Text), Some(ElementId(2)), 1);
        let row = find_by_id(&tree, ElementId(2)).unwrap();
        let child_ids: Vec<u64> = row.children.iter().map(|c| c.id.0).collect();
        assert_eq!(child_ids, vec![3, 7, 4]);
        assert_eq!(row.children[1].parent_id, Some(ElementId(2)));
    }

    #[test]
    fn insert_child_index_clamped() {
        let tree = insert(fixture(), leaf(7, ElementKind::Text), Some(ElementId(5)), 50);
        let grid = find_by_id(&tree, ElementId(5)).unwrap();
        assert_eq!(grid.children.last().unwrap().id, ElementId(7));
    }

    #[test]
    fn insert_missing_container_is_noop() {
        let before = fixture();
        let after = insert(before.clone(), leaf(7, ElementKind::Text), Some(ElementId(99)), 0);
        assert_eq!(after, before);
    }

    #[test]
    fn insert_into_leaf_is_noop() {
        // Id 1 exists but is a Text leaf; leaves never acquire children.
        let before = fixture();
        let after = insert(before.clone(), leaf(7, ElementKind::Text), Some(ElementId(1)), 0);
        assert_eq!(after, before);
    }

    // --- remove ---

    #[test]
    fn remove_root_element() {
        let (tree, detached) = remove(fixture(), ElementId(1));
        assert_eq!(ids(&tree), vec![2, 3, 4, 5, 6]);
        let detached = detached.unwrap();
        assert_eq!(detached.element.id, ElementId(1));
        assert!(detached.parent_id.is_none());
    }

    #[test]
    fn remove_nested_reports_parent() {
        let (tree, detached) = remove(fixture(), ElementId(4));
        assert_eq!(ids(&tree), vec![1, 2, 3, 5, 6]);
        assert_eq!(detached.unwrap().parent_id, Some(ElementId(2)));
    }

    #[test]
    fn remove_container_cascades() {
        let (tree, detached) = remove(fixture(), ElementId(2));
        assert_eq!(ids(&tree), vec![1, 5, 6]);
        // The detached subtree travels with the node.
        assert_eq!(detached.unwrap().element.subtree_len(), 3);
    }

    #[test]
    fn remove_missing_is_noop() {
        let before = fixture();
        let (after, detached) = remove(before.clone(), ElementId(99));
        assert_eq!(after, before);
        assert!(detached.is_none());
    }

    // --- move_element ---

    #[test]
    fn move_within_root_reorders() {
        // [1, 2, 5] -> move 5 to index 0 -> [5, 1, 2]
        let (tree, outcome) = move_element(fixture(), ElementId(5), 0, None);
        assert_eq!(outcome, MoveOutcome::Moved);
        let roots: Vec<u64> = tree.iter().map(|e| e.id.0).collect();
        assert_eq!(roots, vec![5, 1, 2]);
    }

    #[test]
    fn move_into_container_rewrites_parent() {
        let (tree, outcome) = move_element(fixture(), ElementId(1), 0, Some(ElementId(2)));
        assert_eq!(outcome, MoveOutcome::Moved);
        let moved = find_by_id(&tree, ElementId(1)).unwrap();
        assert_eq!(moved.parent_id, Some(ElementId(2)));
        let row = find_by_id(&tree, ElementId(2)).unwrap();
        assert_eq!(row.children[0].id, ElementId(1));
    }

    #[test]
    fn move_out_to_root_clears_parent() {
        let (tree, outcome) = move_element(fixture(), ElementId(3), 0, None);
        assert_eq!(outcome, MoveOutcome::Moved);
        let moved = find_by_id(&tree, ElementId(3)).unwrap();
        assert!(moved.parent_id.is_none());
        assert_eq!(tree[0].id, ElementId(3));
    }

    #[test]
    fn move_round_trip_restores_structure() {
        let original = fixture();
        let (moved, _) = move_element(original.clone(), ElementId(4), 0, None);
        let (restored, _) = move_element(moved, ElementId(4), 1, Some(ElementId(2)));
        assert_eq!(restored, original);
    }

    #[test]
    fn move_onto_self_rejected() {
        let before = fixture();
        let (after, outcome) = move_element(before.clone(), ElementId(2), 0, Some(ElementId(2)));
        assert_eq!(outcome, MoveOutcome::CycleRejected);
        assert_eq!(after, before);
    }

    #[test]
    fn move_into_own_descendant_rejected() {
        // Nest a row inside row 2, then try to move 2 into it.
        let tree = insert(fixture(), leaf(7, ElementKind::Row), Some(ElementId(2)), 2);
        let (after, outcome) = move_element(tree.clone(), ElementId(2), 0, Some(ElementId(7)));
        assert_eq!(outcome, MoveOutcome::CycleRejected);
        assert_eq!(after, tree);
    }

    #[test]
    fn move_to_missing_target_rejected() {
        let before = fixture();
        let (after, outcome) = move_element(before.clone(), ElementId(1), 0, Some(ElementId(99)));
        assert_eq!(outcome, MoveOutcome::TargetMissing);
        assert_eq!(after, before);
    }

    #[test]
    fn move_to_leaf_target_rejected() {
        let before = fixture();
        let (after, outcome) = move_element(before.clone(), ElementId(3), 0, Some(ElementId(1)));
        assert_eq!(outcome, MoveOutcome::TargetMissing);
        assert_eq!(after, before);
    }

    #[test]
    fn move_missing_id_not_found() {
        let before = fixture();
        let (after, outcome) = move_element(before.clone(), ElementId(99), 0, None);
        assert_eq!(outcome, MoveOutcome::NotFound);
        assert_eq!(after, before);
    }

    // --- update ---

    #[test]
    fn update_content_in_place() {
        let tree = update(fixture(), ElementId(4), &UpdateFields::content("hi"));
        assert_eq!(find_by_id(&tree, ElementId(4)).unwrap().content, "hi");
        // Sibling untouched.
        assert_eq!(find_by_id(&tree, ElementId(3)).unwrap().content, "Button");
    }

    #[test]
    fn update_merges_style_keys() {
        let tree = update(
            fixture(),
            ElementId(1),
            &UpdateFields::style_property("color", "red"),
        );
        let el = find_by_id(&tree, ElementId(1)).unwrap();
        assert_eq!(el.style.get("color").map(String::as_str), Some("red"));
        // Pre-existing keys survive the merge.
        assert_eq!(el.style.get("width").map(String::as_str), Some("100%"));
    }

    #[test]
    fn update_style_last_write_wins() {
        let tree = update(
            fixture(),
            ElementId(1),
            &UpdateFields::style_property("width", "50%"),
        );
        let el = find_by_id(&tree, ElementId(1)).unwrap();
        assert_eq!(el.style.get("width").map(String::as_str), Some("50%"));
    }

    #[test]
    fn update_missing_is_noop() {
        let before = fixture();
        let after = update(before.clone(), ElementId(99), &UpdateFields::content("x"));
        assert_eq!(after, before);
    }

    #[test]
    fn update_image_url() {
        let tree = insert(fixture(), leaf(7, ElementKind::Image), None, 0);
        let tree = update(tree, ElementId(7), &UpdateFields::image_url("/cat.png"));
        let el = find_by_id(&tree, ElementId(7)).unwrap();
        assert_eq!(el.image_url.as_deref(), Some("/cat.png"));
    }
}
