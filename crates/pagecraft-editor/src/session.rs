#![forbid(unsafe_code)]

//! The editing session: tree, selection, and the mutation API.
//!
//! [`EditorSession`] owns the element tree and the single selection
//! exclusively. Every mutation happens synchronously on the caller's
//! thread and replaces the tree wholesale, so each observer always sees
//! a consistent snapshot; there is no partially applied state to
//! observe.
//!
//! ## Invariants
//!
//! 1. The selection, when set, always names an element present in the
//!    tree; any mutation that removes the selected element (directly or
//!    by cascade) clears it.
//! 2. Ids handed out by the session never collide with ids already in
//!    the tree, including ids from a loaded layout.
//! 3. Observers are notified after every applied mutation and never for
//!    rejected ones.
//!
//! ## Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Drop names a missing container | Zone raced a deletion | Drop rejected, tree untouched |
//! | Move would create a cycle | Container dropped into its own subtree | Move rejected, tree untouched |
//! | Layout fails to parse or validate | Corrupt document | Error returned, session untouched |
//! | `select` names a stale id | Click raced a deletion | Ignored |

use pagecraft_core::ops::{self, MoveOutcome};
use pagecraft_core::persist::{self, PersistResult};
use pagecraft_core::{Element, ElementId, ElementKind, UpdateFields};
use tracing::{debug, info, warn};

use crate::drag::{DragPayload, DropRequest};

// ---------------------------------------------------------------------------
// IdAllocator
// ---------------------------------------------------------------------------

/// Monotonic element id source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }

    /// Ensure future ids are strictly greater than `max`. Used after
    /// loading a layout so fresh ids never collide with loaded ones.
    pub fn bump_above(&mut self, max: u64) {
        if self.next <= max {
            self.next = max + 1;
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// EditorSession
// ---------------------------------------------------------------------------

type Observer = Box<dyn FnMut(&[Element], Option<ElementId>)>;

/// Owns the tree and selection; all mutations go through here.
pub struct EditorSession {
    tree: Vec<Element>,
    selection: Option<ElementId>,
    ids: IdAllocator,
    observers: Vec<Observer>,
}

impl EditorSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: Vec::new(),
            selection: None,
            ids: IdAllocator::new(),
            observers: Vec::new(),
        }
    }

    /// Start from an existing tree, resuming id allocation above its
    /// highest id.
    #[must_use]
    pub fn with_tree(tree: Vec<Element>) -> Self {
        let mut session = Self::new();
        session.ids.bump_above(persist::max_id(&tree));
        session.tree = tree;
        session
    }

    #[must_use]
    pub fn tree(&self) -> &[Element] {
        &self.tree
    }

    #[must_use]
    pub const fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// The selected element, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Element> {
        self.selection.and_then(|id| ops::find_by_id(&self.tree, id))
    }

    #[must_use]
    pub fn find(&self, id: ElementId) -> Option<&Element> {
        ops::find_by_id(&self.tree, id)
    }

    /// Register an observer called with the tree and selection after
    /// every applied mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&[Element], Option<ElementId>) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn publish(&mut self) {
        for observer in &mut self.observers {
            observer(&self.tree, self.selection);
        }
    }

    // --- selection ---

    /// Select an element. A stale id (element no longer in the tree) is
    /// ignored.
    pub fn select(&mut self, id: ElementId) {
        if !ops::contains_id(&self.tree, id) {
            debug!(%id, "select ignored stale id");
            return;
        }
        if self.selection != Some(id) {
            self.selection = Some(id);
            self.publish();
        }
    }

    pub fn deselect(&mut self) {
        if self.selection.take().is_some() {
            self.publish();
        }
    }

    // --- mutation ---

    /// Create a fresh element of `kind` with its default content and
    /// style, inserted at `index` in `container` (or the root canvas).
    /// Returns `None` when the container no longer exists; the tree is
    /// left untouched and observers are not notified.
    pub fn insert_new(
        &mut self,
        kind: ElementKind,
        container: Option<ElementId>,
        index: usize,
    ) -> Option<ElementId> {
        let id = self.ids.next_id();
        let element = Element::new(id, kind);
        self.tree = ops::insert(std::mem::take(&mut self.tree), element, container, index);
        if !ops::contains_id(&self.tree, id) {
            warn!(%id, ?container, "insert rejected: container missing");
            return None;
        }
        debug!(%id, ?kind, ?container, index, "insert element");
        self.publish();
        Some(id)
    }

    /// Move an existing element to `index` in `target` (or the root
    /// canvas). Rejected moves leave the tree and selection untouched.
    pub fn move_element(
        &mut self,
        id: ElementId,
        index: usize,
        target: Option<ElementId>,
    ) -> MoveOutcome {
        let (tree, outcome) = ops::move_element(std::mem::take(&mut self.tree), id, index, target);
        self.tree = tree;
        if outcome.is_moved() {
            debug!(%id, ?target, index, "move element");
            self.publish();
        } else {
            warn!(%id, ?target, ?outcome, "move rejected");
        }
        outcome
    }

    /// Apply a released drag. Returns the id of the inserted or moved
    /// element, or `None` if the drop was rejected.
    pub fn apply_drop(&mut self, request: DropRequest) -> Option<ElementId> {
        match request.payload {
            DragPayload::NewElement { kind } => {
                self.insert_new(kind, request.container, request.index)
            }
            DragPayload::Existing { id } => self
                .move_element(id, request.index, request.container)
                .is_moved()
                .then_some(id),
        }
    }

    /// Apply field edits to an element. Unknown ids are a no-op.
    pub fn update_element(&mut self, id: ElementId, fields: &UpdateFields) {
        if fields.is_empty() || !ops::contains_id(&self.tree, id) {
            return;
        }
        self.tree = ops::update(std::mem::take(&mut self.tree), id, fields);
        self.publish();
    }

    /// Delete an element and its whole subtree. If the selection was
    /// inside the deleted subtree it is cleared.
    pub fn delete_element(&mut self, id: ElementId) {
        let (tree, detached) = ops::remove(std::mem::take(&mut self.tree), id);
        self.tree = tree;
        let Some(detached) = detached else {
            return;
        };
        if let Some(selected) = self.selection
            && ops::contains_id(std::slice::from_ref(&detached.element), selected)
        {
            self.selection = None;
        }
        debug!(%id, subtree = detached.element.subtree_len(), "delete element");
        self.publish();
    }

    // --- persistence ---

    /// Serialize the current tree.
    pub fn save_layout(&self) -> PersistResult<String> {
        persist::save_layout(&self.tree)
    }

    /// Replace the tree with a stored layout. On any error the session
    /// is left untouched. On success id allocation resumes above the
    /// loaded ids and a stale selection is cleared.
    pub fn load_layout(&mut self, json: &str) -> PersistResult<()> {
        let tree = persist::load_layout(json)?;
        info!(roots = tree.len(), "layout loaded");
        self.ids.bump_above(persist::max_id(&tree));
        self.tree = tree;
        if let Some(selected) = self.selection
            && !ops::contains_id(&self.tree, selected)
        {
            self.selection = None;
        }
        self.publish();
        Ok(())
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_three() -> EditorSession {
        let mut s = EditorSession::new();
        s.insert_new(ElementKind::Heading, None, 0).unwrap();
        s.insert_new(ElementKind::Text, None, 1).unwrap();
        s.insert_new(ElementKind::Row, None, 2).unwrap();
        s
    }

    // --- ids ---

    #[test]
    fn allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_id(), ElementId(1));
        assert_eq!(ids.next_id(), ElementId(2));
        ids.bump_above(10);
        assert_eq!(ids.next_id(), ElementId(11));
        ids.bump_above(5);
        assert_eq!(ids.next_id(), ElementId(12));
    }

    #[test]
    fn with_tree_resumes_above_loaded_ids() {
        let tree = vec![Element::new(ElementId(40), ElementKind::Text)];
        let mut s = EditorSession::with_tree(tree);
        let id = s.insert_new(ElementKind::Button, None, 0).unwrap();
        assert_eq!(id, ElementId(41));
    }

    // --- selection ---

    #[test]
    fn select_stale_id_is_ignored() {
        let mut s = session_with_three();
        s.select(ElementId(2));
        s.select(ElementId(99));
        assert_eq!(s.selection(), Some(ElementId(2)));
    }

    #[test]
    fn deleting_selected_clears_selection() {
        let mut s = session_with_three();
        s.select(ElementId(2));
        s.delete_element(ElementId(2));
        assert_eq!(s.selection(), None);
        assert_eq!(s.tree().len(), 2);
    }

    #[test]
    fn deleting_ancestor_of_selected_clears_selection() {
        let mut s = session_with_three();
        let child = s.insert_new(ElementKind::Button, Some(ElementId(3)), 0).unwrap();
        s.select(child);
        s.delete_element(ElementId(3));
        assert_eq!(s.selection(), None);
    }

    #[test]
    fn deleting_unrelated_keeps_selection() {
        let mut s = session_with_three();
        s.select(ElementId(1));
        s.delete_element(ElementId(2));
        assert_eq!(s.selection(), Some(ElementId(1)));
    }

    // --- mutation ---

    #[test]
    fn insert_new_uses_kind_defaults() {
        let mut s = EditorSession::new();
        let id = s.insert_new(ElementKind::Heading, None, 0).unwrap();
        let el = s.find(id).unwrap();
        assert_eq!(el.content, "Heading");
        assert_eq!(el.style.get("width").map(String::as_str), Some("100%"));
    }

    #[test]
    fn rejected_move_does_not_publish() {
        let mut s = session_with_three();
        let seen = std::rc::Rc::new(std::cell::Cell::new(0u32));
        let counter = seen.clone();
        s.subscribe(move |_, _| counter.set(counter.get() + 1));

        let outcome = s.move_element(ElementId(3), 0, Some(ElementId(3)));
        assert!(!outcome.is_moved());
        assert_eq!(seen.get(), 0);

        let outcome = s.move_element(ElementId(1), 0, Some(ElementId(2)));
        assert_eq!(outcome, MoveOutcome::TargetMissing);
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn observers_see_applied_mutations() {
        let mut s = EditorSession::new();
        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = log.clone();
        s.subscribe(move |tree, selection| {
            sink.borrow_mut().push((tree.len(), selection));
        });

        let id = s.insert_new(ElementKind::Text, None, 0).unwrap();
        s.select(id);
        s.delete_element(id);

        assert_eq!(
            log.borrow().as_slice(),
            &[(1, None), (1, Some(id)), (0, None)]
        );
    }

    #[test]
    fn update_empty_fields_is_a_no_op() {
        let mut s = session_with_three();
        let seen = std::rc::Rc::new(std::cell::Cell::new(0u32));
        let counter = seen.clone();
        s.subscribe(move |_, _| counter.set(counter.get() + 1));

        s.update_element(ElementId(1), &UpdateFields::default());
        assert_eq!(seen.get(), 0);

        s.update_element(ElementId(1), &UpdateFields::content("Hi"));
        assert_eq!(seen.get(), 1);
        assert_eq!(s.find(ElementId(1)).unwrap().content, "Hi");
    }

    // --- persistence ---

    #[test]
    fn failed_load_leaves_session_untouched() {
        let mut s = session_with_three();
        s.select(ElementId(1));
        let err = s.load_layout("not json");
        assert!(err.is_err());
        assert_eq!(s.tree().len(), 3);
        assert_eq!(s.selection(), Some(ElementId(1)));
    }

    #[test]
    fn load_clears_stale_selection_and_bumps_ids() {
        let mut s = session_with_three();
        s.select(ElementId(2));

        let other = vec![Element::new(ElementId(7), ElementKind::Text)];
        let json = persist::save_layout(&other).unwrap();
        s.load_layout(&json).unwrap();

        assert_eq!(s.selection(), None);
        let fresh = s.insert_new(ElementKind::Button, None, 1).unwrap();
        assert_eq!(fresh, ElementId(8));
    }
}
