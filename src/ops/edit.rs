//! Per-item inline editing.
//!
//! Each item may have at most one picker field open (priority, assignee or
//! date) and, independently, a text edit with a local draft. States are kept
//! in a map keyed by item id, outside the store, and are dropped when the
//! item is removed. There is no "current item": several items may be
//! mid-edit at once, and text and field editing may coexist on one item.

use std::collections::HashMap;

use tracing::debug;

use crate::model::item::{Field, FieldValue, Item, ItemId};
use crate::ops::store::{ItemStore, StoreError};

/// Edit state for a single item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemEditState {
    /// Picker field currently open, if any
    pub editing_field: Option<Field>,
    /// Text edit mode, orthogonal to `editing_field`
    pub editing_text: bool,
    /// Uncommitted text buffer, seeded from the committed text
    pub draft: String,
}

impl ItemEditState {
    fn is_idle(&self) -> bool {
        self.editing_field.is_none() && !self.editing_text
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditController {
    states: HashMap<ItemId, ItemEditState>,
}

impl EditController {
    pub fn new() -> Self {
        EditController::default()
    }

    /// Edit state for an item. Items never touched by an edit have none.
    pub fn state(&self, id: ItemId) -> Option<&ItemEditState> {
        self.states.get(&id)
    }

    pub fn editing_field(&self, id: ItemId) -> Option<Field> {
        self.states.get(&id).and_then(|s| s.editing_field)
    }

    pub fn is_editing_text(&self, id: ItemId) -> bool {
        self.states.get(&id).is_some_and(|s| s.editing_text)
    }

    /// The draft while a text edit is open
    pub fn draft(&self, id: ItemId) -> Option<&str> {
        self.states
            .get(&id)
            .filter(|s| s.editing_text)
            .map(|s| s.draft.as_str())
    }

    /// Ids with any edit open, in no particular order
    pub fn editing_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.states
            .iter()
            .filter(|(_, s)| !s.is_idle())
            .map(|(id, _)| *id)
    }

    // -----------------------------------------------------------------------
    // Picker fields
    // -----------------------------------------------------------------------

    /// Open a picker field. Replaces any other field open on the same item.
    pub fn open_field(&mut self, store: &ItemStore, id: ItemId, field: Field) {
        if !store.contains(id) {
            return;
        }
        debug!(%id, %field, "field editor opened");
        self.states.entry(id).or_default().editing_field = Some(field);
    }

    /// Close the open picker without committing anything.
    pub fn dismiss_field(&mut self, id: ItemId) {
        if let Some(state) = self.states.get_mut(&id) {
            state.editing_field = None;
        }
        self.drop_if_idle(id);
    }

    /// Commit a picked value and close the picker in one step.
    pub fn select(
        &mut self,
        store: &mut ItemStore,
        id: ItemId,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        let result = match value {
            FieldValue::Priority(p) => store.set_priority(id, p),
            FieldValue::Assignee(user) => store.set_assignee(id, user),
            FieldValue::DueDate(date) => store.set_due_date(id, date),
        };
        match result {
            Ok(()) => self.dismiss_field(id),
            Err(StoreError::NotFound(_)) => {
                self.states.remove(&id);
            }
            Err(_) => {}
        }
        result
    }

    // -----------------------------------------------------------------------
    // Text editing
    // -----------------------------------------------------------------------

    /// Enter text edit mode with the draft seeded from the committed text.
    /// Re-entering an open edit keeps the existing draft.
    pub fn begin_text(&mut self, store: &ItemStore, id: ItemId) {
        let Some(item) = store.get(id) else {
            return;
        };
        let state = self.states.entry(id).or_default();
        if !state.editing_text {
            state.editing_text = true;
            state.draft = item.text.clone();
            debug!(%id, "text edit started");
        }
    }

    /// Replace the draft of an open text edit.
    pub fn update_draft(&mut self, id: ItemId, text: impl Into<String>) {
        if let Some(draft) = self.draft_mut(id) {
            *draft = text.into();
        }
    }

    /// Mutable access to the draft of an open text edit
    pub fn draft_mut(&mut self, id: ItemId) -> Option<&mut String> {
        self.states
            .get_mut(&id)
            .filter(|s| s.editing_text)
            .map(|s| &mut s.draft)
    }

    /// Commit the draft. An empty draft is rejected and the edit stays open.
    pub fn confirm_text(&mut self, store: &mut ItemStore, id: ItemId) -> Result<(), StoreError> {
        let draft = match self.states.get(&id) {
            Some(s) if s.editing_text => s.draft.clone(),
            _ => return Ok(()),
        };
        match store.set_text(id, &draft) {
            Ok(()) => {
                if let Some(state) = self.states.get_mut(&id) {
                    state.editing_text = false;
                    state.draft.clear();
                }
                self.drop_if_idle(id);
                Ok(())
            }
            Err(StoreError::NotFound(id)) => {
                self.states.remove(&id);
                Err(StoreError::NotFound(id))
            }
            Err(e) => Err(e),
        }
    }

    /// Discard the draft and leave text edit mode. The store is not touched.
    pub fn cancel_text(&mut self, store: &ItemStore, id: ItemId) {
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        state.draft = store.get(id).map(|i| i.text.clone()).unwrap_or_default();
        state.editing_text = false;
        debug!(%id, "text edit cancelled");
        self.drop_if_idle(id);
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Delete an item along with any edit in progress on it. Returns the
    /// removed item, `None` if the id was already gone.
    pub fn remove(&mut self, store: &mut ItemStore, id: ItemId) -> Option<Item> {
        self.states.remove(&id);
        store.remove(id)
    }

    /// Forget edit state for items that are no longer in the store.
    pub fn prune(&mut self, store: &ItemStore) {
        self.states.retain(|id, _| store.contains(*id));
    }

    fn drop_if_idle(&mut self, id: ItemId) {
        if self.states.get(&id).is_some_and(ItemEditState::is_idle) {
            self.states.remove(&id);
        }
    }
}
