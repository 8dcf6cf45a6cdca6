use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::debug;

use crate::model::item::{Item, ItemId, Priority, UserRef};

/// Error type for store operations.
///
/// Neither variant is fatal: `EmptyText` means the mutation was rejected and
/// nothing changed, `NotFound` means the id was already gone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("text cannot be empty")]
    EmptyText,
    #[error("item not found: {0}")]
    NotFound(ItemId),
}

/// The authoritative, ordered item collection.
///
/// Iteration order is insertion order. Removal shifts later items up
/// without reordering them.
#[derive(Debug, Clone)]
pub struct ItemStore {
    items: IndexMap<ItemId, Item>,
    next_id: u64,
}

impl Default for ItemStore {
    fn default() -> Self {
        ItemStore::new()
    }
}

impl ItemStore {
    pub fn new() -> Self {
        ItemStore {
            items: IndexMap::new(),
            next_id: 1,
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a new item with default fields. Returns its id.
    pub fn add(&mut self, text: &str) -> Result<ItemId, StoreError> {
        let text = validated_text(text)?;
        let id = ItemId(self.next_id);
        self.next_id += 1;
        debug!(%id, text = %text, "item added");
        self.items.insert(id, Item::new(id, text));
        Ok(id)
    }

    /// Remove an item. Absent ids are a no-op.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let removed = self.items.shift_remove(&id);
        if removed.is_some() {
            debug!(%id, "item removed");
        }
        removed
    }

    /// Flip the completion flag. Returns the new value.
    pub fn toggle(&mut self, id: ItemId) -> Result<bool, StoreError> {
        let item = self.get_mut(id)?;
        item.is_checked = !item.is_checked;
        let checked = item.is_checked;
        debug!(%id, checked, "item toggled");
        Ok(checked)
    }

    /// Replace the text with its trimmed form. Empty input is rejected.
    pub fn set_text(&mut self, id: ItemId, text: &str) -> Result<(), StoreError> {
        let text = validated_text(text).inspect_err(|_| debug!(%id, "empty text rejected"))?;
        let item = self.get_mut(id)?;
        item.text = text;
        debug!(%id, text = %item.text, "item text set");
        Ok(())
    }

    pub fn set_priority(&mut self, id: ItemId, priority: Priority) -> Result<(), StoreError> {
        self.get_mut(id)?.priority = priority;
        debug!(%id, %priority, "item priority set");
        Ok(())
    }

    /// Replace the assignee. `None` unassigns.
    pub fn set_assignee(&mut self, id: ItemId, user: Option<UserRef>) -> Result<(), StoreError> {
        let item = self.get_mut(id)?;
        debug!(%id, assignee = ?user.as_ref().map(|u| &u.id), "item assignee set");
        item.assignee = user;
        Ok(())
    }

    /// Replace the due date. `None` clears it.
    pub fn set_due_date(&mut self, id: ItemId, date: Option<NaiveDate>) -> Result<(), StoreError> {
        self.get_mut(id)?.due_date = date;
        debug!(%id, due = ?date, "item due date set");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Index of the item in display order
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.get_index_of(&id)
    }

    /// Item at a display position
    pub fn get_index(&self, index: usize) -> Option<&Item> {
        self.items.get_index(index).map(|(_, item)| item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn checked_count(&self) -> usize {
        self.items.values().filter(|i| i.is_checked).count()
    }

    /// Fraction of checked items in `0.0..=1.0`; 0 for an empty list.
    pub fn progress(&self) -> f64 {
        if self.items.is_empty() {
            0.0
        } else {
            self.checked_count() as f64 / self.items.len() as f64
        }
    }

    /// Progress as a whole percentage, rounded down
    pub fn percent_complete(&self) -> u16 {
        let total = self.items.len();
        if total == 0 {
            0
        } else {
            (self.checked_count() * 100 / total) as u16
        }
    }

    fn get_mut(&mut self, id: ItemId) -> Result<&mut Item, StoreError> {
        self.items.get_mut(&id).ok_or(StoreError::NotFound(id))
    }
}

fn validated_text(text: &str) -> Result<String, StoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(StoreError::EmptyText)
    } else {
        Ok(trimmed.to_string())
    }
}
