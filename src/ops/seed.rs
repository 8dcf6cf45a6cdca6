use tracing::info;

use crate::lookup::UserDirectory;
use crate::model::config::SeedItem;
use crate::model::item::{ParsePriorityError, Priority};
use crate::ops::store::{ItemStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("items[{index}]: text cannot be empty")]
    EmptyText { index: usize },
    #[error("items[{index}]: {source}")]
    Priority {
        index: usize,
        source: ParsePriorityError,
    },
    #[error("items[{index}]: unknown assignee '{id}'")]
    UnknownAssignee { index: usize, id: String },
    #[error("items[{index}]: {source}")]
    Store { index: usize, source: StoreError },
}

/// Build the initial store from `[[items]]`, going through the regular
/// store operations so seeded items obey the same rules as added ones.
pub fn seed_store(items: &[SeedItem], directory: &dyn UserDirectory) -> Result<ItemStore, SeedError> {
    let mut store = ItemStore::new();
    for (index, seed) in items.iter().enumerate() {
        let id = store.add(&seed.text).map_err(|e| match e {
            StoreError::EmptyText => SeedError::EmptyText { index },
            source => SeedError::Store { index, source },
        })?;
        let wrap = |source| SeedError::Store { index, source };

        if seed.checked {
            store.toggle(id).map_err(wrap)?;
        }
        if let Some(tier) = &seed.priority {
            let priority: Priority = tier
                .parse()
                .map_err(|source| SeedError::Priority { index, source })?;
            store.set_priority(id, priority).map_err(wrap)?;
        }
        if let Some(user_id) = &seed.assignee {
            let user = directory
                .resolve(user_id)
                .ok_or_else(|| SeedError::UnknownAssignee {
                    index,
                    id: user_id.clone(),
                })?;
            store.set_assignee(id, Some(user)).map_err(wrap)?;
        }
        if seed.due.is_some() {
            store.set_due_date(id, seed.due).map_err(wrap)?;
        }
    }
    info!(items = store.len(), "checklist seeded");
    Ok(store)
}
