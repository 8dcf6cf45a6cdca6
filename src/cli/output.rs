use serde::Serialize;

use crate::model::{Item, Priority};
use crate::ops::ItemStore;
use crate::ops::script::ScriptWarning;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct AssigneeJson {
    pub id: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct ItemJson {
    pub id: u64,
    pub text: String,
    pub checked: bool,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<AssigneeJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

#[derive(Serialize)]
pub struct ChecklistJson {
    pub title: String,
    pub items: Vec<ItemJson>,
    pub checked: usize,
    pub total: usize,
    /// Fraction checked, 0.0 when empty
    pub progress: f64,
    pub percent: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn item_to_json(item: &Item) -> ItemJson {
    ItemJson {
        id: item.id.0,
        text: item.text.clone(),
        checked: item.is_checked,
        priority: item.priority,
        assignee: item.assignee.as_ref().map(|u| AssigneeJson {
            id: u.id.clone(),
            name: u.display_name.clone(),
        }),
        due: item.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
    }
}

pub fn checklist_to_json(title: &str, store: &ItemStore, warnings: &[ScriptWarning]) -> ChecklistJson {
    ChecklistJson {
        title: title.to_string(),
        items: store.iter().map(item_to_json).collect(),
        checked: store.checked_count(),
        total: store.len(),
        progress: store.progress(),
        percent: store.percent_complete(),
        warnings: warnings.iter().map(ToString::to_string).collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single item as a one-line summary
pub fn format_item_line(item: &Item) -> String {
    let check = if item.is_checked { 'x' } else { ' ' };
    let mut line = format!("{:>3} [{}] {} [{}]", item.id.0, check, item.text, item.priority);
    if let Some(user) = &item.assignee {
        line.push_str(&format!(" @{}", user.id));
    }
    if let Some(date) = item.due_date {
        line.push_str(&format!(" due:{}", date.format("%Y-%m-%d")));
    }
    line
}

/// Format the progress header line
pub fn format_header(title: &str, store: &ItemStore) -> String {
    format!(
        "== {} ({}/{} done, {}%) ==",
        title,
        store.checked_count(),
        store.len(),
        store.percent_complete()
    )
}

/// Format the whole checklist: header, blank line, one line per item
pub fn format_checklist(title: &str, store: &ItemStore) -> Vec<String> {
    let mut lines = vec![format_header(title, store), String::new()];
    if store.is_empty() {
        lines.push("(no items)".to_string());
    }
    lines.extend(store.iter().map(format_item_line));
    lines
}
