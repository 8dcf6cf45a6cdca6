use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque item identifier. Assigned by the store, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// Priority tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All tiers in picker order
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Capitalized label for display ("Low", "Medium", "High")
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid priority '{0}' (expected low, medium or high)")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// Reference to a user from the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub display_name: String,
}

impl UserRef {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        UserRef {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// A single checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Display label, never empty while the item is in a store
    pub text: String,
    pub is_checked: bool,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Item {
    /// A fresh, unchecked, medium-priority item with no assignee or date.
    pub(crate) fn new(id: ItemId, text: String) -> Self {
        Item {
            id,
            text,
            is_checked: false,
            priority: Priority::default(),
            assignee: None,
            due_date: None,
        }
    }
}

/// Item fields that open a picker when edited. Text editing is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Priority,
    Assignee,
    Date,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Priority => write!(f, "priority"),
            Field::Assignee => write!(f, "assignee"),
            Field::Date => write!(f, "due date"),
        }
    }
}

/// A value chosen in a field picker. `None` payloads clear the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Priority(Priority),
    Assignee(Option<UserRef>),
    DueDate(Option<NaiveDate>),
}

impl FieldValue {
    pub fn field(&self) -> Field {
        match self {
            FieldValue::Priority(_) => Field::Priority,
            FieldValue::Assignee(_) => Field::Assignee,
            FieldValue::DueDate(_) => Field::Date,
        }
    }
}
