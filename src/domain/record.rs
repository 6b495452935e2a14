//! Expense records and the validated drafts they are created from.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Unique, monotonically increasing record identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field values that passed validation but have not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub date_time: String,
    pub category: Category,
    pub item: String,
    pub amount: u64,
    pub description: Option<String>,
}

/// A stored expense. Created once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: RecordId,
    /// Entry time exactly as typed, e.g. `2024-03-15 : 2:30pm`.
    pub date_time: String,
    pub category: Category,
    pub item: String,
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Insertion instant, kept for auditing only.
    pub created_at: DateTime<Utc>,
}

impl ExpenseRecord {
    pub fn from_draft(id: RecordId, draft: ExpenseDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            date_time: draft.date_time,
            category: draft.category,
            item: draft.item,
            amount: draft.amount,
            description: draft.description,
            created_at,
        }
    }
}
