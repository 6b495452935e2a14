//! Append-only, in-memory record store.

use chrono::{DateTime, Utc};

use crate::domain::{ExpenseDraft, ExpenseRecord, RecordId};

/// Ordered sequence of expense records for the lifetime of a session.
///
/// The store performs no validation; callers hand it drafts that already
/// passed the form rules.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<ExpenseRecord>,
    last_id: Option<RecordId>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fully formed record.
    pub fn append(&mut self, record: ExpenseRecord) {
        if self.last_id.map_or(true, |last| record.id > last) {
            self.last_id = Some(record.id);
        }
        self.records.push(record);
    }

    /// Records in insertion order.
    pub fn all(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stamps a draft with an id and creation time taken from the wall clock
    /// and appends it.
    pub fn record(&mut self, draft: ExpenseDraft) -> ExpenseRecord {
        self.record_at(draft, Utc::now())
    }

    /// Same as [`RecordStore::record`] with an explicit creation instant.
    pub fn record_at(&mut self, draft: ExpenseDraft, created_at: DateTime<Utc>) -> ExpenseRecord {
        let id = self.next_id(created_at);
        let record = ExpenseRecord::from_draft(id, draft, created_at);
        tracing::debug!(
            id = %record.id,
            category = %record.category,
            amount = record.amount,
            "expense recorded"
        );
        self.append(record.clone());
        record
    }

    /// Millisecond clock reading, bumped past the previous id when two
    /// records land in the same millisecond.
    fn next_id(&self, created_at: DateTime<Utc>) -> RecordId {
        let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);
        match self.last_id {
            Some(RecordId(last)) if millis <= last => RecordId(last + 1),
            _ => RecordId(millis),
        }
    }
}
