use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;

use crate::domain::ExpenseRecord;
use crate::messages::Messages;
use crate::store::RecordStore;

use super::datetime::format_entry_time;
use super::validation::{
    validate_and_record, FormField, RawExpenseFields, ValidationError, ValidationErrorKind,
};

/// Lifecycle of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Valid,
    Invalid,
}

/// Pending revert of the submit control's success acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SuccessFlash {
    revert_at: Instant,
}

/// What the submit control should currently display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitControl {
    Ready(&'static str),
    Acknowledged(&'static str),
}

impl SubmitControl {
    pub fn text(self) -> &'static str {
        match self {
            SubmitControl::Ready(text) | SubmitControl::Acknowledged(text) => text,
        }
    }
}

/// Owns the form contents and the per-field UI state (error markers, focus,
/// alert text, success acknowledgement) around validation.
#[derive(Debug)]
pub struct FormController {
    fields: RawExpenseFields,
    state: FormState,
    flagged: BTreeSet<FormField>,
    focus: Option<FormField>,
    alert: Option<&'static str>,
    flash: Option<SuccessFlash>,
    flash_duration: Duration,
    messages: &'static Messages,
}

impl FormController {
    pub fn new(messages: &'static Messages, flash_duration: Duration) -> Self {
        Self {
            fields: RawExpenseFields::default(),
            state: FormState::Idle,
            flagged: BTreeSet::new(),
            focus: None,
            alert: None,
            flash: None,
            flash_duration,
            messages,
        }
    }

    pub fn fields(&self) -> &RawExpenseFields {
        &self.fields
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn focus(&self) -> Option<FormField> {
        self.focus
    }

    /// Message shown for a failed date-format check, if any.
    pub fn alert(&self) -> Option<&'static str> {
        self.alert
    }

    pub fn is_flagged(&self, field: FormField) -> bool {
        self.flagged.contains(&field)
    }

    pub fn flagged(&self) -> impl Iterator<Item = FormField> + '_ {
        self.flagged.iter().copied()
    }

    /// Input handler: stores the new value and clears that field's marker.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.fields.set(field, value);
        self.clear_error(field);
    }

    pub fn clear_error(&mut self, field: FormField) {
        self.flagged.remove(&field);
        if self.state == FormState::Invalid && self.flagged.is_empty() {
            self.state = FormState::Idle;
            self.alert = None;
        }
    }

    /// Fills the date field with `now` in entry-time format.
    pub fn fill_now(&mut self, now: NaiveDateTime) {
        self.set_field(FormField::DateTime, format_entry_time(now));
    }

    /// Validates the current contents and commits them to `store`.
    ///
    /// On failure the offending field is flagged and focused and nothing is
    /// stored. On success the form is cleared and the submit control shows
    /// its acknowledgement until `now + flash_duration`, replacing any
    /// acknowledgement still pending.
    pub fn submit(
        &mut self,
        store: &mut RecordStore,
        now: Instant,
    ) -> Result<ExpenseRecord, ValidationError> {
        self.state = FormState::Validating;
        self.flagged.clear();
        self.alert = None;

        match validate_and_record(&self.fields, store) {
            Ok(record) => {
                self.fields = RawExpenseFields::default();
                self.focus = None;
                self.flash = Some(SuccessFlash {
                    revert_at: now + self.flash_duration,
                });
                self.state = FormState::Valid;
                Ok(record)
            }
            Err(err) => {
                self.flagged.insert(err.field);
                self.focus = Some(err.field);
                if err.kind == ValidationErrorKind::InvalidDateFormat {
                    self.alert = Some(self.messages.invalid_date_format);
                }
                self.state = FormState::Invalid;
                Err(err)
            }
        }
    }

    /// Reverts an expired acknowledgement. Returns `true` when it did.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.flash {
            Some(flash) if now >= flash.revert_at => {
                self.flash = None;
                if self.state == FormState::Valid {
                    self.state = FormState::Idle;
                }
                tracing::trace!("submit acknowledgement reverted");
                true
            }
            _ => false,
        }
    }

    pub fn submit_control(&self) -> SubmitControl {
        match self.flash {
            Some(_) => SubmitControl::Acknowledged(self.messages.submit_success),
            None => SubmitControl::Ready(self.messages.submit_label),
        }
    }

    /// When the pending acknowledgement reverts, if one is showing.
    pub fn revert_deadline(&self) -> Option<Instant> {
        self.flash.map(|flash| flash.revert_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> FormController {
        FormController::new(&Messages::EN_US, Duration::from_millis(2000))
    }

    fn fill_valid(form: &mut FormController) {
        form.set_field(FormField::DateTime, "2024-03-15 : 2pm");
        form.set_field(FormField::Category, "Food");
        form.set_field(FormField::Item, "Lunch");
        form.set_field(FormField::Amount, "12.6");
    }

    #[test]
    fn failure_flags_and_focuses_without_storing() {
        let mut form = controller();
        let mut store = RecordStore::new();
        form.set_field(FormField::DateTime, "2024-03-15 : 2pm");

        let err = form.submit(&mut store, Instant::now()).unwrap_err();

        assert_eq!(err.field, FormField::Category);
        assert_eq!(form.state(), FormState::Invalid);
        assert!(form.is_flagged(FormField::Category));
        assert_eq!(form.focus(), Some(FormField::Category));
        assert_eq!(form.alert(), None);
        assert!(store.is_empty());
        assert_eq!(form.fields().date_time, "2024-03-15 : 2pm");
    }

    #[test]
    fn date_format_failure_sets_alert() {
        let mut form = controller();
        let mut store = RecordStore::new();
        fill_valid(&mut form);
        form.set_field(FormField::DateTime, "2024-3-15 2pm");

        form.submit(&mut store, Instant::now()).unwrap_err();

        assert_eq!(form.alert(), Some(Messages::EN_US.invalid_date_format));
        assert!(form.is_flagged(FormField::DateTime));
    }

    #[test]
    fn editing_a_flagged_field_clears_its_marker() {
        let mut form = controller();
        let mut store = RecordStore::new();
        form.submit(&mut store, Instant::now()).unwrap_err();
        assert!(form.is_flagged(FormField::DateTime));

        form.set_field(FormField::DateTime, "2");

        assert!(!form.is_flagged(FormField::DateTime));
        assert_eq!(form.state(), FormState::Idle);
    }

    #[test]
    fn success_clears_form_and_acknowledges() {
        let mut form = controller();
        let mut store = RecordStore::new();
        fill_valid(&mut form);
        let start = Instant::now();

        let record = form.submit(&mut store, start).unwrap();

        assert_eq!(record.amount, 13);
        assert_eq!(store.len(), 1);
        assert_eq!(form.fields(), &RawExpenseFields::default());
        assert_eq!(form.state(), FormState::Valid);
        assert_eq!(
            form.submit_control(),
            SubmitControl::Acknowledged(Messages::EN_US.submit_success)
        );

        assert!(!form.poll(start + Duration::from_millis(1999)));
        assert!(form.poll(start + Duration::from_millis(2000)));
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.submit_control().text(), "Record Expense");
    }

    #[test]
    fn second_success_replaces_pending_revert() {
        let mut form = controller();
        let mut store = RecordStore::new();
        let start = Instant::now();
        fill_valid(&mut form);
        form.submit(&mut store, start).unwrap();

        let later = start + Duration::from_millis(1500);
        fill_valid(&mut form);
        form.submit(&mut store, later).unwrap();

        assert_eq!(form.revert_deadline(), Some(later + Duration::from_millis(2000)));
        assert!(!form.poll(start + Duration::from_millis(2000)));
        assert!(form.poll(later + Duration::from_millis(2000)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn failed_submit_keeps_pending_acknowledgement() {
        let mut form = controller();
        let mut store = RecordStore::new();
        let start = Instant::now();
        fill_valid(&mut form);
        form.submit(&mut store, start).unwrap();

        form.submit(&mut store, start).unwrap_err();

        assert!(form.revert_deadline().is_some());
        assert_eq!(store.len(), 1);
    }
}
