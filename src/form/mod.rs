//! Expense entry form: field rules, the entry-time grammar and the
//! controller state machine that commits records.

pub mod controller;
pub mod datetime;
pub mod validation;

pub use controller::{FormController, FormState, SubmitControl};
pub use datetime::{format_entry_time, is_valid_entry_time};
pub use validation::{
    validate, validate_and_record, FormField, RawExpenseFields, ValidationError,
    ValidationErrorKind,
};
