use std::fmt;

use thiserror::Error;

use crate::domain::{Category, ExpenseDraft, ExpenseRecord};
use crate::store::RecordStore;

use super::datetime::is_valid_entry_time;

/// Largest amount accepted after rounding; keeps running totals far from
/// integer overflow.
pub const MAX_AMOUNT: u64 = 1_000_000_000_000;

/// Identifies an input on the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    DateTime,
    Category,
    Item,
    Amount,
    Description,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::DateTime,
        FormField::Category,
        FormField::Item,
        FormField::Amount,
        FormField::Description,
    ];

    /// Short key used by text front-ends (`date`, `category`, ...).
    pub fn key(self) -> &'static str {
        match self {
            FormField::DateTime => "date",
            FormField::Category => "category",
            FormField::Item => "item",
            FormField::Amount => "amount",
            FormField::Description => "description",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::DateTime => "Date/Time",
            FormField::Category => "Category",
            FormField::Item => "Item",
            FormField::Amount => "Amount",
            FormField::Description => "Description",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        match key.as_str() {
            "date" | "datetime" | "date-time" => Some(FormField::DateTime),
            "category" => Some(FormField::Category),
            "item" => Some(FormField::Item),
            "amount" | "expense" => Some(FormField::Amount),
            "description" | "desc" => Some(FormField::Description),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    MissingField,
    /// Non-numeric, non-positive, or out of range.
    InvalidAmount,
    InvalidDateFormat,
}

/// First rule the input broke, and on which field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct ValidationError {
    pub field: FormField,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    fn new(field: FormField, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }

    fn missing(field: FormField) -> Self {
        Self::new(field, ValidationErrorKind::MissingField)
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ValidationErrorKind::MissingField => "missing value",
            ValidationErrorKind::InvalidAmount => "amount must be a number greater than zero",
            ValidationErrorKind::InvalidDateFormat => "expected YYYY-MM-DD : hh[am/pm]",
        };
        f.write_str(text)
    }
}

/// Form contents exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawExpenseFields {
    pub date_time: String,
    pub category: String,
    pub item: String,
    pub amount: String,
    pub description: String,
}

impl RawExpenseFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::DateTime => &self.date_time,
            FormField::Category => &self.category,
            FormField::Item => &self.item,
            FormField::Amount => &self.amount,
            FormField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::DateTime => &mut self.date_time,
            FormField::Category => &mut self.category,
            FormField::Item => &mut self.item,
            FormField::Amount => &mut self.amount,
            FormField::Description => &mut self.description,
        };
        *slot = value.into();
    }
}

/// Applies the form rules in order; the first failure wins.
///
/// Presence of date, category, item and amount is checked before the
/// amount's value, and the date grammar is checked last.
pub fn validate(raw: &RawExpenseFields) -> Result<ExpenseDraft, ValidationError> {
    let date_time = raw.date_time.trim();
    if date_time.is_empty() {
        return Err(ValidationError::missing(FormField::DateTime));
    }

    // An unrecognized value counts as no selection.
    let category: Category = raw
        .category
        .parse()
        .map_err(|_| ValidationError::missing(FormField::Category))?;

    let item = raw.item.trim();
    if item.is_empty() {
        return Err(ValidationError::missing(FormField::Item));
    }

    let amount = parse_amount(&raw.amount)?;

    if !is_valid_entry_time(date_time) {
        return Err(ValidationError::new(
            FormField::DateTime,
            ValidationErrorKind::InvalidDateFormat,
        ));
    }

    let description = raw.description.trim();
    Ok(ExpenseDraft {
        date_time: date_time.to_string(),
        category,
        item: item.to_string(),
        amount,
        description: (!description.is_empty()).then(|| description.to_string()),
    })
}

/// Validates and, only on success, appends the record to `store`.
pub fn validate_and_record(
    raw: &RawExpenseFields,
    store: &mut RecordStore,
) -> Result<ExpenseRecord, ValidationError> {
    let draft = validate(raw)?;
    Ok(store.record(draft))
}

/// Parses a positive amount and rounds it to the nearest whole unit.
fn parse_amount(input: &str) -> Result<u64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::missing(FormField::Amount));
    }
    let invalid = || ValidationError::new(FormField::Amount, ValidationErrorKind::InvalidAmount);
    let value: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }
    let rounded = value.round();
    if rounded < 1.0 || rounded > MAX_AMOUNT as f64 {
        return Err(invalid());
    }
    Ok(rounded as u64)
}
