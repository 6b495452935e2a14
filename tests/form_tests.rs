use chrono::NaiveDate;
use expense_widget::{
    domain::Category,
    form::{
        format_entry_time, is_valid_entry_time, validate, validate_and_record, FormField,
        RawExpenseFields, ValidationErrorKind,
    },
    store::RecordStore,
};

fn filled(date_time: &str, amount: &str) -> RawExpenseFields {
    RawExpenseFields {
        date_time: date_time.into(),
        category: "Food".into(),
        item: "Lunch".into(),
        amount: amount.into(),
        description: String::new(),
    }
}

#[test]
fn accepted_entry_times() {
    for input in [
        "2024-03-15 : 2:30pm",
        "2024-03-15 : 11am",
        "2024-03-15:9AM",
        "2024-03-15   :   12:05Pm",
    ] {
        assert!(is_valid_entry_time(input), "{input} should be accepted");
    }
}

#[test]
fn rejected_entry_times() {
    for input in [
        "2024-13-1",
        "2024-03-15 2pm",
        "2024-03-15 : 2 pm",
        "2024-03-15 : 123pm",
        "2024-03-15 : 2:3pm",
        "24-03-15 : 2pm",
        "2024-03-15 : 14:00",
    ] {
        assert!(!is_valid_entry_time(input), "{input} should be rejected");
    }
}

#[test]
fn grammar_checks_shape_not_calendar() {
    assert!(is_valid_entry_time("2024-13-45 : 99pm"));
}

#[test]
fn malformed_date_is_reported_on_date_field() {
    let err = validate(&filled("2024-13-1", "10")).unwrap_err();
    assert_eq!(err.field, FormField::DateTime);
    assert_eq!(err.kind, ValidationErrorKind::InvalidDateFormat);
}

#[test]
fn non_positive_or_non_numeric_amounts_are_rejected() {
    for amount in ["0", "-5", "abc", "NaN", "inf", "0.2"] {
        let err = validate(&filled("2024-03-15 : 2pm", amount)).unwrap_err();
        assert_eq!(err.field, FormField::Amount, "amount {amount}");
        assert_eq!(err.kind, ValidationErrorKind::InvalidAmount, "amount {amount}");
    }
}

#[test]
fn amount_is_checked_before_date_grammar() {
    let err = validate(&filled("not a date", "-1")).unwrap_err();
    assert_eq!(err.field, FormField::Amount);
}

#[test]
fn first_missing_field_wins() {
    let raw = RawExpenseFields {
        item: "Lunch".into(),
        ..RawExpenseFields::default()
    };
    let err = validate(&raw).unwrap_err();
    assert_eq!(err.field, FormField::DateTime);
    assert_eq!(err.kind, ValidationErrorKind::MissingField);

    let raw = RawExpenseFields {
        date_time: "2024-03-15 : 2pm".into(),
        category: "Groceries".into(),
        ..RawExpenseFields::default()
    };
    assert_eq!(validate(&raw).unwrap_err().field, FormField::Category);
}

#[test]
fn valid_input_is_rounded_and_trimmed() {
    let mut raw = filled("2024-03-15 : 2:30pm", "12.6");
    raw.item = "  Lunch ".into();
    raw.description = "   ".into();

    let draft = validate(&raw).unwrap();

    assert_eq!(draft.category, Category::Food);
    assert_eq!(draft.item, "Lunch");
    assert_eq!(draft.amount, 13);
    assert_eq!(draft.description, None);
}

#[test]
fn rejected_submission_leaves_store_untouched() {
    let mut store = RecordStore::new();
    assert!(validate_and_record(&filled("2024-03-15", "10"), &mut store).is_err());
    assert!(store.is_empty());

    let record = validate_and_record(&filled("2024-03-15 : 11am", "10"), &mut store).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.all()[0], record);
}

#[test]
fn now_fill_produces_accepted_text() {
    let afternoon = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    let midnight = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    assert_eq!(format_entry_time(afternoon), "2024-03-15 : 2:30pm");
    assert_eq!(format_entry_time(midnight), "2024-03-15 : 12am");
    assert!(is_valid_entry_time(&format_entry_time(afternoon)));
}

#[test]
fn blank_item_is_missing_and_nothing_is_stored() {
    let mut raw = filled("2024-03-15 : 2pm", "10");
    raw.item = "   ".into();
    let mut store = RecordStore::new();

    let err = validate_and_record(&raw, &mut store).unwrap_err();

    assert_eq!(err.field, FormField::Item);
    assert_eq!(err.kind, ValidationErrorKind::MissingField);
    assert!(store.is_empty());
}
