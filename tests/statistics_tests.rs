use chrono::{TimeZone, Utc};
use expense_widget::{
    currency::CurrencyFormatter,
    domain::{Category, ExpenseDraft},
    messages::Messages,
    stats::{aggregate, statistics_view},
    store::RecordStore,
};

fn draft(category: Category, amount: u64) -> ExpenseDraft {
    ExpenseDraft {
        date_time: "2024-03-15 : 2pm".into(),
        category,
        item: "Item".into(),
        amount,
        description: None,
    }
}

fn store_with(entries: &[(Category, u64)]) -> RecordStore {
    let mut store = RecordStore::new();
    let created_at = Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap();
    for (category, amount) in entries {
        store.record_at(draft(*category, *amount), created_at);
    }
    store
}

#[test]
fn totals_sum_to_grand_total() {
    let store = store_with(&[
        (Category::Travel, 40),
        (Category::Food, 10),
        (Category::Travel, 5),
        (Category::Utility, 99),
        (Category::Food, 1),
    ]);

    let result = aggregate(store.all());

    assert_eq!(result.totals.get(Category::Travel), 45);
    assert_eq!(result.totals.get(Category::Food), 11);
    assert_eq!(result.totals.get(Category::Entertain), 0);
    assert_eq!(result.totals.sum(), result.grand_total);
    assert_eq!(result.grand_total, 155);
}

#[test]
fn empty_store_yields_empty_aggregate() {
    let store = RecordStore::new();
    let result = aggregate(store.all());
    assert!(result.totals.is_empty());
    assert_eq!(result.grand_total, 0);

    let view = statistics_view(&result, &CurrencyFormatter::default(), &Messages::EN_US);
    assert!(view.rows.is_empty());
    assert_eq!(view.grand_total_formatted, "$0");
    assert_eq!(view.empty_state.as_deref(), Some("No expenses recorded yet"));
}

#[test]
fn only_categories_with_records_appear() {
    let store = store_with(&[(Category::Utility, 3), (Category::Food, 4)]);
    let result = aggregate(store.all());

    let seen: Vec<Category> = result.totals.iter().map(|entry| entry.category).collect();
    assert_eq!(seen, vec![Category::Utility, Category::Food]);
}

#[test]
fn table_rows_follow_canonical_category_order() {
    let store = store_with(&[
        (Category::Utility, 3),
        (Category::Travel, 2000),
        (Category::Food, 4),
    ]);
    let view = statistics_view(
        &aggregate(store.all()),
        &CurrencyFormatter::default(),
        &Messages::EN_US,
    );

    let rows: Vec<(Category, &str)> = view
        .rows
        .iter()
        .map(|row| (row.category, row.formatted_amount.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (Category::Food, "$4"),
            (Category::Travel, "$2,000"),
            (Category::Utility, "$3"),
        ]
    );
    assert_eq!(view.grand_total_formatted, "$2,007");
    assert!(view.empty_state.is_none());
}

#[test]
fn record_ids_increase_within_one_millisecond() {
    let store = store_with(&[(Category::Food, 1), (Category::Food, 2), (Category::Food, 3)]);
    let ids: Vec<u64> = store.all().iter().map(|record| record.id.0).collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}
