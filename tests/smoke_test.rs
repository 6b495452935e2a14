use std::time::{Duration, Instant};

use expense_widget::{
    chart::DrawCommand, form::FormField, init, Category, ExpenseSession, ViewMode,
};

fn fill(session: &mut ExpenseSession, category: &str, amount: &str) {
    session.set_field(FormField::DateTime, "2024-03-15 : 2:30pm");
    session.set_field(FormField::Category, category);
    session.set_field(FormField::Item, "Something");
    session.set_field(FormField::Amount, amount);
}

#[test]
fn session_records_and_refreshes_statistics() {
    init();

    let mut session = ExpenseSession::default();
    assert_eq!(session.view_mode(), ViewMode::Expense);

    let start = Instant::now();
    fill(&mut session, "Food", "12.6");
    let submission = session.submit(start).unwrap();
    assert_eq!(submission.record.amount, 13);
    assert!(submission.refreshed.is_none());

    let snapshot = session.switch_view(ViewMode::Statistics).unwrap();
    assert_eq!(snapshot.view.rows.len(), 1);
    assert_eq!(snapshot.view.rows[0].category, Category::Food);
    assert_eq!(snapshot.view.rows[0].formatted_amount, "$13");
    assert_eq!(snapshot.view.grand_total_formatted, "$13");

    fill(&mut session, "travel", "7");
    let submission = session.submit(start + Duration::from_millis(10)).unwrap();
    let refreshed = submission.refreshed.expect("statistics view refreshes");
    assert_eq!(refreshed.view.grand_total_formatted, "$20");
    let wedge_count = refreshed
        .chart
        .iter()
        .filter(|command| matches!(command, DrawCommand::Wedge { .. }))
        .count();
    assert_eq!(wedge_count, 2);
}

#[test]
fn failed_submission_changes_nothing() {
    let mut session = ExpenseSession::default();
    fill(&mut session, "Food", "0");

    let err = session.submit(Instant::now()).unwrap_err();

    assert_eq!(err.field, FormField::Amount);
    assert!(session.records().is_empty());
    assert!(session.form().is_flagged(FormField::Amount));
    assert_eq!(session.aggregate().grand_total, 0);
}

#[test]
fn acknowledgement_reverts_after_flash() {
    let mut session = ExpenseSession::default();
    let start = Instant::now();
    fill(&mut session, "Utility", "40");
    session.submit(start).unwrap();
    assert_eq!(
        session.form().submit_control().text(),
        "Expense recorded successfully!"
    );

    assert!(session.poll(start + Duration::from_secs(2)));
    assert_eq!(session.form().submit_control().text(), "Record Expense");
}

#[test]
fn empty_statistics_show_message_and_cleared_chart() {
    let mut session = ExpenseSession::default();
    let snapshot = session.switch_view(ViewMode::Statistics).unwrap();

    assert_eq!(
        snapshot.view.empty_state.as_deref(),
        Some("No expenses recorded yet")
    );
    assert_eq!(snapshot.chart.len(), 1);
    assert!(matches!(snapshot.chart[0], DrawCommand::Clear { .. }));
}
