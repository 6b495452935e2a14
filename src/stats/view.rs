use crate::currency::AmountFormatter;
use crate::domain::Category;
use crate::messages::Messages;

use super::aggregate::Aggregate;

/// One line of the statistics table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsRow {
    pub category: Category,
    pub formatted_amount: String,
}

/// Presentation-ready statistics table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsView {
    pub rows: Vec<StatisticsRow>,
    pub grand_total_formatted: String,
    /// Set when there is nothing to show; hosts display it instead of rows.
    pub empty_state: Option<String>,
}

impl StatisticsView {
    pub fn is_empty(&self) -> bool {
        self.empty_state.is_some()
    }
}

/// Builds the table in canonical category order, omitting categories whose
/// total is zero. The grand total is always present.
pub fn statistics_view(
    aggregate: &Aggregate,
    formatter: &dyn AmountFormatter,
    messages: &Messages,
) -> StatisticsView {
    if aggregate.is_empty() {
        return StatisticsView {
            rows: Vec::new(),
            grand_total_formatted: formatter.format_amount(0),
            empty_state: Some(messages.empty_statistics.to_string()),
        };
    }

    let rows = aggregate
        .totals
        .canonical()
        .map(|total| StatisticsRow {
            category: total.category,
            formatted_amount: formatter.format_amount(total.amount),
        })
        .collect();

    StatisticsView {
        rows,
        grand_total_formatted: formatter.format_amount(aggregate.grand_total),
        empty_state: None,
    }
}
