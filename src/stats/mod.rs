//! Aggregation of recorded expenses and the statistics table built from it.

pub mod aggregate;
pub mod view;

pub use aggregate::{aggregate, Aggregate, CategoryTotal, CategoryTotals};
pub use view::{statistics_view, StatisticsRow, StatisticsView};
