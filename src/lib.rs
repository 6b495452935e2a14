#![doc(test(attr(deny(warnings))))]

//! Expense Widget records dated, categorized expenses into an in-memory
//! session and aggregates them into per-category statistics rendered as a
//! table and a donut-style pie chart.

pub mod chart;
pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod form;
pub mod messages;
pub mod session;
pub mod stats;
pub mod store;
pub mod utils;

pub use domain::{Category, ExpenseRecord};
pub use session::{ExpenseSession, ViewMode};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Expense widget tracing initialized.");
    });
}
