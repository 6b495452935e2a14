//! Session context owning every piece of mutable widget state.

use std::time::Instant;

use chrono::NaiveDateTime;

use crate::chart::{ChartRenderer, DrawCommand, DrawingSurface, Wedge};
use crate::config::WidgetConfig;
use crate::currency::AmountFormatter;
use crate::domain::ExpenseRecord;
use crate::form::{FormController, FormField, RawExpenseFields, ValidationError};
use crate::messages::Messages;
use crate::stats::{aggregate, statistics_view, Aggregate, StatisticsView};
use crate::store::RecordStore;

/// Which tab of the widget is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Expense,
    Statistics,
}

impl ViewMode {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "expense" | "form" => Some(ViewMode::Expense),
            "statistics" | "stats" => Some(ViewMode::Statistics),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ViewMode::Expense => "expense",
            ViewMode::Statistics => "statistics",
        }
    }
}

/// Statistics table plus chart commands, computed together from one
/// aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSnapshot {
    pub view: StatisticsView,
    pub chart: Vec<DrawCommand>,
}

/// Result of a successful form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub record: ExpenseRecord,
    /// Refreshed statistics when the statistics view is active.
    pub refreshed: Option<StatisticsSnapshot>,
}

pub struct ExpenseSession {
    store: RecordStore,
    form: FormController,
    view: ViewMode,
    formatter: Box<dyn AmountFormatter>,
    chart: ChartRenderer,
    messages: &'static Messages,
}

impl ExpenseSession {
    pub fn new(config: &WidgetConfig) -> Self {
        Self::with_formatter(config, Box::new(config.formatter()))
    }

    /// Builds a session whose amounts are formatted by `formatter` instead of
    /// the configured currency formatter.
    pub fn with_formatter(config: &WidgetConfig, formatter: Box<dyn AmountFormatter>) -> Self {
        let messages = config.messages();
        Self {
            store: RecordStore::new(),
            form: FormController::new(messages, config.success_flash()),
            view: ViewMode::default(),
            formatter,
            chart: ChartRenderer::from_settings(&config.chart),
            messages,
        }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        self.store.all()
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    pub fn chart_renderer(&self) -> &ChartRenderer {
        &self.chart
    }

    /// Switches tabs; entering the statistics tab recomputes its contents.
    pub fn switch_view(&mut self, mode: ViewMode) -> Option<StatisticsSnapshot> {
        self.view = mode;
        tracing::debug!(view = mode.key(), "view switched");
        match mode {
            ViewMode::Statistics => Some(self.snapshot()),
            ViewMode::Expense => None,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn fill_now(&mut self, now: NaiveDateTime) {
        self.form.fill_now(now);
    }

    /// Submits the form through its controller.
    pub fn submit(&mut self, now: Instant) -> Result<Submission, ValidationError> {
        let record = self.form.submit(&mut self.store, now)?;
        let refreshed = match self.view {
            ViewMode::Statistics => Some(self.snapshot()),
            ViewMode::Expense => None,
        };
        Ok(Submission { record, refreshed })
    }

    /// Validates `raw` directly, bypassing the form's UI state.
    pub fn validate_and_record(
        &mut self,
        raw: &RawExpenseFields,
    ) -> Result<ExpenseRecord, ValidationError> {
        crate::form::validate_and_record(raw, &mut self.store)
    }

    /// Applies an expired success acknowledgement revert.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.form.poll(now)
    }

    pub fn aggregate(&self) -> Aggregate {
        aggregate(self.store.all())
    }

    pub fn statistics_view(&self) -> StatisticsView {
        statistics_view(&self.aggregate(), self.formatter.as_ref(), self.messages)
    }

    pub fn render_chart(&self) -> Vec<DrawCommand> {
        self.chart
            .render(&self.aggregate().totals, self.formatter.as_ref())
    }

    pub fn render_chart_to(&self, surface: &mut dyn DrawingSurface) {
        self.chart
            .render_to(&self.aggregate().totals, self.formatter.as_ref(), surface);
    }

    pub fn wedges(&self) -> Vec<Wedge> {
        crate::chart::wedges(&self.aggregate().totals)
    }

    pub fn format_amount(&self, amount: u64) -> String {
        self.formatter.format_amount(amount)
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        let aggregate = self.aggregate();
        StatisticsSnapshot {
            view: statistics_view(&aggregate, self.formatter.as_ref(), self.messages),
            chart: self.chart.render(&aggregate.totals, self.formatter.as_ref()),
        }
    }
}

impl Default for ExpenseSession {
    fn default() -> Self {
        Self::new(&WidgetConfig::default())
    }
}
