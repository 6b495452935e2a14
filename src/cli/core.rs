//! Shell context, command dispatch and command handlers.

use std::{fs, io, path::PathBuf, time::Instant};

use chrono::Local;
use strsim::levenshtein;

use crate::{
    chart::SvgSurface,
    config::{ConfigManager, WidgetConfig},
    errors::WidgetError,
    form::{FormField, SubmitControl},
    session::{ExpenseSession, StatisticsSnapshot, ViewMode},
};

use super::output::{self, OutputPreferences};
use super::views;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Widget(#[from] WidgetError),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Widget(#[from] WidgetError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

pub(crate) struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
}

pub(crate) const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        usage: "help [command]",
        summary: "List commands or show usage for one",
    },
    CommandSpec {
        name: "tab",
        usage: "tab <expense|statistics>",
        summary: "Switch between the entry form and statistics",
    },
    CommandSpec {
        name: "set",
        usage: "set <date|category|item|amount|description> [value...]",
        summary: "Type a value into a form field",
    },
    CommandSpec {
        name: "now",
        usage: "now",
        summary: "Fill the date field with the current local time",
    },
    CommandSpec {
        name: "form",
        usage: "form",
        summary: "Show the entry form",
    },
    CommandSpec {
        name: "submit",
        usage: "submit",
        summary: "Validate the form and record the expense",
    },
    CommandSpec {
        name: "record",
        usage: "record",
        summary: "Alias for `submit`",
    },
    CommandSpec {
        name: "stats",
        usage: "stats",
        summary: "Show category totals and the chart legend",
    },
    CommandSpec {
        name: "chart",
        usage: "chart [svg-path]",
        summary: "Show chart wedges, or write the chart as SVG",
    },
    CommandSpec {
        name: "records",
        usage: "records [--json]",
        summary: "List recorded expenses",
    },
    CommandSpec {
        name: "config",
        usage: "config [locale|currency <value>]",
        summary: "Show or change saved preferences",
    },
    CommandSpec {
        name: "version",
        usage: "version",
        summary: "Show build information",
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        summary: "Leave the shell",
    },
    CommandSpec {
        name: "quit",
        usage: "quit",
        summary: "Alias for `exit`",
    },
];

/// Shared shell runtime state.
pub struct ShellContext {
    session: ExpenseSession,
    config: WidgetConfig,
    config_manager: ConfigManager,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain_mode: mode == CliMode::Script,
        });
        let config = config_manager.load()?;
        Ok(Self {
            session: ExpenseSession::new(&config),
            config,
            config_manager,
        })
    }

    pub fn session(&self) -> &ExpenseSession {
        &self.session
    }

    /// Current tab, plus the submit acknowledgement while it is showing.
    pub(crate) fn prompt(&self) -> String {
        let view = self.session.view_mode().key();
        match self.session.form().submit_control() {
            SubmitControl::Acknowledged(text) => format!("{view} ({text})> "),
            SubmitControl::Ready(_) => format!("{view}> "),
        }
    }

    /// Applies time-based form changes that came due since the last line.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        self.session.poll(now)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let result = match command {
            "help" => self.cmd_help(args),
            "tab" => self.cmd_tab(args),
            "set" => self.cmd_set(args),
            "now" => self.cmd_now(),
            "form" => self.cmd_form(),
            "submit" | "record" => self.cmd_submit(),
            "stats" => self.cmd_stats(),
            "chart" => self.cmd_chart(args),
            "records" => self.cmd_records(args),
            "config" => self.cmd_config(args),
            "version" => self.cmd_version(),
            "exit" | "quit" => Err(CommandError::ExitRequested),
            _ => {
                self.suggest_command(raw);
                Ok(())
            }
        };

        match result {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = COMMANDS
            .iter()
            .map(|spec| (levenshtein(spec.name, &input.to_lowercase()), spec.name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }

    fn cmd_help(&self, args: &[&str]) -> CommandResult {
        if let Some(name) = args.first() {
            let spec = COMMANDS
                .iter()
                .find(|spec| spec.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!("no help for unknown command `{name}`"))
                })?;
            output::plain(format!("usage: {}\n  {}", spec.usage, spec.summary));
            return Ok(());
        }
        output::section("Commands");
        let width = COMMANDS.iter().map(|spec| spec.usage.len()).max().unwrap_or(0);
        for spec in COMMANDS {
            output::plain(format!("  {:<width$}  {}", spec.usage, spec.summary));
        }
        Ok(())
    }

    fn cmd_tab(&mut self, args: &[&str]) -> CommandResult {
        let mode = args
            .first()
            .and_then(|key| ViewMode::from_key(key))
            .ok_or_else(|| {
                CommandError::InvalidArguments("usage: tab <expense|statistics>".into())
            })?;
        match self.session.switch_view(mode) {
            Some(snapshot) => self.print_snapshot(&snapshot),
            None => output::plain(views::form_view(self.session.form())),
        }
        Ok(())
    }

    fn cmd_set(&mut self, args: &[&str]) -> CommandResult {
        let (key, value) = args.split_first().ok_or_else(|| {
            CommandError::InvalidArguments(
                "usage: set <date|category|item|amount|description> [value...]".into(),
            )
        })?;
        let field = FormField::from_key(key).ok_or_else(|| {
            CommandError::InvalidArguments(format!("unknown form field `{key}`"))
        })?;
        self.session.set_field(field, value.join(" "));
        Ok(())
    }

    fn cmd_now(&mut self) -> CommandResult {
        self.session.fill_now(Local::now().naive_local());
        output::info(format!(
            "{}: {}",
            FormField::DateTime,
            self.session.form().fields().date_time
        ));
        Ok(())
    }

    fn cmd_form(&self) -> CommandResult {
        output::plain(views::form_view(self.session.form()));
        Ok(())
    }

    fn cmd_submit(&mut self) -> CommandResult {
        match self.session.submit(Instant::now()) {
            Ok(submission) => {
                let record = &submission.record;
                output::success(self.session.messages().submit_success);
                output::info(format!(
                    "#{} {} {} {} ({})",
                    record.id,
                    record.category,
                    record.item,
                    self.session.format_amount(record.amount),
                    record.date_time
                ));
                if let Some(snapshot) = submission.refreshed {
                    self.print_snapshot(&snapshot);
                }
            }
            Err(_) => {
                // Markers on the form are the only feedback, except for
                // the date format which also gets a message.
                if let Some(alert) = self.session.form().alert() {
                    output::error(alert);
                }
                output::plain(views::form_view(self.session.form()));
            }
        }
        Ok(())
    }

    fn cmd_stats(&self) -> CommandResult {
        self.print_snapshot(&self.session.snapshot());
        Ok(())
    }

    fn cmd_chart(&self, args: &[&str]) -> CommandResult {
        let Some(path) = args.first() else {
            self.print_legend();
            return Ok(());
        };
        let path = PathBuf::from(path);
        let renderer = self.session.chart_renderer();
        let mut surface = SvgSurface::new(renderer.geometry.width, renderer.geometry.height);
        self.session.render_chart_to(&mut surface);
        fs::write(&path, surface.finish())?;
        output::success(format!("Chart written to {}", path.display()));
        Ok(())
    }

    fn cmd_records(&self, args: &[&str]) -> CommandResult {
        let records = self.session.records();
        match args.first().copied() {
            Some("--json") => {
                output::plain(serde_json::to_string_pretty(records)?);
            }
            Some(other) => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `{other}` (expected --json)"
                )));
            }
            None if records.is_empty() => {
                output::info(self.session.messages().empty_statistics);
            }
            None => {
                output::plain(views::records_table(records, |amount| {
                    self.session.format_amount(amount)
                }));
            }
        }
        Ok(())
    }

    fn cmd_config(&mut self, args: &[&str]) -> CommandResult {
        match args {
            [] => {
                output::info(format!("Config file: {}", self.config_manager.path().display()));
                output::plain(serde_json::to_string_pretty(&self.config)?);
            }
            ["locale", value] => {
                self.config.locale = value.to_string();
                self.persist_config()?;
            }
            ["currency", value] => {
                self.config.currency = value.to_uppercase();
                self.persist_config()?;
            }
            _ => {
                return Err(CommandError::InvalidArguments(
                    "usage: config [locale|currency <value>]".into(),
                ));
            }
        }
        Ok(())
    }

    fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        output::success("Preferences saved; they apply to the next session.");
        Ok(())
    }

    fn cmd_version(&self) -> CommandResult {
        output::plain(format!(
            "expense_widget {} ({} {}) built {} for {} [{}] with {}",
            env!("CARGO_PKG_VERSION"),
            env!("EXPENSE_WIDGET_BUILD_HASH"),
            env!("EXPENSE_WIDGET_BUILD_STATUS"),
            env!("EXPENSE_WIDGET_BUILD_TIMESTAMP"),
            env!("EXPENSE_WIDGET_BUILD_TARGET"),
            env!("EXPENSE_WIDGET_BUILD_PROFILE"),
            env!("EXPENSE_WIDGET_BUILD_RUSTC"),
        ));
        Ok(())
    }

    fn print_snapshot(&self, snapshot: &StatisticsSnapshot) {
        output::section("Statistics");
        output::plain(views::statistics_table(&snapshot.view));
        if !snapshot.view.is_empty() {
            self.print_legend();
        }
    }

    fn print_legend(&self) {
        let wedges = self.session.wedges();
        if wedges.is_empty() {
            output::info(self.session.messages().empty_statistics);
            return;
        }
        output::plain(views::chart_legend(
            &wedges,
            &self.session.chart_renderer().palette,
            |amount| self.session.format_amount(amount),
        ));
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    config_manager: ConfigManager,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_config_manager(CliMode::Script, config_manager)?;
    for line in lines {
        if crate::cli::shell::run_line(&mut app, line) == LoopControl::Exit {
            break;
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::form::FormState;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(dir.path().join("config.json"))
    }

    #[test]
    fn set_and_submit_records_expense() {
        let dir = TempDir::new().unwrap();
        let app = process_script(
            manager(&dir),
            &[
                "set date 2024-03-15 : 2pm",
                "set category Food",
                "set item \"Team lunch\"",
                "set amount 12.6",
                "submit",
            ],
        )
        .unwrap();

        let records = app.session().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date_time, "2024-03-15 : 2pm");
        assert_eq!(records[0].item, "Team lunch");
        assert_eq!(records[0].category, Category::Food);
        assert_eq!(records[0].amount, 13);
    }

    #[test]
    fn failed_submit_flags_field() {
        let dir = TempDir::new().unwrap();
        let app = process_script(manager(&dir), &["set date 2024-03-15 : 2pm", "submit"]).unwrap();
        assert!(app.session().records().is_empty());
        assert_eq!(app.session().form().state(), FormState::Invalid);
        assert!(app.session().form().is_flagged(FormField::Category));
    }

    #[test]
    fn prompt_shows_acknowledgement_until_tick_reverts_it() {
        let dir = TempDir::new().unwrap();
        let mut app = process_script(
            manager(&dir),
            &[
                "set date 2024-03-15 : 2pm",
                "set category Travel",
                "set item Taxi",
                "set amount 20",
                "submit",
            ],
        )
        .unwrap();
        assert_eq!(app.prompt(), "expense (Expense recorded successfully!)> ");

        assert!(!app.tick(Instant::now()));
        assert!(app.tick(Instant::now() + std::time::Duration::from_secs(3)));
        assert_eq!(app.prompt(), "expense> ");
    }

    #[test]
    fn exit_stops_processing() {
        let dir = TempDir::new().unwrap();
        let app = process_script(manager(&dir), &["tab statistics", "exit", "tab expense"]).unwrap();
        assert_eq!(app.session().view_mode(), ViewMode::Statistics);
    }

    #[test]
    fn unknown_commands_and_bad_arguments_do_not_abort() {
        let dir = TempDir::new().unwrap();
        let app = process_script(
            manager(&dir),
            &["sumbit", "set nope value", "tab sideways", "now"],
        )
        .unwrap();
        assert!(!app.session().form().fields().date_time.is_empty());
    }

    #[test]
    fn config_changes_are_saved() {
        let dir = TempDir::new().unwrap();
        process_script(manager(&dir), &["config locale zh-TW", "config currency twd"]).unwrap();
        let saved = manager(&dir).load().unwrap();
        assert_eq!(saved.locale, "zh-TW");
        assert_eq!(saved.currency, "TWD");
    }
}
