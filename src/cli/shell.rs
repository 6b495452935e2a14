//! Line sources and the read-eval loop shared by interactive and script
//! mode.

use std::{
    io::{self, BufRead, Lines},
    time::Instant,
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext, COMMANDS};
use crate::cli::output;
use crate::domain::Category;
use crate::form::FormField;

/// Presence of this variable switches the shell to line-per-command stdin
/// mode with plain output.
pub const SCRIPT_MODE_ENV: &str = "EXPENSE_WIDGET_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_MODE_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => {
            output::info("Type `help` to list commands.");
            run_loop(&mut context, EditorInput::new()?)
        }
        CliMode::Script => run_loop(&mut context, ScriptInput::new(io::stdin().lock())),
    }
}

/// Where command lines come from.
trait LineSource {
    /// Next line, or `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError>;
}

struct ScriptInput<R> {
    lines: Lines<R>,
}

impl<R: BufRead> ScriptInput<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> LineSource for ScriptInput<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, CliError> {
        Ok(self.lines.next().transpose()?)
    }
}

struct EditorInput {
    editor: Editor<WidgetCompleter, DefaultHistory>,
}

impl EditorInput {
    fn new() -> Result<Self, CliError> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(WidgetCompleter));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        self.editor.add_history_entry(trimmed).ok();
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    output::info("Use `exit` to leave the shell.");
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn run_loop(context: &mut ShellContext, mut input: impl LineSource) -> Result<(), CliError> {
    loop {
        // An expired success acknowledgement reverts before the next prompt.
        context.tick(Instant::now());
        let Some(line) = input.read_line(&context.prompt())? else {
            break;
        };
        if run_line(context, &line) == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Splits one line shell-style and runs it, reporting failures in place.
pub(crate) fn run_line(context: &mut ShellContext, line: &str) -> LoopControl {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not parse `{}`: {err}", line.trim()));
            return LoopControl::Continue;
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match context.dispatch(&raw.to_lowercase(), raw, &args) {
        Ok(control) => control,
        Err(err) => {
            context.report_error(err);
            LoopControl::Continue
        }
    }
}

/// Tab completion for command names, form fields, categories and options.
#[derive(rustyline::Helper, rustyline::Hinter, rustyline::Highlighter, rustyline::Validator)]
struct WidgetCompleter;

impl Completer for WidgetCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = prefix[start..].to_ascii_lowercase();
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();

        let matches = candidates(&words)
            .into_iter()
            .filter(|name| name.to_ascii_lowercase().starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();
        Ok((start, matches))
    }
}

/// Completions for the word following `words`.
fn candidates(words: &[&str]) -> Vec<String> {
    let lowered: Vec<String> = words.iter().map(|word| word.to_ascii_lowercase()).collect();
    let owned = |names: &[&str]| -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    };

    match lowered.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] => COMMANDS.iter().map(|spec| spec.name.to_string()).collect(),
        ["set"] => FormField::ALL
            .iter()
            .map(|field| field.key().to_string())
            .collect(),
        ["set", field] if FormField::from_key(field) == Some(FormField::Category) => Category::ALL
            .iter()
            .map(|category| category.label().to_string())
            .collect(),
        ["tab"] => owned(&["expense", "statistics"]),
        ["records"] => owned(&["--json"]),
        ["config"] => owned(&["locale", "currency"]),
        ["config", "locale"] => owned(&["en-US", "zh-TW"]),
        _ => Vec::new(),
    }
}
