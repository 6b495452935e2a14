mod core;
pub mod output;
mod shell;
pub mod ui;
pub mod views;

pub use self::core::{CliError, CliMode, ShellContext};
pub use shell::{run_cli, SCRIPT_MODE_ENV};
