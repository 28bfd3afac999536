//! Top-level CLI parsing and help output.

use crate::runtime::error::{XtaskError, XtaskResult};
use ssot_lint::Check;

/// Top-level `xtask` command families.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TopLevelCommand {
    Lint(Vec<String>),
    AuditReport(Vec<String>),
    Help,
}

/// Parse raw command-line arguments into a top-level command selection.
pub fn parse(args: Vec<String>) -> XtaskResult<TopLevelCommand> {
    let Some(cmd) = args.first().cloned() else {
        return Ok(TopLevelCommand::Help);
    };

    let rest = args[1..].to_vec();
    match cmd.as_str() {
        "lint" => Ok(TopLevelCommand::Lint(rest)),
        "audit-report" => Ok(TopLevelCommand::AuditReport(rest)),
        "help" | "--help" | "-h" => Ok(TopLevelCommand::Help),
        other => Err(XtaskError::usage(format!("unknown xtask command: {other}"))
            .with_hint("run `cargo xtask help`")),
    }
}

/// Print the canonical top-level usage text.
pub fn print_usage() {
    let checks: String = Check::ALL
        .iter()
        .map(|check| format!("{:<20}{}\n", check.name(), check.description()))
        .collect();
    eprintln!(
        "Usage: cargo xtask <command> [args]\n\
         \n\
         Commands:\n\
         lint <check> [dir]  Run one check (or `all`) over a Markdown corpus (default: docs)\n\
         audit-report --output <path> [dir]\n\
         \x20                   Run every check and write a JSON summary\n\
         help                Show this message\n\
         \n\
         Checks:\n\
         {checks}{:<20}every check above, in order\n",
        "all"
    );
}
