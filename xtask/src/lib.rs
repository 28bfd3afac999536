//! Markdown corpus lint commands (`cargo xtask`).
//!
//! The crate is a small CLI layer over the [`ssot_lint`] checks. [`cli`] selects a command
//! family, [`commands`] owns argument parsing and reporting for each family, and [`runtime`]
//! owns configuration, errors, and logging.

pub mod cli;
pub mod commands;
pub mod lint_config;
pub mod runtime;

use crate::cli::TopLevelCommand;
use crate::commands::audit::AuditReportCommand;
use crate::commands::lint::LintCommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;

/// Shared command contract for top-level xtask command families.
///
/// Implementations treat [`XtaskCommand::parse`] as a pure translation step from raw CLI
/// arguments into a typed options value and keep side effects in [`XtaskCommand::run`].
pub trait XtaskCommand {
    /// Typed options produced by CLI parsing for the command family.
    type Options;

    /// Parse command-line arguments into typed options.
    ///
    /// Implementations should return [`XtaskError::usage`](crate::runtime::error::XtaskError::usage)
    /// for invalid argument shapes.
    fn parse(args: &[String]) -> XtaskResult<Self::Options>;

    /// Execute the command family using the shared runtime context.
    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()>;
}

/// Executes the `xtask` binary using the current process arguments.
///
/// Arguments are parsed before the [`CommandContext`] is built, so usage errors surface even
/// when the lint config is broken.
pub fn execute_from_env() -> XtaskResult<()> {
    let parsed = cli::parse(std::env::args().skip(1).collect())?;

    match parsed {
        TopLevelCommand::Lint(args) => {
            let options = LintCommand::parse(&args)?;
            LintCommand::run(&CommandContext::new()?, options)
        }
        TopLevelCommand::AuditReport(args) => {
            let options = AuditReportCommand::parse(&args)?;
            AuditReportCommand::run(&CommandContext::new()?, options)
        }
        TopLevelCommand::Help => {
            cli::print_usage();
            Ok(())
        }
    }
}

/// Converts an xtask result into a stable process exit code.
///
/// Failures print the formatted [`XtaskError`](crate::runtime::error::XtaskError) to stderr
/// and exit with the code of their category.
pub fn exit_code(result: XtaskResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(err.exit_code())
        }
    }
}
