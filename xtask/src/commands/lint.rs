//! `cargo xtask lint <check> [dir]`.

use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use crate::XtaskCommand;
use ssot_lint::{run_check, Check, CheckReport, Corpus, Violation};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// `cargo xtask lint ...`
pub struct LintCommand;

/// Which checks a lint run covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LintSelection {
    One(Check),
    All,
}

impl LintSelection {
    fn parse(name: &str) -> XtaskResult<Self> {
        if name == "all" {
            return Ok(Self::All);
        }
        Check::from_name(name).map(Self::One).ok_or_else(|| {
            XtaskError::usage(format!("unknown check: {name}"))
                .with_hint("run `cargo xtask help` for the list of checks")
        })
    }

    /// Checks in run order.
    pub fn checks(self) -> Vec<Check> {
        match self {
            Self::One(check) => vec![check],
            Self::All => Check::ALL.to_vec(),
        }
    }
}

/// Parsed `lint` arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LintOptions {
    pub selection: LintSelection,
    /// Corpus directory; the configured `docs_dir` when absent.
    pub dir: Option<PathBuf>,
}

impl XtaskCommand for LintCommand {
    type Options = LintOptions;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        let (name, rest) = args.split_first().ok_or_else(|| {
            XtaskError::usage("missing `<check>`").with_hint("usage: cargo xtask lint <check> [dir]")
        })?;
        let selection = LintSelection::parse(name)?;
        let dir = match rest {
            [] => None,
            [dir] => Some(PathBuf::from(dir)),
            [_, extra, ..] => {
                return Err(XtaskError::usage(format!("unexpected argument: {extra}")))
            }
        };
        Ok(LintOptions { selection, dir })
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        let dir = corpus_dir(ctx, options.dir.as_deref());
        let corpus = Corpus::discover(&dir)?;
        let reports = run_checks(ctx, &corpus, &options.selection.checks())?;
        finish(&dir, &reports)
    }
}

pub(crate) fn corpus_dir(ctx: &CommandContext, dir: Option<&Path>) -> PathBuf {
    match dir {
        Some(dir) => ctx.resolve(dir),
        None => ctx.docs_dir(),
    }
}

/// Run `checks` in order, each over its own document selection.
pub(crate) fn run_checks(
    ctx: &CommandContext,
    corpus: &Corpus,
    checks: &[Check],
) -> XtaskResult<Vec<CheckReport>> {
    let root_documents = if checks.iter().any(|check| !check.honors_skip_dirs()) {
        existing_root_documents(ctx)
    } else {
        Vec::new()
    };

    checks
        .iter()
        .map(|&check| -> XtaskResult<CheckReport> {
            let paths = documents_for(ctx, corpus, check, &root_documents);
            let report = run_check(check, &paths)?;
            info!(
                check = check.name(),
                checked = report.checked,
                violations = report.violations.len(),
                "check finished"
            );
            Ok(report)
        })
        .collect()
}

fn documents_for(
    ctx: &CommandContext,
    corpus: &Corpus,
    check: Check,
    root_documents: &[PathBuf],
) -> Vec<PathBuf> {
    if check.honors_skip_dirs() {
        return corpus.select(&ctx.config().skip_dirs);
    }
    let mut paths = corpus.files().to_vec();
    for path in root_documents {
        if !paths.contains(path) {
            paths.push(path.clone());
        }
    }
    paths
}

fn existing_root_documents(ctx: &CommandContext) -> Vec<PathBuf> {
    ctx.config()
        .root_documents
        .iter()
        .map(|name| ctx.root().join(name))
        .filter(|path| {
            let present = path.is_file();
            if !present {
                warn!(path = %path.display(), "root document not found, skipping");
            }
            present
        })
        .collect()
}

/// Print the outcome and fail when any report has violations.
pub(crate) fn finish(dir: &Path, reports: &[CheckReport]) -> XtaskResult<()> {
    let violations: Vec<&Violation> = reports
        .iter()
        .flat_map(|report| report.violations.iter())
        .collect();

    if violations.is_empty() {
        for report in reports {
            println!(
                "OK: {} passed for {} document(s) under {}",
                report.check,
                report.checked,
                dir.display()
            );
        }
        return Ok(());
    }

    for violation in &violations {
        eprintln!("{violation}");
    }
    eprintln!("\nFAILED: {} issue(s)", violations.len());

    let failed: Vec<&str> = reports
        .iter()
        .filter(|report| !report.is_clean())
        .map(|report| report.check.name())
        .collect();
    Err(XtaskError::validation(format!(
        "lint failed: {}",
        failed.join(", ")
    )))
}
