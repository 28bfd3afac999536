//! `cargo xtask audit-report --output <path> [dir]`.

use crate::commands::lint::{corpus_dir, finish, run_checks};
use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use crate::XtaskCommand;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use ssot_lint::{Check, CheckReport, Corpus};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// `cargo xtask audit-report ...`
pub struct AuditReportCommand;

/// Parsed `audit-report` arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuditOptions {
    /// Report destination.
    pub output: PathBuf,
    /// Corpus directory; the configured `docs_dir` when absent.
    pub dir: Option<PathBuf>,
}

/// JSON summary of one full run.
#[derive(Debug, Serialize)]
struct AuditReport {
    generated_at: String,
    corpus: String,
    document_count: usize,
    issue_counts: BTreeMap<&'static str, usize>,
    documents_with_issues: Vec<DocumentIssues>,
}

#[derive(Debug, Serialize)]
struct DocumentIssues {
    path: String,
    issues: Vec<Issue>,
}

#[derive(Debug, Serialize)]
struct Issue {
    check: &'static str,
    message: String,
}

impl XtaskCommand for AuditReportCommand {
    type Options = AuditOptions;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        let mut output = None;
        let mut dir = None;
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--output" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| XtaskError::usage("missing value for `--output`"))?;
                    output = Some(PathBuf::from(value));
                }
                flag if flag.starts_with("--") => {
                    return Err(XtaskError::usage(format!("unknown flag: {flag}")));
                }
                positional if dir.is_none() => dir = Some(PathBuf::from(positional)),
                extra => return Err(XtaskError::usage(format!("unexpected argument: {extra}"))),
            }
        }

        let output = output.ok_or_else(|| {
            XtaskError::usage("missing `--output <path>`")
                .with_hint("usage: cargo xtask audit-report --output <path> [dir]")
        })?;
        Ok(AuditOptions { output, dir })
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        let dir = corpus_dir(ctx, options.dir.as_deref());
        let corpus = Corpus::discover(&dir)?;
        let reports = run_checks(ctx, &corpus, &Check::ALL)?;

        let report = build_report(&dir, corpus.files().len(), &reports);
        let output = ctx.resolve(&options.output);
        write_report(&output, &report)?;
        println!("Wrote audit report: {}", output.display());

        finish(&dir, &reports)
    }
}

fn build_report(dir: &Path, document_count: usize, reports: &[CheckReport]) -> AuditReport {
    let issue_counts = reports
        .iter()
        .map(|report| (report.check.name(), report.violations.len()))
        .collect();

    let mut by_document: BTreeMap<String, Vec<Issue>> = BTreeMap::new();
    for violation in reports.iter().flat_map(|report| report.violations.iter()) {
        by_document
            .entry(violation.path.display().to_string())
            .or_default()
            .push(Issue {
                check: violation.check.name(),
                message: violation.message(),
            });
    }

    AuditReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        corpus: dir.display().to_string(),
        document_count,
        issue_counts,
        documents_with_issues: by_document
            .into_iter()
            .map(|(path, issues)| DocumentIssues { path, issues })
            .collect(),
    }
}

fn write_report(output: &Path, report: &AuditReport) -> XtaskResult<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            XtaskError::io(format!("failed to create {}: {err}", parent.display()))
        })?;
    }
    let body = serde_json::to_string_pretty(report)
        .map_err(|err| XtaskError::io(format!("failed to serialize report: {err}")))?;
    fs::write(output, format!("{body}\n")).map_err(|err| {
        XtaskError::io(format!("failed to write {}: {err}", output.display()))
            .with_operation("write audit report")
    })
}
