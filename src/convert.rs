//! Conversion pipeline orchestration.
//!
//! Runs one conversion end to end: read outline → classify → build tables →
//! write CSVs → zip. Each stage finishes with its files closed before the
//! next one starts.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, Timelike};
use std::path::PathBuf;

use crate::archive;
use crate::classify::classify_lines;
use crate::config::Config;
use crate::export;
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::tables::{build_tables, BuildReport};

/// Per-run switches that don't belong in the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Build tables and report counts without writing anything.
    pub dry_run: bool,
    /// Re-read the staged archive and compare it to the tables before it
    /// replaces the output.
    pub verify: bool,
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub report: BuildReport,
    /// `None` on a dry run.
    pub archive: Option<PathBuf>,
}

/// Local wall-clock time truncated to whole seconds.
pub fn capture_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Run the conversion described by `config`, stamping items with `now`.
pub fn run_convert_at(
    config: &Config,
    options: ConvertOptions,
    now: NaiveDateTime,
    reporter: &dyn ProgressReporter,
) -> Result<ConvertSummary> {
    let input = &config.input.path;
    reporter.report(ProgressEvent::Reading {
        path: input.clone(),
    });
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let lines = classify_lines(&text);
    let (tables, report) = build_tables(&lines, now);
    reporter.report(ProgressEvent::Built {
        categories: report.categories,
        items: report.items,
        orphans_dropped: report.orphans_dropped,
    });

    if options.dry_run {
        return Ok(ConvertSummary {
            report,
            archive: None,
        });
    }

    let output = &config.output;
    let (categories_path, items_path) = export::write_tables(
        &output.dir,
        &output.categories_file,
        &output.items_file,
        &tables,
    )?;
    reporter.report(ProgressEvent::TableWritten {
        path: categories_path.clone(),
        rows: report.categories,
    });
    reporter.report(ProgressEvent::TableWritten {
        path: items_path.clone(),
        rows: report.items,
    });

    let archive_path = output.archive_path();
    let members = [categories_path, items_path];
    if options.verify {
        let expected = vec![
            (
                output.categories_file.clone(),
                export::render_categories_csv(&tables)?,
            ),
            (output.items_file.clone(), export::render_items_csv(&tables)?),
        ];
        archive::write_archive_checked(&archive_path, &members, |staged| {
            archive::verify_archive(staged, &expected)
        })?;
    } else {
        archive::write_archive(&archive_path, &members)?;
    }
    reporter.report(ProgressEvent::Archived {
        path: archive_path.clone(),
        members: members.len(),
    });

    if !output.keep_csv {
        for member in &members {
            std::fs::remove_file(member)
                .with_context(|| format!("Failed to remove {}", member.display()))?;
        }
    }

    Ok(ConvertSummary {
        report,
        archive: Some(archive_path),
    })
}

/// Run the conversion with the current local time.
pub fn run_convert(
    config: &Config,
    options: ConvertOptions,
    reporter: &dyn ProgressReporter,
) -> Result<ConvertSummary> {
    run_convert_at(config, options, capture_now(), reporter)
}
