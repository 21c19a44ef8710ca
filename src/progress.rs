//! Conversion progress reporting.
//!
//! Reports each stage of a run (reading the outline, building tables,
//! writing files) so users can see what happened, including how many orphan
//! lines were dropped. Progress goes to **stderr** so stdout only carries
//! the final confirmation line.

use std::io::Write;
use std::path::PathBuf;

/// A single progress event.
#[derive(Clone, Debug)]
pub enum ProgressEvent {
    /// Reading the outline file.
    Reading { path: PathBuf },
    /// Tables built from the outline.
    Built {
        categories: usize,
        items: usize,
        orphans_dropped: usize,
    },
    /// One CSV table written.
    TableWritten { path: PathBuf, rows: usize },
    /// Archive assembled.
    Archived { path: PathBuf, members: usize },
}

/// Receives progress events from the conversion pipeline.
pub trait ProgressReporter {
    fn report(&self, event: ProgressEvent);
}

/// Human-friendly progress on stderr: "built  2 categories, 3 items".
pub struct StderrProgress;

impl ProgressReporter for StderrProgress {
    fn report(&self, event: ProgressEvent) {
        let line = match &event {
            ProgressEvent::Reading { path } => format!("read     {}\n", path.display()),
            ProgressEvent::Built {
                categories,
                items,
                orphans_dropped,
            } => {
                let mut line = format!(
                    "built    {} categories, {} items",
                    format_number(*categories as u64),
                    format_number(*items as u64)
                );
                if *orphans_dropped > 0 {
                    line.push_str(&format!(
                        " ({} lines before the first category dropped)",
                        format_number(*orphans_dropped as u64)
                    ));
                }
                line.push('\n');
                line
            }
            ProgressEvent::TableWritten { path, rows } => {
                format!(
                    "wrote    {}  {} rows\n",
                    path.display(),
                    format_number(*rows as u64)
                )
            }
            ProgressEvent::Archived { path, members } => {
                format!("archived {}  {} files\n", path.display(), members)
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let obj = match &event {
            ProgressEvent::Reading { path } => serde_json::json!({
                "event": "progress",
                "phase": "reading",
                "path": path.display().to_string()
            }),
            ProgressEvent::Built {
                categories,
                items,
                orphans_dropped,
            } => serde_json::json!({
                "event": "progress",
                "phase": "built",
                "categories": categories,
                "items": items,
                "orphans_dropped": orphans_dropped
            }),
            ProgressEvent::TableWritten { path, rows } => serde_json::json!({
                "event": "progress",
                "phase": "table_written",
                "path": path.display().to_string(),
                "rows": rows
            }),
            ProgressEvent::Archived { path, members } => serde_json::json!({
                "event": "progress",
                "phase": "archived",
                "path": path.display().to_string(),
                "members": members
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn ProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
