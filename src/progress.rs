//! Organize progress reporting.
//!
//! Shows how many documents have been classified while a run is in flight.
//! Progress is emitted on **stderr** so stdout stays reserved for the run
//! summary.

use std::io::Write;

/// A single progress event for a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrganizeProgressEvent {
    /// Documents found in the source directory; dispatch is about to start.
    Discovered { total: u64 },
    /// `n` of `total` documents have a final outcome (moved or failed).
    Classified { n: u64, total: u64 },
}

/// Reports run progress. Implementations write to stderr (human or JSON).
pub trait OrganizeProgressReporter: Send + Sync {
    fn report(&self, event: OrganizeProgressEvent);
}

/// Human-friendly progress on stderr: "organize  classified  1,234 / 5,000 documents".
pub struct StderrProgress;

impl OrganizeProgressReporter for StderrProgress {
    fn report(&self, event: OrganizeProgressEvent) {
        let line = match &event {
            OrganizeProgressEvent::Discovered { total } => {
                format!("organize  found {} documents\n", format_number(*total))
            }
            OrganizeProgressEvent::Classified { n, total } => format!(
                "organize  classified  {} / {} documents\n",
                format_number(*n),
                format_number(*total)
            ),
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl OrganizeProgressReporter for JsonProgress {
    fn report(&self, event: OrganizeProgressEvent) {
        let obj = match &event {
            OrganizeProgressEvent::Discovered { total } => serde_json::json!({
                "event": "progress",
                "phase": "discovered",
                "total": total
            }),
            OrganizeProgressEvent::Classified { n, total } => serde_json::json!({
                "event": "progress",
                "phase": "classifying",
                "n": n,
                "total": total
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

impl OrganizeProgressReporter for NoProgress {
    fn report(&self, _event: OrganizeProgressEvent) {}
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

    pub fn reporter(&self) -> Box<dyn OrganizeProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
