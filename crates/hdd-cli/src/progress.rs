//! Terminal feedback: a spinner for metadata-service lookups and a per-file
//! bar driven by the conversion batch. Both stay hidden when stdout is not a
//! terminal or `--quiet` is set.

use std::path::Path;
use std::time::Duration;

use hdd_convert::{BatchProgress, BatchReport, FileOutcome};
use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

const TICK: Duration = Duration::from_millis(100);

pub struct Spinner(Option<ProgressBar>);

impl Spinner {
    #[must_use]
    pub fn start(message: impl Into<String>) -> Self {
        if !ui::prefs().progress {
            return Self(None);
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(TICK);
        bar.set_message(message.into());
        Self(Some(bar))
    }

    pub fn stop(self) {
        if let Some(bar) = self.0 {
            bar.finish_and_clear();
        }
    }
}

/// One tick per input file; failures are printed above the bar as they
/// happen.
pub struct FileBar(Option<ProgressBar>);

impl FileBar {
    #[must_use]
    pub fn start() -> Self {
        if !ui::prefs().progress {
            return Self(None);
        }
        let bar = ProgressBar::no_length();
        bar.set_style(
            ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self(Some(bar))
    }
}

impl BatchProgress for FileBar {
    fn started(&self, total: usize) {
        if let Some(bar) = &self.0 {
            bar.set_length(total as u64);
        }
    }

    fn file_started(&self, file: &Path) {
        if let Some(bar) = &self.0 {
            bar.set_message(display_name(file));
        }
    }

    fn file_finished(&self, outcome: &FileOutcome) {
        let Some(bar) = &self.0 else { return };
        if let Some(line) = failure_line(outcome) {
            bar.println(line);
        }
        bar.inc(1);
    }

    fn finished(&self, report: &BatchReport) {
        let Some(bar) = &self.0 else { return };
        if report.has_failures() {
            bar.abandon_with_message(summary_line(report));
        } else {
            bar.finish_with_message(summary_line(report));
        }
    }
}

fn display_name(file: &Path) -> String {
    file.file_name()
        .map_or_else(|| file.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn failure_line(outcome: &FileOutcome) -> Option<String> {
    match outcome {
        FileOutcome::Failed { file, reason } => {
            Some(format!("failed {}: {reason}", display_name(file)))
        }
        FileOutcome::Converted { .. } | FileOutcome::Skipped { .. } => None,
    }
}

fn summary_line(report: &BatchReport) -> String {
    let mut line = format!("{} converted", report.converted);
    if report.skipped > 0 {
        line.push_str(&format!(", {} skipped", report.skipped));
    }
    if report.failed > 0 {
        line.push_str(&format!(", {} failed", report.failed));
    }
    line
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn summary_mentions_only_nonzero_counts() {
        let mut report = BatchReport::default();
        report.record(FileOutcome::Skipped {
            file: PathBuf::from("notes.txt"),
            reason: "unsupported".into(),
        });
        assert_eq!(summary_line(&report), "0 converted, 1 skipped");

        report.record(FileOutcome::Failed {
            file: PathBuf::from("pain.dta"),
            reason: "bad".into(),
        });
        assert_eq!(summary_line(&report), "0 converted, 1 skipped, 1 failed");
    }

    #[test]
    fn only_failures_get_a_line() {
        let failed = FileOutcome::Failed {
            file: PathBuf::from("/study/clean/pain.dta"),
            reason: "output folder 'pain' is already used by pain.csv".into(),
        };
        assert_eq!(
            failure_line(&failed).as_deref(),
            Some("failed pain.dta: output folder 'pain' is already used by pain.csv")
        );

        let skipped = FileOutcome::Skipped {
            file: PathBuf::from("notes.txt"),
            reason: "unsupported".into(),
        };
        assert_eq!(failure_line(&skipped), None);
    }

    #[test]
    fn hidden_bar_ignores_events() {
        let bar = FileBar(None);
        bar.started(2);
        bar.file_started(Path::new("a.csv"));
        bar.finished(&BatchReport::default());
    }
}
