//! Terminal feedback on stderr: a spinner while the evaluator runs and a
//! colored one-line summary afterwards.
//!
//! Stdout carries only the JSON payload, so nothing here ever writes to it.
//! The spinner is hidden when stderr is not a terminal.

use std::time::Duration;

use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};

use crate::grader::{Band, GradeResult};

/// Spinner shown while a document is being graded.
pub struct GradeProgress {
    // Spinner, or a hidden bar when output is disabled.
    pb: ProgressBar,
    // Green for the perfect band.
    green: Style,
    // Yellow for the good band and scoreless results.
    yellow: Style,
    // Red for the fail band and failed runs.
    red: Style,
    // Dim for the gap count.
    dim: Style,
}

impl GradeProgress {
    /// Starts the spinner, or a hidden one when `enabled` is false or stderr
    /// is not a terminal.
    pub fn start(description: &str, enabled: bool) -> Self {
        let pb = if enabled && Term::stderr().is_term() {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
            {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(format!("Grading {description}"));

        Self {
            pb,
            green: Style::new().for_stderr().green().bold(),
            yellow: Style::new().for_stderr().yellow().bold(),
            red: Style::new().for_stderr().red().bold(),
            dim: Style::new().for_stderr().dim(),
        }
    }

    /// Clears the spinner and prints the outcome summary to stderr.
    pub fn complete(&self, result: &GradeResult) {
        self.pb.finish_and_clear();
        if self.pb.is_hidden() {
            return;
        }
        let term = Term::stderr();
        let _ = term.write_line(&self.summary(result));
    }

    fn summary(&self, result: &GradeResult) -> String {
        let reasoning = result.reasoning().unwrap_or("no reasoning given");
        if result.is_failure() {
            return format!("  {} {reasoning}", self.red.apply_to("✗"));
        }

        let gaps = result.gaps().len();
        let gap_note = self.dim.apply_to(format!(
            "({gaps} gap{})",
            if gaps == 1 { "" } else { "s" }
        ));
        match (result.score(), result.band()) {
            (Some(score), Some(band)) => {
                let style = match band {
                    Band::Perfect => &self.green,
                    Band::Good => &self.yellow,
                    Band::Fail => &self.red,
                };
                format!("  {} {score}/100 {band} {gap_note}", style.apply_to("●"))
            }
            _ => format!(
                "  {} graded without a numeric score {gap_note}",
                self.yellow.apply_to("?")
            ),
        }
    }
}
