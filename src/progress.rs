//! Progress display for installer steps
//!
//! Shows a spinner on stderr while an external resolver step is running.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Spinner shown while an installer step (`lock`, `sync`) runs
pub struct Progress {
    /// Disabled in quiet mode
    enabled: bool,
    step: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            step: None,
        }
    }

    /// Start the spinner for an installer step, e.g. "Running lock..."
    pub fn start_step(&mut self, step: &str) {
        if !self.enabled {
            return;
        }

        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS);
        let spinner = ProgressBar::new_spinner()
            .with_style(style)
            .with_message(format!("Running {}...", step));
        spinner.enable_steady_tick(TICK_INTERVAL);
        self.step = Some(spinner);
    }

    /// Clear the spinner once the step has exited
    pub fn finish_step(&mut self) {
        if let Some(spinner) = self.step.take() {
            spinner.finish_and_clear();
        }
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.step.is_some()
    }
}
