use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Console feedback for the pipeline: spinners, bars, banners and previews.
///
/// A silent reporter prints nothing, which keeps library callers and tests
/// free of terminal output.
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    silent: bool,
}

impl ProgressReporter {
    pub fn new(total: u64, message: &str, silent: bool) -> Self {
        if silent {
            return Self::silent();
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
            silent: false,
        }
    }

    pub fn new_spinner(message: &str, silent: bool) -> Self {
        if silent {
            return Self::silent();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
            silent: false,
        }
    }

    /// A reporter that swallows all output
    pub fn silent() -> Self {
        Self {
            progress_bar: None,
            silent: true,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message.to_string());
        }
    }

    pub fn println(&self, message: &str) {
        if !self.silent {
            // Previews go to stdout even when the bar itself is hidden
            if let Some(ref pb) = self.progress_bar {
                pb.suspend(|| println!("{}", message));
            } else {
                println!("{}", message);
            }
        }
    }

    /// Print a stage banner, e.g. `=== Task 2: Cleaning & Processing ===`
    pub fn banner(&self, task: usize, title: &str) {
        self.println(&format!("\n=== Task {}: {} ===", task, title));
    }

    /// Print a titled block such as a table preview
    pub fn section(&self, title: &str, body: &str) {
        self.println(&format!("\n{}\n{}", title, body));
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_reporter_has_no_bar() {
        let reporter = ProgressReporter::new(4, "Rendering charts", true);
        assert!(reporter.is_silent());
        assert!(reporter.progress_bar.is_none());

        // All calls are no-ops
        reporter.increment(1);
        reporter.set_message("ignored");
        reporter.banner(1, "Data Loading");
        reporter.finish_with_message("done");
    }

    #[test]
    fn test_spinner_silent_matches_silent() {
        let reporter = ProgressReporter::new_spinner("Loading...", true);
        assert!(reporter.is_silent());
    }
}
