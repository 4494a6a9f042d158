//! UI/Progress presentation layer
//!
//! This module handles:
//! - Colored console lines for info, success, warning and error messages
//! - Progress signals from the download/install pipeline, including the
//!   "still downloading" heartbeat and a spinner while a download runs
//!
//! Pipeline components never print directly. They report through the
//! [`ProgressReporter`] trait so the presentation can be swapped (console,
//! silent, or a recording double in tests).

pub mod console_log;

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use console_log::{log_error, log_info, log_success, log_warning};

/// Progress reporter for the fetch and install pipeline
pub trait ProgressReporter: Send + Sync {
    /// A pipeline step started, e.g. "Extracting ..."
    fn step(&self, message: &str);

    /// A download started
    fn download_started(&self, url: &str);

    /// Liveness signal, emitted periodically while a download is outstanding
    fn still_downloading(&self);

    /// The download finished, successfully or not
    fn download_finished(&self);

    /// A step completed successfully
    fn success(&self, message: &str);

    /// A step failed; the error itself is propagated separately
    fn error(&self, message: &str);
}

/// Console reporter with colored lines and a download spinner
#[derive(Default)]
pub struct ConsoleReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_spinner(&self, f: impl FnOnce(Option<&ProgressBar>)) {
        match self.spinner.lock() {
            Ok(guard) => f(guard.as_ref()),
            Err(_) => f(None),
        }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn step(&self, message: &str) {
        log_info(message);
    }

    fn download_started(&self, url: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} [{elapsed}]") {
            spinner.set_style(style);
        }
        spinner.set_message(url.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(spinner);
        }
    }

    fn still_downloading(&self) {
        self.with_spinner(|spinner| match spinner {
            Some(pb) => pb.println("Still downloading..."),
            None => log_info("Still downloading..."),
        });
    }

    fn download_finished(&self) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn success(&self, message: &str) {
        log_success(message);
    }

    fn error(&self, message: &str) {
        log_error(message);
    }
}

/// Silent progress reporter
///
/// No-op implementation that does not display anything.
#[derive(Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _message: &str) {}

    fn download_started(&self, _url: &str) {}

    fn still_downloading(&self) {}

    fn download_finished(&self) {}

    fn success(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
