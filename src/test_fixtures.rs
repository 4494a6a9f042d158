//! Test fixtures shared by unit tests.
//!
//! - [`RecordingReporter`] records progress signals
//! - [`MockDownloader`] serves a canned archive and counts requests
//! - [`RecordingSink`] records relayed host output
//! - [`zip_bytes`] / [`write_zip`] build zip archives in memory

use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::cache::PackageDownloader;
use crate::error::Result;
use crate::error::package::network_failure;
use crate::launcher::{OutputSink, Severity};
use crate::ui::ProgressReporter;

/// Build a zip archive from `(path, content)` pairs.
///
/// Paths ending in `/` become directory entries.
///
/// # Panics
///
/// Panics if the archive cannot be written.
#[must_use]
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (path, content) in entries {
        if path.ends_with('/') {
            writer
                .add_directory(*path, options)
                .expect("Failed to add directory");
        } else {
            writer.start_file(*path, options).expect("Failed to start file");
            writer
                .write_all(content.as_bytes())
                .expect("Failed to write file");
        }
    }

    writer.finish().expect("Failed to finish zip").into_inner()
}

/// Write a zip archive built by [`zip_bytes`] to `path`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    std::fs::write(path, zip_bytes(entries)).expect("Failed to write zip");
}

/// Progress reporter that records what it was told
#[derive(Default)]
pub struct RecordingReporter {
    pub steps: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
    heartbeats: AtomicUsize,
}

impl RecordingReporter {
    pub fn heartbeats(&self) -> usize {
        self.heartbeats.load(Ordering::SeqCst)
    }

    pub fn steps(&self) -> Vec<String> {
        self.steps.lock().expect("poisoned").clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("poisoned").clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.steps.lock().expect("poisoned").push(message.to_string());
    }

    fn download_started(&self, _url: &str) {}

    fn still_downloading(&self) {
        self.heartbeats.fetch_add(1, Ordering::SeqCst);
    }

    fn download_finished(&self) {}

    fn success(&self, message: &str) {
        self.steps.lock().expect("poisoned").push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().expect("poisoned").push(message.to_string());
    }
}

/// Downloader that serves canned bytes and counts calls
#[derive(Clone, Default)]
pub struct MockDownloader {
    body: Arc<Mutex<Option<Vec<u8>>>>,
    calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl MockDownloader {
    /// Serve `body` for every url
    pub fn serving(body: Vec<u8>) -> Self {
        Self {
            body: Arc::new(Mutex::new(Some(body))),
            ..Self::default()
        }
    }

    /// Fail every request with a network error
    pub fn failing() -> Self {
        Self::default()
    }

    /// Sleep this long before answering
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the body served from now on
    pub fn set_body(&self, body: Vec<u8>) {
        *self.body.lock().expect("poisoned") = Some(body);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PackageDownloader for MockDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.body
            .lock()
            .expect("poisoned")
            .clone()
            .ok_or_else(|| network_failure(url, "connection refused"))
    }
}

/// Output sink that records relayed lines as `(kind, line)` pairs
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<(String, String)>>,
    exit: Mutex<Option<Option<i32>>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<(String, String)> {
        self.lines.lock().expect("poisoned").clone()
    }

    /// `None` until the process exit has been reported
    pub fn exit(&self) -> Option<Option<i32>> {
        *self.exit.lock().expect("poisoned")
    }
}

impl OutputSink for RecordingSink {
    fn log(&self, _name: &str, line: &str) {
        self.lines
            .lock()
            .expect("poisoned")
            .push(("log".to_string(), line.to_string()));
    }

    fn diagnostic(&self, _name: &str, severity: Severity, line: &str) {
        self.lines
            .lock()
            .expect("poisoned")
            .push((severity.as_str().to_string(), line.to_string()));
    }

    fn exited(&self, _name: &str, code: Option<i32>) {
        *self.exit.lock().expect("poisoned") = Some(code);
    }
}
