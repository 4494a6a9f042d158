//! Archive downloads
//!
//! [`PackageDownloader`] abstracts the network so the cache can be tested
//! without it. [`HttpDownloader`] is the real implementation. While a
//! download is outstanding a [`Heartbeat`] emits a periodic liveness signal.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Result;
use crate::error::package::network_failure;
use crate::ui::ProgressReporter;

/// Default interval of the "still downloading" signal
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_millis(2500);

/// Lower bound for the heartbeat interval
const MIN_HEARTBEAT_INTERVAL: Duration = Duration::from_millis(10);

/// Downloader for package archives
pub trait PackageDownloader: Send + Sync {
    /// Download the resource at `url` as a binary blob.
    fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP(S) implementation of [`PackageDownloader`].
///
/// No request timeout is set: a slow transfer is waited for until it
/// completes or the connection fails.
#[derive(Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl std::fmt::Debug for HttpDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDownloader").finish_non_exhaustive()
    }
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .user_agent(concat!("fvm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| network_failure("<client>", e.to_string()))?;

        Ok(Self { client })
    }
}

impl PackageDownloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| network_failure(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(network_failure(url, format!("HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .map_err(|e| network_failure(url, e.to_string()))?;
        log::debug!("downloaded {} bytes from {url}", bytes.len());

        Ok(bytes.to_vec())
    }
}

/// Periodic "still downloading" signal.
///
/// Runs on its own thread until dropped. This is a liveness signal only and
/// never cancels or times out the download it accompanies.
pub struct Heartbeat {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Heartbeat {
    pub fn start(interval: Duration, reporter: Arc<dyn ProgressReporter>) -> Self {
        let interval = interval.max(MIN_HEARTBEAT_INTERVAL);
        let (stop, ticks) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            while let Err(RecvTimeoutError::Timeout) = ticks.recv_timeout(interval) {
                reporter.still_downloading();
            }
        });

        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        // Dropping the sender disconnects the channel and ends the loop
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
