//! Launching a Foundry host version
//!
//! Foundry runs as `node <foundry>/<version>/resources/app/main.js
//! --dataPath=<data>`. The child's stdout and stderr are relayed on
//! background threads; stderr lines are classified with [`classify`]
//! before they are shown.

pub mod output;

use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::{FvmError, Result};

pub use output::{
    ConsoleSink, OutputKeywords, OutputSink, Severity, classify, relay_stderr, relay_stdout,
};

/// Name shown in relayed output headers
pub const HOST_NAME: &str = "Foundry";

/// What to run and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Directory holding one subdirectory per installed Foundry version
    pub foundry_path: PathBuf,
    /// Foundry user data directory
    pub data_path: PathBuf,
    /// Version subdirectory, e.g. `v11`
    pub foundry_version: String,
    /// JavaScript runtime executable
    pub node_binary: String,
}

impl LaunchOptions {
    /// `<foundry>/<version>/resources/app/main.js`
    pub fn entry_point(&self) -> PathBuf {
        self.foundry_path
            .join(&self.foundry_version)
            .join("resources")
            .join("app")
            .join("main.js")
    }

    pub fn data_path_arg(&self) -> String {
        format!("--dataPath={}", self.data_path.display())
    }

    /// Command line as shown to the user
    pub fn command_line(&self) -> String {
        format!(
            "{} {} {}",
            self.node_binary,
            self.entry_point().display(),
            self.data_path_arg()
        )
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.node_binary);
        command
            .arg(self.entry_point())
            .arg(self.data_path_arg())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

/// A running Foundry process and its output relays
pub struct HostProcess {
    child: Child,
    relays: Vec<JoinHandle<()>>,
    sink: Arc<dyn OutputSink>,
}

impl HostProcess {
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Block until the process exits and its output has been relayed,
    /// then report the exit.
    pub fn wait(mut self) -> Result<ExitStatus> {
        let status = self.child.wait().map_err(|e| FvmError::SpawnFailure {
            command: HOST_NAME.to_string(),
            reason: e.to_string(),
        })?;

        for relay in self.relays.drain(..) {
            if relay.join().is_err() {
                log::warn!("output relay thread panicked");
            }
        }

        self.sink.exited(HOST_NAME, status.code());
        Ok(status)
    }
}

fn spawn_failure(options: &LaunchOptions, reason: impl Into<String>) -> FvmError {
    FvmError::SpawnFailure {
        command: options.command_line(),
        reason: reason.into(),
    }
}

fn ensure_entry_point(options: &LaunchOptions) -> Result<()> {
    let entry = options.entry_point();
    if entry.is_file() {
        Ok(())
    } else {
        Err(spawn_failure(
            options,
            format!("'{}' does not exist", entry.display()),
        ))
    }
}

/// Start Foundry and return as soon as the process is running.
///
/// Output is relayed to `sink` until the process closes its streams.
pub fn launch(
    options: &LaunchOptions,
    keywords: OutputKeywords,
    sink: Arc<dyn OutputSink>,
) -> Result<HostProcess> {
    ensure_entry_point(options)?;

    log::debug!("spawning {}", options.command_line());
    let mut child = options
        .command()
        .spawn()
        .map_err(|e| spawn_failure(options, e.to_string()))?;

    let mut relays = Vec::with_capacity(2);

    if let Some(stdout) = child.stdout.take() {
        let sink = Arc::clone(&sink);
        relays.push(thread::spawn(move || {
            relay_stdout(stdout, HOST_NAME, &sink);
        }));
    }

    if let Some(stderr) = child.stderr.take() {
        let sink = Arc::clone(&sink);
        relays.push(thread::spawn(move || {
            relay_stderr(stderr, HOST_NAME, &keywords, &sink);
        }));
    }

    Ok(HostProcess {
        child,
        relays,
        sink,
    })
}

/// Whether `path` looks like a usable Foundry version directory
pub fn has_entry_point(foundry_path: &Path, version: &str) -> bool {
    LaunchOptions {
        foundry_path: foundry_path.to_path_buf(),
        data_path: PathBuf::new(),
        foundry_version: version.to_string(),
        node_binary: String::new(),
    }
    .entry_point()
    .is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::RecordingSink;
    use tempfile::TempDir;

    fn options(root: &Path, script: &str) -> LaunchOptions {
        let app = root.join("foundry/v11/resources/app");
        std::fs::create_dir_all(&app).unwrap();
        std::fs::write(app.join("main.js"), script).unwrap();
        LaunchOptions {
            foundry_path: root.join("foundry"),
            data_path: root.join("data"),
            foundry_version: "v11".to_string(),
            node_binary: "sh".to_string(),
        }
    }

    #[test]
    fn test_entry_point_and_args() {
        let options = LaunchOptions {
            foundry_path: PathBuf::from("/opt/foundry"),
            data_path: PathBuf::from("/srv/data"),
            foundry_version: "v12".to_string(),
            node_binary: "node".to_string(),
        };
        assert_eq!(
            options.entry_point(),
            PathBuf::from("/opt/foundry/v12/resources/app/main.js")
        );
        assert_eq!(options.data_path_arg(), "--dataPath=/srv/data");
        assert_eq!(
            options.command_line(),
            "node /opt/foundry/v12/resources/app/main.js --dataPath=/srv/data"
        );
    }

    #[test]
    fn test_missing_entry_point_is_spawn_failure() {
        let temp = TempDir::new().unwrap();
        let options = LaunchOptions {
            foundry_path: temp.path().to_path_buf(),
            data_path: temp.path().join("data"),
            foundry_version: "v9".to_string(),
            node_binary: "node".to_string(),
        };

        let err = launch(
            &options,
            OutputKeywords::default(),
            Arc::new(RecordingSink::default()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, FvmError::SpawnFailure { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_missing_runtime_is_spawn_failure() {
        let temp = TempDir::new().unwrap();
        let mut options = options(temp.path(), "");
        options.node_binary = "fvm-test-no-such-runtime".to_string();

        let err = launch(
            &options,
            OutputKeywords::default(),
            Arc::new(RecordingSink::default()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, FvmError::SpawnFailure { .. }));
    }

    #[test]
    fn test_has_entry_point() {
        let temp = TempDir::new().unwrap();
        options(temp.path(), "");
        assert!(has_entry_point(&temp.path().join("foundry"), "v11"));
        assert!(!has_entry_point(&temp.path().join("foundry"), "v10"));
    }

    #[cfg(unix)]
    #[test]
    fn test_relays_output_and_exit_code() {
        let temp = TempDir::new().unwrap();
        let options = options(
            temp.path(),
            "echo \"$1\"\necho 'Server started' >&2\necho 'deprecated call' >&2\necho boom >&2\nexit 3\n",
        );
        let keywords = OutputKeywords::new(
            vec!["Server started".to_string()],
            vec!["deprecated".to_string()],
        );
        let recording = Arc::new(RecordingSink::default());

        let process = launch(&options, keywords, recording.clone()).unwrap();
        let status = process.wait().unwrap();

        assert_eq!(status.code(), Some(3));
        assert_eq!(recording.exit(), Some(Some(3)));

        let lines = recording.lines();
        let expected_arg = options.data_path_arg();
        assert!(lines.contains(&("log".to_string(), expected_arg)));
        assert!(lines.contains(&("success".to_string(), "Server started".to_string())));
        assert!(lines.contains(&("warning".to_string(), "deprecated call".to_string())));
        assert!(lines.contains(&("error".to_string(), "boom".to_string())));
    }

    #[cfg(unix)]
    #[test]
    fn test_clean_exit() {
        let temp = TempDir::new().unwrap();
        let options = options(temp.path(), "exit 0\n");
        let recording = Arc::new(RecordingSink::default());

        let status = launch(&options, OutputKeywords::default(), recording.clone())
            .unwrap()
            .wait()
            .unwrap();

        assert!(status.success());
        assert_eq!(recording.exit(), Some(Some(0)));
        assert!(recording.lines().is_empty());
    }
}
