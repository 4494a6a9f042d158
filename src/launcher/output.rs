//! Relaying and classifying Foundry's console output

use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;

use console::Style;

/// How a line on Foundry's stderr is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    fn style(self) -> Style {
        match self {
            Severity::Success => Style::new().green(),
            Severity::Warning => Style::new().yellow(),
            Severity::Error => Style::new().red(),
        }
    }
}

/// Keyword sets used by [`classify`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputKeywords {
    pub success: Vec<String>,
    pub warning: Vec<String>,
}

impl OutputKeywords {
    pub fn new(success: Vec<String>, warning: Vec<String>) -> Self {
        Self { success, warning }
    }
}

/// Success if the line contains a success keyword, else warning if it
/// contains a warning keyword, else error.
pub fn classify(line: &str, keywords: &OutputKeywords) -> Severity {
    if keywords.success.iter().any(|k| line.contains(k.as_str())) {
        Severity::Success
    } else if keywords.warning.iter().any(|k| line.contains(k.as_str())) {
        Severity::Warning
    } else {
        Severity::Error
    }
}

/// Receives relayed lines from a host process
pub trait OutputSink: Send + Sync {
    /// A line from stdout
    fn log(&self, name: &str, line: &str);

    /// A classified line from stderr
    fn diagnostic(&self, name: &str, severity: Severity, line: &str);

    /// The process exited; `code` is `None` when it was killed by a signal
    fn exited(&self, name: &str, code: Option<i32>);
}

/// Prints relayed lines with `[name] <kind>` headers
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn log(&self, name: &str, line: &str) {
        println!("{}", Style::new().blue().apply_to(format!("[{name}] log")));
        println!("{line}");
    }

    fn diagnostic(&self, name: &str, severity: Severity, line: &str) {
        let style = severity.style();
        eprintln!(
            "{}",
            style.apply_to(format!("[{name}] {}", severity.as_str()))
        );
        eprintln!("{}", style.apply_to(line));
    }

    fn exited(&self, name: &str, code: Option<i32>) {
        println!("{}", Style::new().blue().apply_to(format!("[{name}] log")));
        match code {
            Some(0) => println!("{}\n", Style::new().green().apply_to("Successful")),
            Some(code) => println!(
                "{}",
                Style::new()
                    .red()
                    .apply_to(format!("child process exited with code {code}"))
            ),
            None => println!(
                "{}",
                Style::new().red().apply_to("child process was terminated by a signal")
            ),
        }
    }
}

fn for_each_line(reader: impl Read, mut f: impl FnMut(&str)) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\r', '\n']);
                if !line.trim().is_empty() {
                    f(line);
                }
            }
            Err(e) => {
                log::debug!("output relay stopped: {e}");
                break;
            }
        }
    }
}

/// Forward every non-blank stdout line to the sink
pub fn relay_stdout(reader: impl Read, name: &str, sink: &Arc<dyn OutputSink>) {
    for_each_line(reader, |line| sink.log(name, line));
}

/// Classify and forward every non-blank stderr line to the sink
pub fn relay_stderr(
    reader: impl Read,
    name: &str,
    keywords: &OutputKeywords,
    sink: &Arc<dyn OutputSink>,
) {
    for_each_line(reader, |line| {
        sink.diagnostic(name, classify(line, keywords), line);
    });
}
