//! User-facing output
//!
//! Messages meant for the person running the command go through the
//! `Reporter`, never through `tracing`. Diagnostics stay on stderr via the
//! tracing subscriber configured in `main`.

use colored::Colorize;
use std::io::{IsTerminal, Write};
use std::sync::{Arc, Mutex, PoisonError};

enum Sink {
    Console { terminal: bool },
    Capture(Arc<Mutex<Vec<String>>>),
}

/// Prints `I:`, `W:` and `E:` prefixed messages and raw command output
pub struct Reporter {
    sink: Sink,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    /// Reporter bound to the process stdout/stderr
    pub fn new() -> Self {
        Reporter {
            sink: Sink::Console {
                terminal: std::io::stdout().is_terminal(),
            },
        }
    }

    /// Reporter that records every line instead of printing it
    pub fn new_capture() -> Self {
        Reporter {
            sink: Sink::Capture(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    /// Lines recorded by a capturing reporter (empty for console reporters)
    pub fn captured(&self) -> Vec<String> {
        match &self.sink {
            Sink::Capture(lines) => lines.lock().unwrap_or_else(PoisonError::into_inner).clone(),
            Sink::Console { .. } => Vec::new(),
        }
    }

    /// Whether stdout is attached to a terminal
    ///
    /// Spinners and progress chatter are only shown when this is true.
    pub fn is_terminal(&self) -> bool {
        matches!(self.sink, Sink::Console { terminal: true })
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        match &self.sink {
            Sink::Console { .. } => println!("{} {}", "I:".green(), msg),
            Sink::Capture(_) => self.record(format!("I: {}", msg)),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        match &self.sink {
            Sink::Console { .. } => eprintln!("{} {}", "W:".yellow(), msg),
            Sink::Capture(_) => self.record(format!("W: {}", msg)),
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        match &self.sink {
            Sink::Console { .. } => eprintln!("{} {}", "E:".red(), msg),
            Sink::Capture(_) => self.record(format!("E: {}", msg)),
        }
    }

    /// Write raw text to stdout (tables, manual-mode commands)
    pub fn print(&self, text: impl AsRef<str>) {
        let text = text.as_ref();
        match &self.sink {
            Sink::Console { .. } => {
                let mut stdout = std::io::stdout().lock();
                // A closed pipe (e.g. `| head`) is not worth failing the command over
                let _ = writeln!(stdout, "{}", text);
            }
            Sink::Capture(_) => self.record(text.to_string()),
        }
    }

    fn record(&self, line: String) {
        if let Sink::Capture(lines) = &self.sink {
            lines
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_prefixed_lines() {
        let reporter = Reporter::new_capture();

        reporter.info("created");
        reporter.warn("careful");
        reporter.error("broken");
        reporter.print("aws s3 rb s3://bucket");

        assert_eq!(
            reporter.captured(),
            vec![
                "I: created".to_string(),
                "W: careful".to_string(),
                "E: broken".to_string(),
                "aws s3 rb s3://bucket".to_string(),
            ]
        );
    }

    #[test]
    fn test_capture_is_never_a_terminal() {
        let reporter = Reporter::new_capture();
        assert!(!reporter.is_terminal());
    }
}
