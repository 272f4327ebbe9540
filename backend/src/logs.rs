//! Log reporting for parse, edit and validation steps.
//!
//! The library never prints on its own. Callers hand a [`Reporter`] to
//! every operation that has something to say; the CLI uses
//! [`ConsoleReporter`], tests use [`MemoryReporter`].

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }
}

/// Sink for log entries.
pub trait Reporter {
    fn log(&self, entry: LogEntry);

    fn info(&self, msg: &str) {
        self.log(LogEntry::info(msg));
    }

    fn success(&self, msg: &str) {
        self.log(LogEntry::success(msg));
    }

    fn warning(&self, msg: &str) {
        self.log(LogEntry::warning(msg));
    }

    fn error(&self, msg: &str) {
        self.log(LogEntry::error(msg));
    }
}

/// Prints entries to stderr, keeping stdout free for sheet output.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(entry.indent as usize);
        eprintln!("{}{} {}", indent, prefix, entry.message);
    }
}

/// Collects entries in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Messages logged at `level`, in order.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn log(&self, entry: LogEntry) {
        self.entries.borrow_mut().push(entry);
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn log(&self, _entry: LogEntry) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_collects_in_order() {
        let reporter = MemoryReporter::new();
        reporter.info("one");
        reporter.warning("two");
        reporter.info("three");

        assert_eq!(reporter.entries().len(), 3);
        assert_eq!(reporter.messages(LogLevel::Info), vec!["one", "three"]);
        assert_eq!(reporter.messages(LogLevel::Warning), vec!["two"]);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = LogEntry::warning("Bad line 3").with_indent(1);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["message"], "Bad line 3");
        assert_eq!(json["indent"], 1);
    }
}
