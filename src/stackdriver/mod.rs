//! Stackdriver log formatting.
//!
//! Transforms a structured [`LogRecord`] into the JSON document the
//! Stackdriver error-reporting pipeline ingests. Error-severity records
//! are enriched with the resolved call site of the log statement; frames
//! belonging to logging wrappers are skipped by module-path prefix.

mod caller;


pub use caller::ReportLocation;

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::FormatterConfig;
use crate::errors::MonitoringResult;

/// Log record criticality level.
///
/// Ordering follows increasing severity; `Error` and above trigger
/// call-site resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Trace-level diagnostics.
    Trace,
    /// Debug-level diagnostics.
    Debug,
    /// Informational messages.
    Info,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
    /// Unrecoverable errors.
    Fatal,
}

impl LogLevel {
    /// Returns the Stackdriver severity string for this level.
    pub fn severity(&self) -> &'static str {
        match self {
            LogLevel::Trace | LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "CRITICAL",
        }
    }

    fn reports_location(&self) -> bool {
        *self >= LogLevel::Error
    }
}

/// A structured log record ready to be formatted.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Criticality level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// When the record was produced.
    pub timestamp: DateTime<Utc>,
    /// Structured fields attached to the record.
    pub fields: BTreeMap<String, Value>,
}

impl LogRecord {
    /// Creates a record stamped with the current time.
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            fields: BTreeMap::new(),
        }
    }

    /// Overrides the record timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attaches a structured field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

// Serialization mirrors of the target schema. Field declaration order is
// the emitted key order.
#[derive(Serialize)]
struct LogEntry<'a> {
    severity: &'static str,
    message: &'a str,
    timestamp: String,
    #[serde(rename = "serviceContext")]
    service_context: ServiceContext<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<EntryContext<'a>>,
    #[serde(rename = "sourceLocation", skip_serializing_if = "Option::is_none")]
    source_location: Option<&'a ReportLocation>,
}

#[derive(Serialize)]
struct ServiceContext<'a> {
    service: &'a str,
    version: &'a str,
}

#[derive(Serialize)]
struct EntryContext<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a BTreeMap<String, Value>>,
    #[serde(rename = "reportLocation", skip_serializing_if = "Option::is_none")]
    report_location: Option<&'a ReportLocation>,
}

/// Formatter producing Stackdriver-schema JSON from log records.
///
/// One-shot transformation per record; the only state is the immutable
/// configuration, so a single instance is safely shared across threads.
#[derive(Debug, Clone)]
pub struct StackdriverFormatter {
    config: FormatterConfig,
}

impl StackdriverFormatter {
    /// Creates a formatter from the given configuration.
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    /// Returns the formatter configuration.
    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Formats one record as a JSON document followed by a newline.
    ///
    /// For `Error` and above the originating call site is resolved and
    /// written identically to both `context.reportLocation` and
    /// `sourceLocation`; below that threshold no stack walk happens and
    /// the keys are omitted. Serialization failure is a hard error; no
    /// partial output is produced.
    pub fn format(&self, record: &LogRecord) -> MonitoringResult<Vec<u8>> {
        let location = if record.level.reports_location() {
            caller::resolve_caller(&self.config.skip_prefixes)
        } else {
            None
        };

        let data = if record.fields.is_empty() {
            None
        } else {
            Some(&record.fields)
        };

        let context = if data.is_some() || location.is_some() {
            Some(EntryContext {
                data,
                report_location: location.as_ref(),
            })
        } else {
            None
        };

        let entry = LogEntry {
            severity: record.level.severity(),
            message: &record.message,
            timestamp: record
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Micros, true),
            service_context: ServiceContext {
                service: &self.config.service,
                version: &self.config.version,
            },
            context,
            source_location: location.as_ref(),
        };

        let mut bytes = serde_json::to_vec(&entry)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
