//! Mock implementations for testing.
//!
//! Provides recording and failing doubles for the transport and call
//! logger seams, usable from this crate's tests and from downstream
//! applications that want to assert on emitted metrics.

use std::sync::Mutex;

use crate::errors::MonitoringResult;
use crate::monitor::{CallLogger, MetricCall};
use crate::transport::MetricsTransport;

/// Transport that records every datagram instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<String>>,
}

impl RecordingTransport {
    /// Creates a new recording transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the datagrams sent so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// Clears the recorded datagrams.
    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl MetricsTransport for RecordingTransport {
    fn send(&self, datagram: &str) -> MonitoringResult<()> {
        self.sent.lock().unwrap().push(datagram.to_string());
        Ok(())
    }
}

/// Transport whose every send fails with a broken-pipe error.
#[derive(Debug, Default)]
pub struct FailingTransport;

impl MetricsTransport for FailingTransport {
    fn send(&self, _datagram: &str) -> MonitoringResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "transport down").into())
    }
}

/// Owned snapshot of one observed monitor call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Operation name.
    pub operation: String,
    /// Metric name or event title.
    pub name: String,
    /// Rendered value or event text.
    pub value: String,
    /// Per-call tags.
    pub tags: Vec<String>,
    /// Sample rate, when the operation carries one.
    pub sample_rate: Option<f64>,
}

/// Call logger that records every call.
#[derive(Debug, Default)]
pub struct RecordingCallLogger {
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingCallLogger {
    /// Creates a new recording call logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the calls recorded so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl CallLogger for RecordingCallLogger {
    fn log_call(&self, call: &MetricCall<'_>) {
        self.calls.lock().unwrap().push(RecordedCall {
            operation: call.operation.to_string(),
            name: call.name.to_string(),
            value: call.value.clone(),
            tags: call.tags.to_vec(),
            sample_rate: call.sample_rate,
        });
    }
}
