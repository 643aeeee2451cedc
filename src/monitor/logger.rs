//! Call tracing for monitor operations.
//!
//! A [`CallLogger`] observes every metric operation with its arguments,
//! independent of whether the underlying send succeeded. Attach one when
//! you need an audit trail of what an application reports.

use std::fmt;

/// One observed monitor operation.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCall<'a> {
    /// Operation name: `count`, `incr`, `decr`, `gauge`, or `event`.
    pub operation: &'static str,
    /// Metric name, or the event title.
    pub name: &'a str,
    /// Rendered value: the delta or gauge value, or the event text.
    pub value: String,
    /// Per-call tags (the monitor's constant tags are not repeated here).
    pub tags: &'a [String],
    /// Sample rate, for the operations that carry one.
    pub sample_rate: Option<f64>,
}

impl fmt::Display for MetricCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.operation, self.name, self.value)?;
        if !self.tags.is_empty() {
            write!(f, " tags={}", self.tags.join(","))?;
        }
        if let Some(rate) = self.sample_rate {
            write!(f, " rate={}", rate)?;
        }
        Ok(())
    }
}

/// Observer for monitor call tracing.
pub trait CallLogger: Send + Sync + fmt::Debug {
    /// Records one operation with its arguments.
    fn log_call(&self, call: &MetricCall<'_>);
}

/// Call logger that forwards to `tracing` at debug level.
#[derive(Debug, Default)]
pub struct TracingCallLogger;

impl CallLogger for TracingCallLogger {
    fn log_call(&self, call: &MetricCall<'_>) {
        tracing::debug!(
            operation = call.operation,
            name = call.name,
            value = %call.value,
            tags = ?call.tags,
            sample_rate = ?call.sample_rate,
            "monitor call"
        );
    }
}

/// Call logger that discards everything.
#[derive(Debug, Default)]
pub struct NoopCallLogger;

impl CallLogger for NoopCallLogger {
    fn log_call(&self, _call: &MetricCall<'_>) {}
}
