//! # Monitoring Integration Library
//!
//! A lightweight instrumentation facade with two independent components:
//!
//! - [`Monitor`] — a metrics client that forwards counters, gauges, and
//!   events to a DogStatsD-compatible agent over fire-and-forget UDP,
//!   attaching identifying tags at construction
//! - [`StackdriverFormatter`] — a log-record formatter producing
//!   Stackdriver-schema JSON, enriching error-severity entries with the
//!   resolved call site (file, line, enclosing function)
//!
//! The components do not interact; applications construct and share each
//! one as a configuration-time dependency.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_monitoring::{Monitor, MonitorConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connects to datadog-agent:8125 unless configured otherwise.
//!     let monitor = Monitor::new(MonitorConfig::new().with_app("hello"))?;
//!
//!     monitor.incr("requests", &["route:index".to_string()], 1.0)?;
//!     monitor.gauge("queue.depth", 42.0, &[], 1.0)?;
//!     monitor.event("deploy", "version 1.2 live")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ```rust
//! use integrations_monitoring::{
//!     FormatterConfig, LogLevel, LogRecord, StackdriverFormatter,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let formatter = StackdriverFormatter::new(
//!     FormatterConfig::new("my-service", "1.0")
//!         .with_skip_prefix("my_service::logwrap"),
//! );
//!
//! let json = formatter.format(&LogRecord::new(LogLevel::Error, "boom"))?;
//! # let _ = json;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;

// Wire protocol
pub mod protocol;

// Transport layer
pub mod transport;

// Metrics client
pub mod monitor;

// Log formatting
pub mod stackdriver;

// Mocks for testing
pub mod mocks;

// Re-exports for convenience
pub use config::{FormatterConfig, MonitorConfig, DEFAULT_AGENT_HOST, DEFAULT_AGENT_PORT};
pub use errors::{MonitoringError, MonitoringResult};
pub use monitor::{CallLogger, MetricCall, Monitor, NoopCallLogger, TracingCallLogger};
pub use protocol::MetricValue;
pub use stackdriver::{LogLevel, LogRecord, ReportLocation, StackdriverFormatter};
pub use transport::{MetricsTransport, UdpTransport};
