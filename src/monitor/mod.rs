//! Metrics client for a DogStatsD-compatible agent.
//!
//! A [`Monitor`] is created once at application startup and shared across
//! the program; it is immutable after construction and holds no mutable
//! state besides the transport's own socket.

mod logger;

pub use logger::{CallLogger, MetricCall, NoopCallLogger, TracingCallLogger};

use std::sync::Arc;

use rand::Rng;
use uuid::Uuid;

use crate::config::MonitorConfig;
use crate::errors::MonitoringResult;
use crate::protocol::{self, MetricValue};
use crate::transport::{MetricsTransport, UdpTransport};

/// Client that forwards counters, gauges, and events to a metrics agent.
///
/// Every metric carries the monitor's constant tags: `monitor-id:<id>`
/// and, when an application name was configured, `app:<name>`. Metric
/// names are prefixed with the namespace derived from the application
/// name (`hello` -> `hello.`).
///
/// Per-call transport errors are returned to the caller unmodified; there
/// is no retry, buffering, or circuit breaking at this layer.
#[derive(Debug)]
pub struct Monitor {
    id: String,
    app: Option<String>,
    namespace: String,
    tags: Vec<String>,
    transport: Arc<dyn MetricsTransport>,
    logger: Option<Arc<dyn CallLogger>>,
    debug: bool,
}

impl Monitor {
    /// Creates a monitor connected to the agent from the configuration.
    ///
    /// Fails when the configuration is invalid or the transport cannot be
    /// initialized (unresolvable or invalid address). A process should not
    /// continue monitoring without a working transport; no partial monitor
    /// is returned.
    pub fn new(config: MonitorConfig) -> MonitoringResult<Self> {
        config.validate()?;
        let transport = Arc::new(UdpTransport::connect(&config)?) as Arc<dyn MetricsTransport>;
        Self::with_dependencies(config, transport, None)
    }

    /// Creates a monitor over a custom transport.
    pub fn with_transport(
        config: MonitorConfig,
        transport: Arc<dyn MetricsTransport>,
    ) -> MonitoringResult<Self> {
        Self::with_dependencies(config, transport, None)
    }

    /// Creates a monitor over a custom transport with a call logger
    /// attached.
    pub fn with_dependencies(
        config: MonitorConfig,
        transport: Arc<dyn MetricsTransport>,
        logger: Option<Arc<dyn CallLogger>>,
    ) -> MonitoringResult<Self> {
        config.validate()?;

        let id = Uuid::new_v4().to_string();
        let mut tags = vec![format!("monitor-id:{}", id)];
        if let Some(app) = config.app.as_deref().filter(|a| !a.is_empty()) {
            tags.push(format!("app:{}", app));
        }

        let monitor = Self {
            id,
            app: config.app.clone().filter(|a| !a.is_empty()),
            namespace: config.namespace(),
            tags,
            transport,
            logger,
            debug: config.debug,
        };

        if let Some(app) = monitor.app.clone() {
            let title = format!("{} monitor started.", app);
            if let Err(err) = monitor.event(&title, &title) {
                tracing::debug!(error = %err, "failed to send monitor started event");
            }
        }

        tracing::debug!(id = %monitor.id, app = ?monitor.app, "created monitor");
        Ok(monitor)
    }

    /// Returns the generated unique id of this monitor.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the constant tags attached to every metric.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the metric namespace, empty when no application name is
    /// configured.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Adds `value` to a count. The delta may be negative.
    pub fn count(
        &self,
        name: &str,
        value: i64,
        tags: &[String],
        sample_rate: f64,
    ) -> MonitoringResult<()> {
        self.log_call(MetricCall {
            operation: "count",
            name,
            value: value.to_string(),
            tags,
            sample_rate: Some(sample_rate),
        });
        self.send_metric(name, MetricValue::Count(value), tags, sample_rate)
    }

    /// Increments a count by one.
    pub fn incr(&self, name: &str, tags: &[String], sample_rate: f64) -> MonitoringResult<()> {
        self.log_call(MetricCall {
            operation: "incr",
            name,
            value: "1".to_string(),
            tags,
            sample_rate: Some(sample_rate),
        });
        self.send_metric(name, MetricValue::Count(1), tags, sample_rate)
    }

    /// Decrements a count by one.
    pub fn decr(&self, name: &str, tags: &[String], sample_rate: f64) -> MonitoringResult<()> {
        self.log_call(MetricCall {
            operation: "decr",
            name,
            value: "-1".to_string(),
            tags,
            sample_rate: Some(sample_rate),
        });
        self.send_metric(name, MetricValue::Count(-1), tags, sample_rate)
    }

    /// Sets a gauge to a value. It stays at that value until changed.
    pub fn gauge(
        &self,
        name: &str,
        value: f64,
        tags: &[String],
        sample_rate: f64,
    ) -> MonitoringResult<()> {
        self.log_call(MetricCall {
            operation: "gauge",
            name,
            value: value.to_string(),
            tags,
            sample_rate: Some(sample_rate),
        });
        self.send_metric(name, MetricValue::Gauge(value), tags, sample_rate)
    }

    /// Marks an event with a title and descriptive text.
    pub fn event(&self, title: &str, text: &str) -> MonitoringResult<()> {
        self.log_call(MetricCall {
            operation: "event",
            name: title,
            value: text.to_string(),
            tags: &[],
            sample_rate: None,
        });
        let datagram = protocol::encode_event(title, text, &self.tags);
        self.send(&datagram)
    }

    fn send_metric(
        &self,
        name: &str,
        value: MetricValue,
        tags: &[String],
        sample_rate: f64,
    ) -> MonitoringResult<()> {
        if sample_rate < 1.0 && rand::thread_rng().gen::<f64>() > sample_rate {
            return Ok(());
        }
        let datagram =
            protocol::encode_metric(&self.namespace, name, value, sample_rate, &self.tags, tags);
        self.send(&datagram)
    }

    fn send(&self, datagram: &str) -> MonitoringResult<()> {
        match self.transport.send(datagram) {
            Ok(()) => Ok(()),
            Err(err) => {
                if self.debug {
                    tracing::warn!(error = %err, datagram, "failed to send datagram");
                }
                Err(err)
            }
        }
    }

    fn log_call(&self, call: MetricCall<'_>) {
        if let Some(logger) = &self.logger {
            logger.log_call(&call);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{FailingTransport, RecordingCallLogger, RecordingTransport};
    use pretty_assertions::assert_eq;

    fn recording_monitor(config: MonitorConfig) -> (Monitor, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let monitor = Monitor::with_transport(config, transport.clone()).unwrap();
        (monitor, transport)
    }

    #[test]
    fn test_tags_contain_monitor_id() {
        let (monitor, _) = recording_monitor(MonitorConfig::default());
        assert_eq!(monitor.tags().len(), 1);
        assert_eq!(monitor.tags()[0], format!("monitor-id:{}", monitor.id()));
    }

    #[test]
    fn test_tags_contain_app_when_configured() {
        let (monitor, _) = recording_monitor(MonitorConfig::new().with_app("hello"));
        assert_eq!(monitor.tags().len(), 2);
        assert_eq!(monitor.tags()[1], "app:hello");
    }

    #[test]
    fn test_namespace_appended_to_metric_names() {
        let (monitor, transport) = recording_monitor(MonitorConfig::new().with_app("hello"));
        transport.clear();

        monitor.incr("requests", &[], 1.0).unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("hello.requests:1|c|#monitor-id:"));
    }

    #[test]
    fn test_namespace_normalization_is_idempotent() {
        let (with_dot, _) = recording_monitor(MonitorConfig::new().with_app("hello."));
        let (without_dot, _) = recording_monitor(MonitorConfig::new().with_app("hello"));
        assert_eq!(with_dot.namespace(), "hello.");
        assert_eq!(without_dot.namespace(), "hello.");
    }

    #[test]
    fn test_started_event_emitted_iff_app_configured() {
        let (monitor, with_app) = recording_monitor(MonitorConfig::new().with_app("hello"));
        let sent = with_app.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            format!(
                "_e{{22,22}}:hello monitor started.|hello monitor started.|#monitor-id:{},app:hello",
                monitor.id()
            )
        );

        let (_, without_app) = recording_monitor(MonitorConfig::default());
        assert!(without_app.sent().is_empty());
    }

    #[test]
    fn test_count_encodes_delta_and_tags() {
        let (monitor, transport) = recording_monitor(MonitorConfig::default());

        monitor
            .count("jobs", 5, &["queue:high".to_string()], 1.0)
            .unwrap();

        let sent = transport.sent();
        assert_eq!(
            sent[0],
            format!("jobs:5|c|#monitor-id:{},queue:high", monitor.id())
        );
    }

    #[test]
    fn test_decr_sends_negative_count() {
        let (monitor, transport) = recording_monitor(MonitorConfig::default());

        monitor.decr("jobs", &[], 1.0).unwrap();

        assert_eq!(
            transport.sent()[0],
            format!("jobs:-1|c|#monitor-id:{}", monitor.id())
        );
    }

    #[test]
    fn test_gauge_encodes_value() {
        let (monitor, transport) = recording_monitor(MonitorConfig::default());

        monitor.gauge("queue.depth", 42.0, &[], 1.0).unwrap();

        assert_eq!(
            transport.sent()[0],
            format!("queue.depth:42|g|#monitor-id:{}", monitor.id())
        );
    }

    #[test]
    fn test_event_carries_constant_tags() {
        let (monitor, transport) = recording_monitor(MonitorConfig::default());

        monitor.event("deploy", "version 1.2 live").unwrap();

        assert_eq!(
            transport.sent()[0],
            format!(
                "_e{{6,16}}:deploy|version 1.2 live|#monitor-id:{}",
                monitor.id()
            )
        );
    }

    #[test]
    fn test_zero_sample_rate_skips_send_but_returns_ok() {
        let (monitor, transport) = recording_monitor(MonitorConfig::default());

        for _ in 0..100 {
            monitor.incr("sampled", &[], 0.0).unwrap();
        }

        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_full_sample_rate_always_sends() {
        let (monitor, transport) = recording_monitor(MonitorConfig::default());

        for _ in 0..100 {
            monitor.incr("sampled", &[], 1.0).unwrap();
        }

        assert_eq!(transport.sent().len(), 100);
    }

    #[test]
    fn test_transport_error_propagates_to_caller() {
        let monitor =
            Monitor::with_transport(MonitorConfig::default(), Arc::new(FailingTransport)).unwrap();

        let err = monitor.incr("requests", &[], 1.0).unwrap_err();
        assert!(matches!(err, crate::errors::MonitoringError::Transport(_)));
    }

    #[test]
    fn test_construction_fails_on_invalid_config() {
        let transport = Arc::new(RecordingTransport::new());
        let result = Monitor::with_transport(MonitorConfig::new().with_host(""), transport);
        assert!(result.is_err());
    }

    #[test]
    fn test_call_logger_records_every_operation() {
        let transport = Arc::new(RecordingTransport::new());
        let logger = Arc::new(RecordingCallLogger::new());
        let monitor = Monitor::with_dependencies(
            MonitorConfig::default(),
            transport,
            Some(logger.clone()),
        )
        .unwrap();

        monitor.count("a", 2, &[], 1.0).unwrap();
        monitor.incr("b", &[], 1.0).unwrap();
        monitor.decr("c", &[], 1.0).unwrap();
        monitor.gauge("d", 1.5, &[], 1.0).unwrap();
        monitor.event("e", "text").unwrap();

        let calls = logger.calls();
        let operations: Vec<&str> = calls.iter().map(|c| c.operation.as_str()).collect();
        assert_eq!(operations, vec!["count", "incr", "decr", "gauge", "event"]);
    }

    #[test]
    fn test_call_logger_records_failed_calls_too() {
        let logger = Arc::new(RecordingCallLogger::new());
        let monitor = Monitor::with_dependencies(
            MonitorConfig::default(),
            Arc::new(FailingTransport),
            Some(logger.clone()),
        )
        .unwrap();

        let _ = monitor.incr("requests", &[], 1.0);

        assert_eq!(logger.calls().len(), 1);
    }

    #[test]
    fn test_construction_survives_failed_started_event() {
        // The startup event goes through a failing transport; construction
        // must still succeed.
        let monitor = Monitor::with_transport(
            MonitorConfig::new().with_app("hello"),
            Arc::new(FailingTransport),
        );
        assert!(monitor.is_ok());
    }
}
