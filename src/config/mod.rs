//! Configuration types for the monitoring integration.
//!
//! Both components are configured at construction time only; there is no
//! runtime reconfiguration surface.

use crate::errors::{MonitoringError, MonitoringResult};

/// Default hostname of the metrics agent.
pub const DEFAULT_AGENT_HOST: &str = "datadog-agent";

/// Default DogStatsD port of the metrics agent.
pub const DEFAULT_AGENT_PORT: u16 = 8125;

/// Configuration for the [`Monitor`](crate::Monitor) metrics client.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Name of the application using the monitor.
    ///
    /// When set, it becomes the metric namespace, an `app:<name>` tag on
    /// every metric, and triggers a "monitor started." event on
    /// construction.
    pub app: Option<String>,

    /// Hostname of the metrics agent (default: `datadog-agent`).
    pub host: String,

    /// DogStatsD port of the metrics agent (default: `8125`).
    pub port: u16,

    /// When set, per-call transport failures are logged before being
    /// returned to the caller.
    pub debug: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            app: None,
            host: DEFAULT_AGENT_HOST.to_string(),
            port: DEFAULT_AGENT_PORT,
            debug: false,
        }
    }
}

impl MonitorConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// Reads `DD_AGENT_HOST`, `DD_DOGSTATSD_PORT`, and `DD_APP_NAME`;
    /// unset variables keep their defaults.
    pub fn from_env() -> MonitoringResult<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("DD_AGENT_HOST") {
            config.host = host;
        }

        if let Ok(port) = std::env::var("DD_DOGSTATSD_PORT") {
            config.port = port.parse::<u16>().map_err(|_| {
                MonitoringError::configuration(format!("invalid DD_DOGSTATSD_PORT: {}", port))
            })?;
        }

        if let Ok(app) = std::env::var("DD_APP_NAME") {
            if !app.is_empty() {
                config.app = Some(app);
            }
        }

        Ok(config)
    }

    /// Sets the application name.
    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    /// Sets the agent hostname.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the agent port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables debug logging of transport failures.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> MonitoringResult<()> {
        if self.host.is_empty() {
            return Err(MonitoringError::configuration("agent host must not be empty"));
        }
        if self.port == 0 {
            return Err(MonitoringError::configuration("agent port must not be zero"));
        }
        Ok(())
    }

    /// Returns the agent address as `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the metric namespace derived from the application name.
    ///
    /// The namespace always carries a single trailing `.` separator:
    /// `hello` and `hello.` both yield `hello.`. Returns an empty string
    /// when no application name is set.
    pub fn namespace(&self) -> String {
        match self.app.as_deref() {
            Some(app) if !app.is_empty() => {
                let app = app.trim_end_matches('.');
                format!("{}.", app)
            }
            _ => String::new(),
        }
    }
}

/// Configuration for the [`StackdriverFormatter`](crate::StackdriverFormatter).
#[derive(Debug, Clone, Default)]
pub struct FormatterConfig {
    /// Logical service name reported in `serviceContext.service`.
    pub service: String,

    /// Service version reported in `serviceContext.version`.
    pub version: String,

    /// Module-path prefixes excluded when resolving the call site of an
    /// error-severity record.
    ///
    /// Used to skip logging-wrapper frames so the reported location is the
    /// real caller, not the wrapper.
    pub skip_prefixes: Vec<String>,
}

impl FormatterConfig {
    /// Creates a configuration for the given service and version.
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            skip_prefixes: Vec::new(),
        }
    }

    /// Adds a module-path prefix to skip during call-site resolution.
    pub fn with_skip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.skip_prefixes.push(prefix.into());
        self
    }
}
