//! Configuration types.
//!
//! This module defines the session configuration and the enums used for
//! command-line logging options.

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_USER_AGENT, MAX_REDIRECTS, SERVER_ENV_VAR, TIMEOUT_ENV_VAR,
};
use crate::error_handling::RequestError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Configuration for a [`Session`](crate::Session).
///
/// # Examples
///
/// ```
/// use remote_http_testing::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_server("http://localhost:3000")
///     .with_header("X-Api-Key", "secret");
/// assert_eq!(config.server.as_deref(), Some("http://localhost:3000"));
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base server URL prepended to every request path (e.g. `http://localhost:3000`)
    pub server: Option<String>,

    /// Headers added to every request, one field per entry
    pub headers: Vec<(String, String)>,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Timeout for ordinary requests; `None` leaves it to the platform
    pub request_timeout: Option<Duration>,

    /// Redirect bound for one request
    pub max_redirects: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            server: None,
            headers: Vec::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: None,
            max_redirects: MAX_REDIRECTS,
        }
    }
}

impl SessionConfig {
    /// Builds a configuration from the process environment.
    ///
    /// Reads the base server from `REMOTE_HTTP_TESTING_SERVER` and an optional
    /// request timeout (whole seconds) from `REMOTE_HTTP_TESTING_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Configuration` if the timeout is not a number.
    pub fn from_env() -> Result<Self, RequestError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, RequestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.server = lookup(SERVER_ENV_VAR).filter(|s| !s.trim().is_empty());
        if let Some(raw) = lookup(TIMEOUT_ENV_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                RequestError::Configuration(format!(
                    "{TIMEOUT_ENV_VAR} must be a whole number of seconds, got {raw:?}"
                ))
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Sets the base server URL.
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Appends a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the timeout for ordinary requests.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the User-Agent header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
