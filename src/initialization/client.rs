//! HTTP client initialization.
//!
//! This module provides the function that builds the `reqwest` client behind
//! [`HttpTransport`](crate::HttpTransport).

use reqwest::ClientBuilder;

use crate::config::SessionConfig;

/// Initializes the HTTP client used for session requests.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Request timeout from the config, if any
/// - Redirect following disabled, so redirects are followed (and counted) manually
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &SessionConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(config.user_agent.clone());
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
