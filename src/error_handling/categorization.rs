//! Error categorization.
//!
//! Maps transport-level `reqwest` failures onto the request error taxonomy.

use super::types::RequestError;

/// Categorizes a `reqwest::Error` raised while requesting `url`.
///
/// - Connect failures (refused, unreachable, DNS) become `Connection`,
///   carrying the target server for diagnostics.
/// - Timeouts become `Timeout`.
/// - Everything else is wrapped as `Transport`.
pub fn categorize_reqwest_error(error: reqwest::Error, url: &str) -> RequestError {
    if error.is_connect() {
        RequestError::Connection {
            server: server_identity(url),
            reason: root_cause(&error),
        }
    } else if error.is_timeout() {
        RequestError::Timeout {
            url: url.to_string(),
        }
    } else {
        RequestError::Transport(error)
    }
}

/// Returns `scheme://host[:port]` for `url`, or the URL itself if it does not parse.
pub fn server_identity(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) if parsed.has_host() => parsed.origin().ascii_serialization(),
        _ => url.to_string(),
    }
}

// reqwest wraps the io error a few levels deep; the innermost message is the useful one
fn root_cause(error: &reqwest::Error) -> String {
    let mut current: &dyn std::error::Error = error;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}
