//! Configuration constants.
//!
//! Bounds and defaults shared by the request pipeline and the reachability probe.

use std::time::Duration;

/// Maximum number of consecutive redirects followed for one request.
///
/// A chain of exactly this many redirects succeeds; one more `Location`
/// header fails the request with `RequestError::RedirectLoop`.
pub const MAX_REDIRECTS: usize = 10;

/// Timeout applied to the single GET issued by the reachability probe.
pub const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(2);

/// Default User-Agent string sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("remote_http_testing/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the default base server URL.
pub const SERVER_ENV_VAR: &str = "REMOTE_HTTP_TESTING_SERVER";

/// Environment variable holding an optional per-request timeout, in seconds.
pub const TIMEOUT_ENV_VAR: &str = "REMOTE_HTTP_TESTING_TIMEOUT_SECS";
