//! remote_http_testing library: test helpers for remote HTTP servers
//!
//! This library lets a test suite exercise a server running elsewhere (not an
//! in-process application) with an API shaped like an in-process testing
//! helper: issue a verb call, then inspect `last_request` / `last_response`.
//!
//! # Example
//!
//! ```no_run
//! use remote_http_testing::{Session, SessionConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SessionConfig::from_env()?.with_server("http://localhost:3000");
//! let mut session = Session::new(config)?;
//! session.ensure_reachable("http://localhost:3000", Some("API")).await;
//!
//! session.get("/index.json", &[("page", "1")]).await?;
//! assert_eq!(session.response()?.status_code, 200);
//! assert!(session.response()?.body_contains("id"));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::test]` in your suite
//! or call the session from within an async context.

pub mod config;
mod error_handling;
pub mod initialization;
mod probe;
mod request;
mod response;
mod session;
mod transport;

// Re-export public API
pub use config::{LogFormat, LogLevel, SessionConfig};
pub use error_handling::{
    categorize_reqwest_error, server_identity, InitializationError, RequestError,
};
pub use probe::{
    check_reachable, ensure_reachable, is_reachable, is_reachable_with, server_description,
};
pub use request::{build_request, encode_query, Method, RequestBody, RequestDescriptor};
pub use response::{charset_from_content_type, decode_body, normalize, RawResponse, ResponseValue};
pub use session::{ServerOverride, Session};
pub use transport::{send, FollowedResponse, HttpTransport, Transport};
