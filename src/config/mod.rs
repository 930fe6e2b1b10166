//! Session configuration and constants.
//!
//! This module provides:
//! - Configuration constants (redirect bound, probe timeout, env var names)
//! - HTTP header name constants
//! - `SessionConfig` and the logging option types

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{LogFormat, LogLevel, SessionConfig};
