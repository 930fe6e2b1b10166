//! Error handling.
//!
//! This module provides:
//! - Error type definitions for requests and initialization
//! - Categorization of `reqwest` failures into those types
//!
//! Errors are categorized into:
//! - **Configuration**: no base server, malformed settings or URLs
//! - **Network**: connection refused, timeouts, other transport failures
//! - **Protocol**: redirect chains that exceed the bound
//! - **Access**: reading a response or JSON view that does not exist

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, server_identity};
pub use types::{InitializationError, RequestError};
