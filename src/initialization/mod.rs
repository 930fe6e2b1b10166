//! Resource initialization.
//!
//! This module provides functions to initialize shared resources:
//! - The HTTP client behind `HttpTransport`
//! - The logger (plain or JSON, plus a quiet variant for test suites)
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::{init_logger_with, init_test_logger};
