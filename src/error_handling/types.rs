//! Error type definitions.
//!
//! This module defines the failures a request, a reachability check or
//! start-up can produce.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failures surfaced by the request pipeline.
///
/// Everything except the reachability probe propagates these to the caller;
/// the probe folds them into `false`.
#[derive(Error, Debug)]
pub enum RequestError {
    /// No base server URL is available, or the configuration is malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request URL could not be parsed as an absolute URL.
    #[error("Invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The TCP connection was refused or could not be established.
    #[error("Unable to connect to {server}: {reason}")]
    Connection { server: String, reason: String },

    /// The request did not complete within its timeout.
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// The redirect chain exceeded the configured bound.
    #[error("Too many redirects; last location was {location}")]
    RedirectLoop { location: String },

    /// Any other transport failure.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] ReqwestError),

    /// The reachability check failed.
    #[error("Unable to connect to {0}")]
    Unreachable(String),

    /// No request was made yet, or no response was returned.
    #[error("No request was made yet, or no response was returned")]
    NoResponse,

    /// The last response body is not valid JSON.
    #[error("Response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
