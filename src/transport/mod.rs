//! Request transport.
//!
//! This module handles:
//! - The `Transport` seam: one HTTP exchange per call, swappable in tests
//! - `HttpTransport`, the `reqwest` implementation with redirects disabled
//! - Following redirect chains manually under a hop bound

mod http;
mod redirects;

#[cfg(test)]
pub(crate) mod scripted;

use std::time::Duration;

use async_trait::async_trait;

use crate::error_handling::RequestError;
use crate::request::RequestDescriptor;
use crate::response::RawResponse;

pub use http::HttpTransport;
pub use redirects::{send, FollowedResponse};

/// Performs exactly one HTTP exchange.
///
/// Implementations must not follow redirects themselves; [`send`] does that
/// so the hop bound applies to every transport. A `timeout` of `None` means
/// no per-request timeout beyond whatever the implementation defaults to.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        timeout: Option<Duration>,
    ) -> Result<RawResponse, RequestError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        timeout: Option<Duration>,
    ) -> Result<RawResponse, RequestError> {
        (**self).execute(request, timeout).await
    }
}
