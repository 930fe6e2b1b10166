//! HTTP redirect chain following.
//!
//! Redirects are followed manually so the hop bound is enforced the same way
//! for every transport, and so the final URL and hop count are known.

use std::time::Duration;

use log::{debug, warn};
use url::Url;

use super::Transport;
use crate::error_handling::{server_identity, RequestError};
use crate::request::{Method, RequestDescriptor};
use crate::response::RawResponse;

// Dropped from a hop that leaves the origin, as reqwest's own redirect policy does
const CREDENTIAL_HEADERS: [&str; 4] = [
    "authorization",
    "cookie",
    "proxy-authorization",
    "www-authenticate",
];

/// Final response of a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowedResponse {
    pub response: RawResponse,
    /// URL of the request that produced `response`.
    pub url: String,
    /// Number of redirects followed.
    pub redirects: usize,
}

/// Sends `request` and follows any redirects, up to `max_redirects` hops.
///
/// Any response carrying a `Location` header is treated as a redirect,
/// whatever its status code. Each hop is a fresh GET to the location
/// (resolved against the current URL) with the original headers minus the
/// body-describing ones; the method and body are not carried over. A hop to
/// another origin also loses the credential headers.
///
/// # Errors
///
/// - `RequestError::RedirectLoop` naming the offending location when a
///   response still carries `Location` after `max_redirects` hops
/// - `RequestError::InvalidUrl` when a location cannot be resolved
/// - any error from the transport, unchanged
pub async fn send<T>(
    transport: &T,
    request: &RequestDescriptor,
    max_redirects: usize,
    timeout: Option<Duration>,
) -> Result<FollowedResponse, RequestError>
where
    T: Transport + ?Sized,
{
    let mut current_url = request.url().to_string();
    let mut response = transport.execute(request, timeout).await?;
    let mut remaining = max_redirects;

    while let Some(location) = response.location() {
        if remaining == 0 {
            warn!(
                "Giving up on {} after {} redirects; next location was {}",
                request.url(),
                max_redirects,
                location
            );
            return Err(RequestError::RedirectLoop {
                location: location.to_string(),
            });
        }
        remaining -= 1;

        let next_url = resolve_location(&current_url, location)?;
        debug!(
            "Redirect {} ({}) from {} to {}",
            max_redirects - remaining,
            response.status,
            current_url,
            next_url
        );

        let cross_origin = server_identity(&next_url) != server_identity(&current_url);
        let hop = redirect_request(request, next_url.clone(), cross_origin);
        response = transport.execute(&hop, timeout).await?;
        current_url = next_url;
    }

    Ok(FollowedResponse {
        response,
        url: current_url,
        redirects: max_redirects - remaining,
    })
}

/// Resolves a `Location` value, which may be relative, against `current`.
fn resolve_location(current: &str, location: &str) -> Result<String, RequestError> {
    let base = Url::parse(current).map_err(|source| RequestError::InvalidUrl {
        url: current.to_string(),
        source,
    })?;
    base.join(location)
        .map(|url| url.to_string())
        .map_err(|source| RequestError::InvalidUrl {
            url: location.to_string(),
            source,
        })
}

fn redirect_request(
    original: &RequestDescriptor,
    url: String,
    cross_origin: bool,
) -> RequestDescriptor {
    let headers = original
        .headers()
        .iter()
        .filter(|(name, _)| {
            !name.eq_ignore_ascii_case("content-type") && !name.eq_ignore_ascii_case("content-length")
        })
        .filter(|(name, _)| {
            !cross_origin
                || !CREDENTIAL_HEADERS
                    .iter()
                    .any(|credential| name.eq_ignore_ascii_case(credential))
        })
        .cloned()
        .collect();
    RequestDescriptor::new(Method::Get, url, headers, None)
}
