//! Server reachability checks.
//!
//! A probe is a single GET with a short timeout. It never follows redirects
//! and never propagates errors: anything other than a `200 OK` within
//! [`REACHABILITY_TIMEOUT`] counts as unreachable.

use log::{debug, error, info};

use crate::config::{SessionConfig, DEFAULT_USER_AGENT, REACHABILITY_TIMEOUT};
use crate::error_handling::RequestError;
use crate::request::{build_request, Method, RequestBody};
use crate::transport::{HttpTransport, Transport};

const NO_PARAMS: [(&str, &str); 0] = [];

/// True if `server_url` answers a GET with status 200 within two seconds.
pub async fn is_reachable(server_url: &str) -> bool {
    match HttpTransport::new(&SessionConfig::default()) {
        Ok(transport) => is_reachable_with(&transport, server_url, &[]).await,
        Err(e) => {
            debug!("Could not build HTTP client for reachability probe: {e}");
            false
        }
    }
}

/// Same as [`is_reachable`], through any transport and with extra headers.
pub async fn is_reachable_with<T>(
    transport: &T,
    server_url: &str,
    headers: &[(String, String)],
) -> bool
where
    T: Transport + ?Sized,
{
    let request = match build_request(
        server_url,
        Method::Get,
        "",
        &NO_PARAMS,
        RequestBody::Empty,
        headers,
        DEFAULT_USER_AGENT,
    ) {
        Ok(request) => request,
        Err(e) => {
            debug!("Reachability probe for {server_url} not sent: {e}");
            return false;
        }
    };

    match transport.execute(&request, Some(REACHABILITY_TIMEOUT)).await {
        Ok(response) if response.status == 200 => true,
        Ok(response) => {
            debug!(
                "Reachability probe for {server_url} returned status {}",
                response.status
            );
            false
        }
        Err(e) => {
            debug!("Reachability probe for {server_url} failed: {e}");
            false
        }
    }
}

/// Names a server for diagnostics: `"{display_name} at {url}"`, or just the URL.
pub fn server_description(server_url: &str, display_name: Option<&str>) -> String {
    match display_name {
        Some(name) => format!("{name} at {server_url}"),
        None => server_url.to_string(),
    }
}

/// Probes `server_url` and reports failure as an error instead of exiting.
///
/// # Errors
///
/// Returns `RequestError::Unreachable` with the description from
/// [`server_description`].
pub async fn check_reachable<T>(
    transport: &T,
    server_url: &str,
    display_name: Option<&str>,
    headers: &[(String, String)],
) -> Result<(), RequestError>
where
    T: Transport + ?Sized,
{
    if is_reachable_with(transport, server_url, headers).await {
        info!("{} is reachable", server_description(server_url, display_name));
        Ok(())
    } else {
        Err(RequestError::Unreachable(server_description(
            server_url,
            display_name,
        )))
    }
}

/// Exits the process with status 1 unless `server_url` is reachable.
///
/// Meant for the start of a suite: running every test against a dead server
/// only produces a wall of misleading failures. Prints
/// `FAIL: Unable to connect to ...` on stdout before exiting.
pub async fn ensure_reachable(server_url: &str, display_name: Option<&str>) {
    let transport = match HttpTransport::new(&SessionConfig::default()) {
        Ok(transport) => transport,
        Err(e) => {
            debug!("Could not build HTTP client for reachability probe: {e}");
            fail_fast(RequestError::Unreachable(server_description(
                server_url,
                display_name,
            )))
        }
    };
    if let Err(e) = check_reachable(&transport, server_url, display_name, &[]).await {
        fail_fast(e);
    }
}

pub(crate) fn fail_fast(error: RequestError) -> ! {
    error!("{error}");
    println!("FAIL: {error}");
    std::process::exit(1)
}
