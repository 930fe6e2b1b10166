//! `reqwest`-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace};

use super::Transport;
use crate::config::SessionConfig;
use crate::error_handling::{categorize_reqwest_error, InitializationError, RequestError};
use crate::initialization::init_client;
use crate::request::{Method, RequestDescriptor};
use crate::response::RawResponse;

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Delete => reqwest::Method::DELETE,
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Sends requests over the network with a `reqwest::Client`.
///
/// The client never follows redirects on its own.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: &SessionConfig) -> Result<Self, InitializationError> {
        Ok(Self::from_client(init_client(config)?))
    }

    /// Wraps an existing client. It should have redirects disabled.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        timeout: Option<Duration>,
    ) -> Result<RawResponse, RequestError> {
        debug!("{} {}", request.method(), request.url());

        let mut builder = self
            .client
            .request(request.method().into(), request.url());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(e, request.url()))?;

        let status = response.status().as_u16();
        trace!("Response version: {:?}", response.version());
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| categorize_reqwest_error(e, request.url()))?;
        debug!("{} {} -> {} ({} bytes)", request.method(), request.url(), status, body.len());

        Ok(RawResponse::new(status, headers, body.to_vec()))
    }
}
