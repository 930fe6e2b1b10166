//! Session state and verb calls.

use std::sync::OnceLock;

use log::{debug, info};

use super::ServerOverride;
use crate::config::SessionConfig;
use crate::error_handling::{InitializationError, RequestError};
use crate::probe::{check_reachable, fail_fast, is_reachable_with};
use crate::request::{build_request, Method, RequestBody, RequestDescriptor};
use crate::response::{normalize, ResponseValue};
use crate::transport::{send, HttpTransport, Transport};

/// State for one test case talking to a remote server.
///
/// Every verb call clears `last_request` and `last_response` before doing
/// anything else, so a failed call never leaves the previous response behind.
/// A response is only stored together with the request that produced it.
///
/// ```no_run
/// use remote_http_testing::{Session, SessionConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let mut session = Session::new(SessionConfig::default().with_server("http://localhost:3000"))?;
/// session.get("/index.json", &[("page", "2")]).await?;
/// assert_eq!(session.response()?.status_code, 200);
/// let items = session.json_response()?;
/// assert!(items.is_array());
/// # Ok(())
/// # }
/// ```
pub struct Session<T: Transport = HttpTransport> {
    config: SessionConfig,
    transport: T,
    extra_headers: Vec<(String, String)>,
    pub(super) temporary_server: Option<String>,
    last_request: Option<RequestDescriptor>,
    last_response: Option<ResponseValue>,
    json_view: OnceLock<serde_json::Value>,
}

impl Session<HttpTransport> {
    /// Creates a session that talks to the network through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: SessionConfig) -> Result<Self, InitializationError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Session<T> {
    /// Creates a session over a caller-supplied transport.
    pub fn with_transport(config: SessionConfig, transport: T) -> Self {
        let extra_headers = config.headers.clone();
        Self {
            config,
            transport,
            extra_headers,
            temporary_server: None,
            last_request: None,
            last_response: None,
            json_view: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn last_request(&self) -> Option<&RequestDescriptor> {
        self.last_request.as_ref()
    }

    pub fn last_response(&self) -> Option<&ResponseValue> {
        self.last_response.as_ref()
    }

    /// The last response, or `RequestError::NoResponse` if there is none.
    pub fn response(&self) -> Result<&ResponseValue, RequestError> {
        self.last_response.as_ref().ok_or(RequestError::NoResponse)
    }

    /// The last response body parsed as JSON.
    ///
    /// Parsed at most once per response; the next request discards it.
    ///
    /// # Errors
    ///
    /// `RequestError::NoResponse` without a response, `RequestError::Json`
    /// if the body does not parse.
    pub fn json_response(&self) -> Result<&serde_json::Value, RequestError> {
        let response = self.response()?;
        if let Some(value) = self.json_view.get() {
            return Ok(value);
        }
        let value = serde_json::from_str(&response.body)?;
        Ok(self.json_view.get_or_init(|| value))
    }

    /// Headers added to every request.
    pub fn headers(&self) -> &[(String, String)] {
        &self.extra_headers
    }

    /// Replaces the headers added to every request.
    pub fn set_headers<I, K, V>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extra_headers = headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
    }

    /// Adds one header field to every request. Existing fields with the same
    /// name are kept; both are sent.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.extra_headers.push((name.into(), value.into()));
    }

    pub fn clear_headers(&mut self) {
        self.extra_headers.clear();
    }

    /// The temporary server if one is set, else the configured server.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Configuration` when neither is available.
    pub fn current_server(&self) -> Result<&str, RequestError> {
        self.temporary_server
            .as_deref()
            .or(self.config.server.as_deref())
            .ok_or_else(|| {
                RequestError::Configuration(
                    "no server configured; set SessionConfig::server or REMOTE_HTTP_TESTING_SERVER"
                        .to_string(),
                )
            })
    }

    /// Sends requests to `server` until the returned guard is dropped.
    pub fn use_server(&mut self, server: impl Into<String>) -> ServerOverride<'_, T> {
        ServerOverride::new(self, server.into())
    }

    /// Runs `f` with requests going to `server`, then restores the configured
    /// server, even if `f` panics.
    pub fn with_temporary_server<R, F>(&mut self, server: impl Into<String>, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        let mut guard = self.use_server(server);
        f(&mut *guard)
    }

    pub async fn get(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<&ResponseValue, RequestError> {
        self.perform_request(Method::Get, path, params, RequestBody::Empty)
            .await
    }

    pub async fn delete(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<&ResponseValue, RequestError> {
        self.perform_request(Method::Delete, path, params, RequestBody::Empty)
            .await
    }

    /// POST with `params` in the query string and `body` as the payload.
    ///
    /// `body` is a raw payload (`&str`, `String`, bytes) or a
    /// [`RequestBody::form`] mapping.
    pub async fn post(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        body: impl Into<RequestBody>,
    ) -> Result<&ResponseValue, RequestError> {
        self.perform_request(Method::Post, path, params, body).await
    }

    pub async fn put(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        body: impl Into<RequestBody>,
    ) -> Result<&ResponseValue, RequestError> {
        self.perform_request(Method::Put, path, params, body).await
    }

    pub async fn patch(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        body: impl Into<RequestBody>,
    ) -> Result<&ResponseValue, RequestError> {
        self.perform_request(Method::Patch, path, params, body).await
    }

    /// Sends one request to the current server and stores the outcome.
    ///
    /// # Errors
    ///
    /// - `RequestError::Configuration` if no server is available
    /// - `RequestError::InvalidUrl` if `server + path` is not absolute
    /// - `RequestError::Connection` if the server cannot be reached
    /// - `RequestError::RedirectLoop` past the redirect bound
    /// - other transport failures
    pub async fn perform_request<K, V>(
        &mut self,
        method: Method,
        path: &str,
        params: &[(K, V)],
        body: impl Into<RequestBody>,
    ) -> Result<&ResponseValue, RequestError>
    where
        K: AsRef<str>,
        V: ToString,
    {
        self.last_request = None;
        self.last_response = None;
        self.json_view.take();

        let server = self.current_server()?;
        let request = build_request(
            server,
            method,
            path,
            params,
            body.into(),
            &self.extra_headers,
            &self.config.user_agent,
        )?;
        debug!("Performing {} {}", request.method(), request.url());

        let request: &RequestDescriptor = self.last_request.insert(request);
        let followed = send(
            &self.transport,
            request,
            self.config.max_redirects,
            self.config.request_timeout,
        )
        .await?;
        if followed.redirects > 0 {
            info!(
                "{} {} redirected {} time(s) to {}",
                request.method(),
                request.url(),
                followed.redirects,
                followed.url
            );
        }

        let response = normalize(followed.response, &followed.url, followed.redirects);
        Ok(&*self.last_response.insert(response))
    }

    /// True if `server_url` answers a GET with 200 within two seconds.
    ///
    /// The probe goes through this session's transport and carries its
    /// headers; it never touches `last_request` or `last_response`.
    pub async fn server_reachable(&self, server_url: &str) -> bool {
        is_reachable_with(&self.transport, server_url, &self.probe_headers()).await
    }

    /// Exits the process with status 1 unless `server_url` is reachable.
    pub async fn ensure_reachable(&self, server_url: &str, display_name: Option<&str>) {
        if let Err(e) =
            check_reachable(&self.transport, server_url, display_name, &self.probe_headers()).await
        {
            fail_fast(e);
        }
    }

    fn probe_headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::with_capacity(self.extra_headers.len() + 1);
        if !self
            .extra_headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("user-agent"))
        {
            headers.push(("User-Agent".to_string(), self.config.user_agent.clone()));
        }
        headers.extend(self.extra_headers.iter().cloned());
        headers
    }
}
