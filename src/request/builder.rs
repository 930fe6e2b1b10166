//! Request building.
//!
//! Turns a verb, server, path, query params and body into an immutable
//! [`RequestDescriptor`]. Nothing here performs I/O.

use strum_macros::{Display, EnumIter};
use url::form_urlencoded;

use super::query::encode_query;
use crate::config::{FORM_CONTENT_TYPE, HEADER_CONTENT_TYPE};
use crate::error_handling::RequestError;

/// HTTP verbs supported by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Delete,
    Get,
    Post,
    Put,
    Patch,
}

/// Body attached to a request.
///
/// A `Form` body is form-url-encoded when the request is built. A raw body is
/// sent byte for byte; it replaces form encoding because a request carries
/// exactly one body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    Raw(Vec<u8>),
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Builds a form body from key/value pairs, keeping their order.
    pub fn form<K, V>(pairs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: ToString,
    {
        RequestBody::Form(
            pairs
                .iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl From<&str> for RequestBody {
    fn from(body: &str) -> Self {
        RequestBody::Raw(body.as_bytes().to_vec())
    }
}

impl From<String> for RequestBody {
    fn from(body: String) -> Self {
        RequestBody::Raw(body.into_bytes())
    }
}

impl From<&[u8]> for RequestBody {
    fn from(body: &[u8]) -> Self {
        RequestBody::Raw(body.to_vec())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(body: Vec<u8>) -> Self {
        RequestBody::Raw(body)
    }
}

impl<T: Into<RequestBody>> From<Option<T>> for RequestBody {
    fn from(body: Option<T>) -> Self {
        body.map_or(RequestBody::Empty, Into::into)
    }
}

/// A fully built request: method, absolute URL, ordered headers, optional body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    pub(crate) fn new(
        method: Method,
        url: String,
        headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Absolute URL including the appended query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Header fields in the order they were added, duplicates included.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Body decoded as UTF-8 (lossy), for assertions and log lines.
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Builds a request descriptor.
///
/// `server` and `path` are concatenated as-is; slashes are the caller's
/// concern. `params` become query string pairs for every verb. Headers are,
/// in order: `User-Agent` (unless `extra_headers` sets one), every entry of
/// `extra_headers` (duplicates kept), then `Content-Type` for form bodies
/// (unless `extra_headers` sets one).
///
/// # Errors
///
/// Returns `RequestError::InvalidUrl` when `server + path` is not an
/// absolute URL.
pub fn build_request<K, V>(
    server: &str,
    method: Method,
    path: &str,
    params: &[(K, V)],
    body: RequestBody,
    extra_headers: &[(String, String)],
    user_agent: &str,
) -> Result<RequestDescriptor, RequestError>
where
    K: AsRef<str>,
    V: ToString,
{
    let joined = format!("{server}{path}");
    if let Err(source) = url::Url::parse(&joined) {
        return Err(RequestError::InvalidUrl {
            url: joined,
            source,
        });
    }
    let url = encode_query(&joined, params);

    let has_header = |name: &str| {
        extra_headers
            .iter()
            .any(|(key, _)| key.eq_ignore_ascii_case(name))
    };

    let mut headers = Vec::with_capacity(extra_headers.len() + 2);
    if !has_header("User-Agent") {
        headers.push(("User-Agent".to_string(), user_agent.to_string()));
    }
    headers.extend(extra_headers.iter().cloned());

    let body = match body {
        RequestBody::Empty => None,
        RequestBody::Raw(bytes) => Some(bytes),
        RequestBody::Form(pairs) => {
            if !has_header(HEADER_CONTENT_TYPE) {
                headers.push((HEADER_CONTENT_TYPE.to_string(), FORM_CONTENT_TYPE.to_string()));
            }
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs.iter())
                .finish();
            Some(encoded.into_bytes())
        }
    };

    Ok(RequestDescriptor::new(method, url, headers, body))
}
