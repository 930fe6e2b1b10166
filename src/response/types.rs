//! Response data structures.

use std::collections::HashMap;

/// One HTTP exchange as received from the wire, before normalization.
///
/// Header names keep whatever case the transport reports; the order and any
/// duplicate fields are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// First non-empty `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, value)| name.eq_ignore_ascii_case("location") && !value.trim().is_empty())
            .map(|(_, value)| value.trim())
    }
}

/// Normalized response stored as the session's `last_response`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseValue {
    /// Status code of the final response in the redirect chain.
    pub status_code: u16,
    /// Headers flattened to one value per name; the last field wins.
    pub headers: HashMap<String, String>,
    /// Body text decoded with the charset named by `Content-Type`.
    pub body: String,
    /// URL that produced this response, after following redirects.
    pub url: String,
    /// Number of redirects followed to reach `url`.
    pub redirects: usize,
}

impl ResponseValue {
    /// Header value by name, compared case-insensitively.
    ///
    /// `headers` itself is keyed exactly as the transport reported the names.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// True if the body contains `needle`.
    pub fn body_contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }
}
