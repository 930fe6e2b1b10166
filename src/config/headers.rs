//! HTTP header name and value constants.

/// Content type attached to form-encoded request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content-Type header name, as used when checking caller-supplied headers.
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// Parameter of the Content-Type header naming the body's character set.
pub const CHARSET_PARAM: &str = "charset";
