//! Request construction.
//!
//! This module handles:
//! - Appending query parameters to a URL
//! - Building immutable request descriptors from verb, URL, params and body

mod builder;
mod query;

pub use builder::{build_request, Method, RequestBody, RequestDescriptor};
pub use query::encode_query;
