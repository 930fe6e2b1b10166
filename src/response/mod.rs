//! HTTP response handling.
//!
//! This module defines the raw and normalized response shapes and the
//! normalizer that converts one into the other.

mod normalize;
mod types;

pub use normalize::{charset_from_content_type, decode_body, normalize};
pub use types::{RawResponse, ResponseValue};
