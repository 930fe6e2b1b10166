//! Response normalization.
//!
//! Converts a [`RawResponse`] into a [`ResponseValue`]: headers are flattened
//! and the body is decoded using the charset announced by `Content-Type`.

use std::collections::HashMap;

use encoding_rs::Encoding;
use log::debug;

use super::types::{RawResponse, ResponseValue};
use crate::config::CHARSET_PARAM;

/// Normalizes a raw response received from `url` after `redirects` hops.
///
/// Status is copied untouched. Duplicate header names collapse to the last
/// value. The body is decoded with the `charset=` parameter of the last
/// `Content-Type` header; without one, or with a label `encoding_rs` does not
/// know, it is read as UTF-8 with invalid sequences replaced.
pub fn normalize(raw: RawResponse, url: &str, redirects: usize) -> ResponseValue {
    let RawResponse {
        status,
        headers: header_list,
        body,
    } = raw;

    let charset = header_list
        .iter()
        .rev()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .and_then(|(_, value)| charset_from_content_type(value))
        .map(str::to_string);

    let headers: HashMap<String, String> = header_list.into_iter().collect();
    let body = decode_body(&body, charset.as_deref());

    ResponseValue {
        status_code: status,
        headers,
        body,
        url: url.to_string(),
        redirects,
    }
}

/// Extracts the `charset` parameter from a `Content-Type` value.
///
/// The parameter name is matched case-insensitively and surrounding quotes are
/// stripped: `text/html; Charset="ISO-8859-1"` yields `ISO-8859-1`.
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case(CHARSET_PARAM) {
            return None;
        }
        let value = value.trim().trim_matches('"').trim();
        (!value.is_empty()).then_some(value)
    })
}

// WHATWG maps these labels to windows-1252; servers naming them mean the real table
const LATIN1_LABELS: [&str; 5] = ["iso-8859-1", "iso8859-1", "iso_8859-1", "latin1", "l1"];

/// Decodes `bytes` using the encoding labelled `charset`, falling back to UTF-8.
///
/// ISO-8859-1 labels decode byte for byte to U+0000..U+00FF, so 0x80..0x9F
/// stay C1 controls instead of becoming windows-1252 punctuation.
pub fn decode_body(bytes: &[u8], charset: Option<&str>) -> String {
    if charset.is_some_and(is_latin1_label) {
        return encoding_rs::mem::decode_latin1(bytes).into_owned();
    }

    let encoding = match charset {
        Some(label) => match Encoding::for_label(label.as_bytes()) {
            Some(encoding) => encoding,
            None => {
                debug!("Unknown charset {label:?}, decoding body as UTF-8");
                encoding_rs::UTF_8
            }
        },
        None => encoding_rs::UTF_8,
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        debug!(
            "Body contained bytes invalid in {}, replaced with U+FFFD",
            encoding.name()
        );
    }
    text.into_owned()
}

fn is_latin1_label(label: &str) -> bool {
    let label = label.trim();
    LATIN1_LABELS
        .iter()
        .any(|known| label.eq_ignore_ascii_case(known))
}
