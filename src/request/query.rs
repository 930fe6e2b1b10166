//! Query string encoding.

use url::form_urlencoded;

/// Appends `params` to `base_url` as query string pairs.
///
/// Keys and values are escaped with `application/x-www-form-urlencoded`
/// rules (space becomes `+`). Pairs keep the caller's order. If `base_url`
/// has no query the pairs are introduced with `?`; an empty existing query
/// (`http://host/path?`) is filled in; otherwise the pairs are appended with
/// `&`. A fragment, if any, stays at the end.
///
/// An empty `params` returns `base_url` unchanged.
///
/// ```
/// use remote_http_testing::encode_query;
///
/// assert_eq!(
///     encode_query("http://example.com/search?lang=en", &[("q", "a b"), ("page", "2")]),
///     "http://example.com/search?lang=en&q=a+b&page=2"
/// );
/// ```
pub fn encode_query<K, V>(base_url: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: ToString,
{
    if params.is_empty() {
        return base_url.to_string();
    }

    let pairs = params
        .iter()
        .map(|(key, value)| format!("{}={}", escape(key.as_ref()), escape(&value.to_string())))
        .collect::<Vec<_>>()
        .join("&");

    let (head, fragment) = match base_url.find('#') {
        Some(idx) => base_url.split_at(idx),
        None => (base_url, ""),
    };

    let separator = match head.split_once('?') {
        None => "?",
        Some((_, existing)) if existing.is_empty() => "",
        Some(_) => "&",
    };

    format!("{head}{separator}{pairs}{fragment}")
}

fn escape(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
