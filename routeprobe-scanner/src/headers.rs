// Fixed header allowlist captured for every route

use reqwest::header::HeaderMap;
use std::collections::BTreeMap;

/// Placeholder recorded for a tracked header the response did not carry.
pub const NOT_SET: &str = "NOT SET";

/// Response headers recorded for every checked route, in report order.
pub const TRACKED_HEADERS: [&str; 13] = [
    "cache-control",
    "x-content-type-options",
    "x-frame-options",
    "strict-transport-security",
    "referrer-policy",
    "permissions-policy",
    "content-type",
    "etag",
    "x-api-version",
    "x-security-version",
    "pragma",
    "expires",
    "vary",
];

/// Tracked header name to observed value (or [`NOT_SET`]).
pub type HeaderSnapshot = BTreeMap<String, String>;

/// Build a snapshot holding every tracked header.
///
/// `HeaderMap` keys are case-insensitive, so a `Cache-Control` response
/// header lands under `cache-control`. Repeated headers are joined with
/// `", "` and values that are not valid UTF-8 are decoded lossily.
pub fn snapshot_headers(headers: &HeaderMap) -> HeaderSnapshot {
    TRACKED_HEADERS
        .iter()
        .map(|name| {
            let values: Vec<String> = headers
                .get_all(*name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect();

            let value = if values.is_empty() {
                NOT_SET.to_string()
            } else {
                values.join(", ")
            };

            (name.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderName, HeaderValue};

    #[test]
    fn test_empty_response_reports_every_header_as_not_set() {
        let snapshot = snapshot_headers(&HeaderMap::new());

        assert_eq!(snapshot.len(), TRACKED_HEADERS.len());
        assert!(snapshot.values().all(|v| v == NOT_SET));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("cache-control"),
            HeaderValue::from_static("no-store"),
        );
        // HeaderName::from_bytes lowercases mixed-case input
        headers.insert(
            HeaderName::from_bytes(b"X-Frame-Options").unwrap(),
            HeaderValue::from_static("DENY"),
        );

        let snapshot = snapshot_headers(&headers);
        assert_eq!(snapshot["cache-control"], "no-store");
        assert_eq!(snapshot["x-frame-options"], "DENY");
        assert_eq!(snapshot["etag"], NOT_SET);
    }

    #[test]
    fn test_repeated_header_values_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append("vary", HeaderValue::from_static("Accept"));
        headers.append("vary", HeaderValue::from_static("Accept-Encoding"));

        let snapshot = snapshot_headers(&headers);
        assert_eq!(snapshot["vary"], "Accept, Accept-Encoding");
    }

    #[test]
    fn test_untracked_headers_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("server", HeaderValue::from_static("nginx"));

        let snapshot = snapshot_headers(&headers);
        assert!(!snapshot.contains_key("server"));
        assert_eq!(snapshot.len(), 13);
    }
}
