//! Transport-level response metadata.
//!
//! Every successful call returns a [`ResponseMeta`] next to its decoded body,
//! and every status or decode failure carries one inside the error, so callers
//! can always inspect what the server actually answered.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

/// Header carrying the request budget for the current window.
pub const RATE_LIMIT_HEADER: &str = "x-ratelimit-limit";

/// Header carrying the remaining requests in the current window.
pub const RATE_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Rate-limit hints reported by the server, when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rate {
    /// Requests allowed in the current window
    pub limit: Option<u32>,
    /// Requests left in the current window
    pub remaining: Option<u32>,
}

impl Rate {
    /// Extract rate hints from response headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_u32(headers, RATE_LIMIT_HEADER),
            remaining: header_u32(headers, RATE_REMAINING_HEADER),
        }
    }
}

fn header_u32(headers: &HeaderMap, name: &str) -> Option<u32> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

/// Metadata describing a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMeta {
    /// HTTP status returned by the server
    pub status: StatusCode,
    /// Final URL of the request
    pub url: Url,
    /// Response headers
    pub headers: HeaderMap,
    /// Rate-limit hints
    pub rate: Rate,
}

impl ResponseMeta {
    /// Build metadata from the parts of a response.
    #[must_use]
    pub fn new(status: StatusCode, url: Url, headers: HeaderMap) -> Self {
        let rate = Rate::from_headers(&headers);
        Self {
            status,
            url,
            headers,
            rate,
        }
    }

    /// Numeric HTTP status code.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns true for 2xx responses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Look up a response header as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn url() -> Url {
        Url::parse("https://fmc.example.com/api/fmc_config/v1/domain/d/object/hosts").unwrap()
    }

    #[test]
    fn rate_parsed_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_HEADER, HeaderValue::from_static("120"));
        headers.insert(RATE_REMAINING_HEADER, HeaderValue::from_static(" 87 "));

        let meta = ResponseMeta::new(StatusCode::OK, url(), headers);
        assert_eq!(meta.rate.limit, Some(120));
        assert_eq!(meta.rate.remaining, Some(87));
        assert!(meta.is_success());
        assert_eq!(meta.status_code(), 200);
    }

    #[test]
    fn missing_or_garbage_rate_headers_are_none() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_HEADER, HeaderValue::from_static("lots"));

        let meta = ResponseMeta::new(StatusCode::TOO_MANY_REQUESTS, url(), headers);
        assert_eq!(meta.rate, Rate::default());
        assert!(!meta.is_success());
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let meta = ResponseMeta::new(StatusCode::OK, url(), headers);
        assert_eq!(meta.header("Content-Type"), Some("application/json"));
        assert_eq!(meta.header("x-missing"), None);
    }
}
