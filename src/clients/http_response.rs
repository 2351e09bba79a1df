//! HTTP response types.

use std::collections::HashMap;
use std::time::Duration;

/// A response received from the API.
///
/// The body is kept as the raw text; the dispatcher decides whether it
/// decodes into a result or an [`ApiError`](crate::clients::ApiError).
///
/// # Example
///
/// ```rust
/// use notion_api::clients::HttpResponse;
/// use std::collections::HashMap;
/// use std::time::Duration;
///
/// let mut headers = HashMap::new();
/// headers.insert("retry-after".to_string(), vec!["2".to_string()]);
///
/// let response = HttpResponse::new(429, headers, String::new());
/// assert!(!response.is_ok());
/// assert_eq!(response.status_text, "429 Too Many Requests");
/// assert_eq!(response.retry_after(), Some(Duration::from_secs(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The status line, e.g. `404 Not Found`.
    pub status_text: String,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response. Header names are lowercased.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_lowercase(), values))
            .collect();
        Self {
            code,
            status_text: status_text(code),
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` for any 2xx status.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `x-request-id` header.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the delay requested by a `Retry-After` header given in
    /// seconds. HTTP-date values are ignored.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        let seconds: f64 = self.header("retry-after")?.trim().parse().ok()?;
        Duration::try_from_secs_f64(seconds).ok()
    }
}

fn status_text(code: u16) -> String {
    reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .map_or_else(|| code.to_string(), |reason| format!("{code} {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_header(name: &str, value: &str) -> HashMap<String, Vec<String>> {
        let mut headers = HashMap::new();
        headers.insert(name.to_string(), vec![value.to_string()]);
        headers
    }

    #[test]
    fn test_is_ok_for_2xx_range() {
        assert!(HttpResponse::new(200, HashMap::new(), "").is_ok());
        assert!(HttpResponse::new(204, HashMap::new(), "").is_ok());
        assert!(!HttpResponse::new(199, HashMap::new(), "").is_ok());
        assert!(!HttpResponse::new(300, HashMap::new(), "").is_ok());
        assert!(!HttpResponse::new(404, HashMap::new(), "").is_ok());
    }

    #[test]
    fn test_status_text_uses_canonical_reason() {
        assert_eq!(
            HttpResponse::new(404, HashMap::new(), "").status_text,
            "404 Not Found"
        );
        assert_eq!(HttpResponse::new(599, HashMap::new(), "").status_text, "599");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(200, with_header("X-Request-Id", "req-1"), "");
        assert_eq!(response.request_id(), Some("req-1"));
        assert_eq!(response.header("X-REQUEST-ID"), Some("req-1"));
    }

    #[test]
    fn test_retry_after_parses_fractional_seconds() {
        let response = HttpResponse::new(429, with_header("Retry-After", "1.5"), "");
        assert_eq!(response.retry_after(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_retry_after_ignores_http_dates() {
        let response = HttpResponse::new(
            429,
            with_header("Retry-After", "Wed, 21 Oct 2015 07:28:00 GMT"),
            "",
        );
        assert_eq!(response.retry_after(), None);
        assert_eq!(HttpResponse::new(429, HashMap::new(), "").retry_after(), None);
    }

    #[test]
    fn test_retry_after_ignores_out_of_range_values() {
        for value in ["1e20", "-1", "NaN", "inf"] {
            let response = HttpResponse::new(429, with_header("Retry-After", value), "");
            assert_eq!(response.retry_after(), None, "Retry-After: {value}");
        }
    }
}
