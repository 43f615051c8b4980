//! Host extraction from request headers.

use crate::error::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// The host a request was addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHost {
    /// Raw `Host` header value, port included (`s.example.com:8080`).
    pub authority: String,
    /// Host name without the port (`s.example.com`, `[::1]`).
    pub hostname: String,
}

impl RequestHost {
    /// Builds the public short link for `code` on this host.
    pub fn short_link(&self, code: &str) -> String {
        format!("http://{}/{}/", self.authority, code)
    }

    /// Returns `true` if `url` mentions this host anywhere.
    ///
    /// A plain substring test, so links embedding this host in a query or
    /// path are caught as well.
    pub fn is_referenced_by(&self, url: &str) -> bool {
        url.to_ascii_lowercase()
            .contains(&self.hostname.to_ascii_lowercase())
    }
}

/// Reads the `Host` header and splits off the port.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if the header is missing, empty, not
/// valid UTF-8 or has no host name before the port.
pub fn host_from_headers(headers: &HeaderMap) -> Result<RequestHost, AppError> {
    let authority = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
        .trim();

    if authority.is_empty() {
        return Err(AppError::bad_request("Empty Host header", json!({})));
    }

    let hostname = if authority.starts_with('[') {
        match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        }
    } else {
        authority.split(':').next().unwrap_or(authority)
    };

    // An empty hostname would be a substring of every URL
    if hostname.is_empty() {
        return Err(AppError::bad_request(
            "Host header has no host name",
            json!({ "host": authority }),
        ));
    }

    Ok(RequestHost {
        authority: authority.to_string(),
        hostname: hostname.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_host(host: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(host));
        headers
    }

    #[test]
    fn test_host_without_port() {
        let host = host_from_headers(&headers_with_host("sho.rt")).unwrap();
        assert_eq!(host.authority, "sho.rt");
        assert_eq!(host.hostname, "sho.rt");
    }

    #[test]
    fn test_host_with_port() {
        let host = host_from_headers(&headers_with_host("localhost:8000")).unwrap();
        assert_eq!(host.authority, "localhost:8000");
        assert_eq!(host.hostname, "localhost");
    }

    #[test]
    fn test_ipv6_host_with_port() {
        let host = host_from_headers(&headers_with_host("[::1]:8080")).unwrap();
        assert_eq!(host.hostname, "[::1]");
    }

    #[test]
    fn test_missing_host_is_bad_request() {
        let result = host_from_headers(&HeaderMap::new());
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn test_port_only_host_is_bad_request() {
        let result = host_from_headers(&headers_with_host(":8000"));
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn test_short_link_keeps_port() {
        let host = host_from_headers(&headers_with_host("localhost:8000")).unwrap();
        assert_eq!(host.short_link("b9"), "http://localhost:8000/b9/");
    }

    #[test]
    fn test_self_reference_is_substring_match() {
        let host = host_from_headers(&headers_with_host("sho.rt:3000")).unwrap();
        assert!(host.is_referenced_by("http://sho.rt/abc/"));
        assert!(host.is_referenced_by("https://SHO.RT:3000/x"));
        assert!(host.is_referenced_by("https://example.com/?next=http://sho.rt/a"));
        assert!(!host.is_referenced_by("https://example.com/"));
    }
}
