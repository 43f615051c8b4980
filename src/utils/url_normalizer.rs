//! URL normalization and submit-time URL checks.
//!
//! Stored long URLs are always scheme-qualified so they can be used as
//! redirect targets as-is. Normalization never rewrites an URL that already
//! has a scheme.

use url::Url;

/// Scheme prepended to URLs submitted without one.
pub const DEFAULT_SCHEME: &str = "http://";

/// Schemes a stored URL may redirect to. Anything else could run script
/// when rendered as a link.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Reasons a submitted URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Required,

    #[error("Invalid URL: {0}")]
    Invalid(String),
}

/// Prefixes `http://` to `raw` unless it already carries a URI scheme.
///
/// A scheme is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` followed by `:`.
/// `host:port` forms such as `localhost:8000/path` are not treated as a scheme.
///
/// The function is idempotent.
///
/// # Examples
///
/// ```
/// use shortener::utils::url_normalizer::normalize_url;
///
/// assert_eq!(normalize_url("example.com"), "http://example.com");
/// assert_eq!(normalize_url("https://example.com"), "https://example.com");
/// ```
pub fn normalize_url(raw: &str) -> String {
    if has_scheme(raw) {
        raw.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{raw}")
    }
}

fn has_scheme(raw: &str) -> bool {
    let Some((scheme, rest)) = raw.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let scheme_chars_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if !starts_with_letter || !scheme_chars_ok {
        return false;
    }

    // `host:8080/...` carries a port, not a scheme
    let port_candidate = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let is_port = !port_candidate.is_empty() && port_candidate.bytes().all(|b| b.is_ascii_digit());

    !is_port
}

/// Validates a raw submitted URL and returns its normalized form.
///
/// # Rules
///
/// - Surrounding whitespace is ignored
/// - Empty input is [`UrlValidationError::Required`]
/// - Whitespace inside the URL is rejected
/// - The normalized URL must parse and name a host
/// - The scheme must be one of [`ALLOWED_SCHEMES`]
///
/// # Errors
///
/// Returns [`UrlValidationError`] describing the first failed rule.
pub fn validate_long_url(raw: &str) -> Result<String, UrlValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Required);
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(UrlValidationError::Invalid(
            "URL must not contain whitespace".to_string(),
        ));
    }

    let normalized = normalize_url(trimmed);
    let parsed =
        Url::parse(&normalized).map_err(|e| UrlValidationError::Invalid(e.to_string()))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(UrlValidationError::Invalid(format!(
            "Scheme '{}' is not allowed",
            parsed.scheme()
        )));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(normalized),
        _ => Err(UrlValidationError::Invalid("URL has no host".to_string())),
    }
}
