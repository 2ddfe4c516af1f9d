//! Target URL validation
//!
//! Only http:// and https:// targets are accepted; dangerous schemes are
//! rejected before parsing.

use url::Url;

#[derive(Debug)]
pub enum UrlValidationError {
    EmptyUrl,
    DisallowedScheme(String),
    DangerousScheme(String),
    Malformed(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::DisallowedScheme(scheme) => write!(
                f,
                "URL must start with http:// or https://, got scheme '{}'",
                scheme
            ),
            Self::DangerousScheme(scheme) => {
                write!(f, "URL scheme '{}' is blocked", scheme)
            }
            Self::Malformed(msg) => write!(f, "Malformed URL: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

const DANGEROUS_SCHEMES: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// Validates a redirect target.
///
/// Rejects empty input, dangerous schemes (javascript:, data:, file:, ...),
/// anything that is not http/https, and strings `url::Url` cannot parse.
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let lower = url.to_lowercase();

    for scheme in DANGEROUS_SCHEMES {
        if lower.starts_with(scheme) {
            return Err(UrlValidationError::DangerousScheme(scheme.to_string()));
        }
    }

    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        let scheme = lower
            .split(':')
            .next()
            .map(|s| format!("{}:", s))
            .unwrap_or_default();
        return Err(UrlValidationError::DisallowedScheme(scheme));
    }

    Url::parse(url).map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

    Ok(())
}
