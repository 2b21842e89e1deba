//! Error types for API requests.
//!
//! Non-2xx responses map onto a single tagged [`ApiError::Status`] variant
//! carrying the status kind, raw body, and headers, so callers can match on
//! the kind without a deep exception hierarchy.

use std::fmt;
use std::time::{Duration, SystemTime};

use reqwest::header::HeaderMap;
use thiserror::Error;

/// Classification of a non-success HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// 400 - malformed request.
    BadRequest,
    /// 401 - missing or invalid credentials.
    Unauthorized,
    /// 402 - account limits reached.
    PaymentRequired,
    /// 403 - authenticated but not allowed.
    Forbidden,
    /// 404 - resource does not exist.
    NotFound,
    /// 422 - request failed validation.
    Validation,
    /// 429 - rate limited; check `retry_after`.
    RateLimited,
    /// 5xx server-side failure.
    Server,
    /// Any other non-success status.
    Other,
}

impl StatusKind {
    /// Classifies an HTTP status code.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            402 => Self::PaymentRequired,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            422 => Self::Validation,
            429 => Self::RateLimited,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BadRequest => "bad request",
            Self::Unauthorized => "unauthorized",
            Self::PaymentRequired => "payment required",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::Validation => "validation error",
            Self::RateLimited => "rate limited",
            Self::Server => "server error",
            Self::Other => "API error",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while calling the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS resolution, connection refused, timeout).
    #[error("network error calling {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The API returned a non-success status code.
    #[error("{kind} (HTTP {status}): {message}")]
    Status {
        /// Classification of the status code.
        kind: StatusKind,
        /// The HTTP status code.
        status: u16,
        /// Message extracted from the response body, or the standard
        /// reason phrase when the body carries none.
        message: String,
        /// Raw response body, preserved for caller inspection.
        body: String,
        /// Response headers.
        headers: HeaderMap,
        /// Parsed `Retry-After` delay for 429 responses.
        retry_after: Option<Duration>,
    },

    /// A success response body could not be decoded.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// The URL whose body failed to decode.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Creates a network error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Builds a status error from a raw response, extracting the message
    /// from the body and the `Retry-After` delay for 429 responses.
    #[must_use]
    pub fn from_response(status: u16, body: String, headers: HeaderMap) -> Self {
        let kind = StatusKind::from_status(status);
        let message =
            extract_error_message(&body).unwrap_or_else(|| default_message(status).to_string());
        let retry_after = if kind == StatusKind::RateLimited {
            headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_retry_after)
        } else {
            None
        };

        Self::Status {
            kind,
            status,
            message,
            body,
            headers,
            retry_after,
        }
    }

    /// Returns the status kind, if this is a status error.
    #[must_use]
    pub fn status_kind(&self) -> Option<StatusKind> {
        match self {
            Self::Status { kind, .. } => Some(*kind),
            Self::Network { .. } | Self::Decode { .. } => None,
        }
    }

    /// Returns true if the API reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_kind() == Some(StatusKind::NotFound)
    }
}

/// Extracts a human-readable error message from a JSON error body.
///
/// Checks `error`, then `message`, then the first entry of `errors`
/// (either a string or a list of strings per field).
fn extract_error_message(body: &str) -> Option<String> {
    let decoded: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(error) = decoded.get("error").and_then(serde_json::Value::as_str) {
        return Some(error.to_string());
    }

    if let Some(message) = decoded.get("message").and_then(serde_json::Value::as_str) {
        return Some(message.to_string());
    }

    match decoded.get("errors")? {
        serde_json::Value::Array(entries) => first_message(entries.first()?),
        serde_json::Value::Object(map) => first_message(map.values().next()?),
        _ => None,
    }
}

fn first_message(entry: &serde_json::Value) -> Option<String> {
    match entry {
        serde_json::Value::String(message) => Some(message.clone()),
        serde_json::Value::Array(messages) => messages
            .first()
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string),
        _ => None,
    }
}

/// Standard reason phrase for a status code.
fn default_message(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        422 => "Validation Error",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "HTTP Error",
    }
}

/// Parses a `Retry-After` header value into a delay.
///
/// Accepts either delta-seconds or an HTTP-date (RFC 7231). Dates in the
/// past yield a zero delay.
#[must_use]
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let trimmed = value.trim();

    if let Ok(seconds) = trimmed.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let when = httpdate::parse_http_date(trimmed).ok()?;
    Some(
        when.duration_since(SystemTime::now())
            .unwrap_or(Duration::ZERO),
    )
}
