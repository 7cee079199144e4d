use std::error::Error as StdError;

use crate::domain::ValidationError;

/// Longest body excerpt carried by a `400` [`ApiError`] message.
const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected HTTP status: {status}")]
/// A non-2xx response as received from the server.
pub struct HttpStatusError {
    pub status: u16,
    pub body: Option<String>,
}

impl HttpStatusError {
    pub(crate) fn new(status: u16, body: String) -> Self {
        let body = if body.trim().is_empty() {
            None
        } else {
            Some(body)
        };
        Self { status, body }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code {code})")]
/// Typed API failure derived from a client-error status.
///
/// `code` mirrors the HTTP status (`400`, `401`, `404`). The originating
/// [`HttpStatusError`] is available through [`std::error::Error::source`].
pub struct ApiError {
    code: u16,
    message: String,
    #[source]
    source: HttpStatusError,
}

impl ApiError {
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const NOT_FOUND: u16 = 404;

    /// Map a status error onto the typed taxonomy, or hand it back untouched when the
    /// status has no typed counterpart.
    pub(crate) fn from_status(err: HttpStatusError) -> Result<Self, HttpStatusError> {
        let message = match err.status {
            Self::BAD_REQUEST => format!("Request error: {}", excerpt(err.body.as_deref())),
            Self::UNAUTHORIZED => "Unauthorized".to_owned(),
            Self::NOT_FOUND => "Not found".to_owned(),
            _ => return Err(err),
        };
        Ok(Self {
            code: err.status,
            message,
            source: err,
        })
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_not_found(&self) -> bool {
        self.code == Self::NOT_FOUND
    }

    /// The raw status error this API error was derived from.
    pub fn status_error(&self) -> &HttpStatusError {
        &self.source
    }
}

fn excerpt(body: Option<&str>) -> String {
    body.map(|body| body.trim().chars().take(BODY_EXCERPT_CHARS).collect())
        .unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`crate::EsputnikClient`].
///
/// Callers should treat [`EsputnikError::Api`] as "the operation failed" and
/// [`EsputnikError::Transport`] / [`EsputnikError::HttpStatus`] as infrastructure failures.
pub enum EsputnikError {
    /// No response was received (DNS, refused connection, connect timeout, TLS, ...).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status without a typed mapping (other 4xx, 5xx).
    #[error(transparent)]
    HttpStatus(#[from] HttpStatusError),

    /// Typed API error for `400`, `401` and `404` responses.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A successful response body could not be decoded into the expected shape.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Client configuration (environment) is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl EsputnikError {
    /// `true` only for a typed `404` API error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_not_found())
    }

    /// The typed API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}
