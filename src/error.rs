//! Unified SDK error types.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::auth::Service;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// HTTP-layer errors.
///
/// Retryable variants (`ServerError`, `RateLimited`, transport timeouts and
/// connection failures) are absorbed by the executor's retry loop and only
/// surface once attempts are exhausted. Everything else surfaces immediately.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after:?})")]
    RateLimited {
        retry_after: Option<Duration>,
        body: String,
    },

    #[error("Unauthorized ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Client error {status}: {body}")]
    ClientError { status: u16, body: String },

    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl HttpError {
    /// The HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. }
            | Self::Unauthorized { status, .. }
            | Self::ClientError { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::NotFound(_) => Some(404),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

/// Failures below the HTTP status line: the request never produced a response.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Whether a retry can plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connect(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else {
            Self::Other(e.to_string())
        }
    }
}

/// Credential resolution and loading errors. All of these occur at client
/// construction, before any API call.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("no credential for {service}: pass one explicitly or set {var}")]
    MissingCredential { service: Service, var: &'static str },

    #[error("credential for {service} does not look like a valid token")]
    MalformedToken { service: Service },

    #[error("credentials file not found: {path}")]
    CredentialFile { path: PathBuf },

    #[error("failed to read token file {path}: {source}")]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stored token bundle: {0}")]
    TokenBundle(#[source] serde_json::Error),

    #[error("stored access token is expired and no refresh token is available; re-run authorization")]
    TokenExpired,

    #[error("token refresh failed: {0}")]
    Refresh(String),
}
