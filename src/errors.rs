//! Standardized error types following the `error-authcode-<domain>-<number>` format.

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

/// Configuration errors that occur during application startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error when PORT cannot be parsed
    #[error("error-authcode-config-1 Parsing PORT into u16 failed: {0:?}")]
    PortParsingFailed(std::num::ParseIntError),

    /// Error when version information is not available
    #[error("error-authcode-config-2 One of GIT_HASH or CARGO_PKG_VERSION must be set")]
    VersionNotSet,

    /// Error when boolean string cannot be parsed
    #[error(
        "error-authcode-config-3 Failed to parse boolean '{0}': expected true/false/1/0/yes/no/on/off"
    )]
    BoolParsingFailed(String),

    /// Error when a bootstrap client entry carries no redirect URIs
    #[error("error-authcode-config-4 Bootstrap client {0} has no redirect URIs")]
    BootstrapClientEmpty(usize),
}

/// HTTP server errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Error when the template environment cannot be built
    #[error("error-authcode-http-1 Template setup failed: {0}")]
    TemplateSetupFailed(String),

    /// Error when request processing fails
    #[error("error-authcode-http-2 Request processing failed: {0}")]
    RequestProcessingFailed(String),
}

/// OAuth-related errors.
///
/// Protocol outcomes (unknown client, denied consent, ...) are never reported through
/// this type; they are directives. These variants cover failures of the machinery itself.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// Invalid request
    #[error("error-authcode-oauth-1 Invalid request: {0}")]
    InvalidRequest(String),

    /// Server error
    #[error("error-authcode-oauth-2 Server error: {0}")]
    ServerError(String),
}

/// Client registration errors
#[derive(Debug, Error)]
pub enum ClientRegistrationError {
    /// Missing or empty redirect URI list
    #[error("error-authcode-client-1 Invalid client parameters: {0}")]
    InvalidClientParameters(String),

    /// Client not found
    #[error("error-authcode-client-2 Client not found: {0}")]
    ClientNotFound(String),

    /// Underlying storage refused the operation
    #[error("error-authcode-client-3 Client storage failed: {0}")]
    StorageFailed(String),
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Error when a storage operation cannot be completed
    #[error("error-authcode-storage-1 Storage operation failed: {0}")]
    OperationFailed(String),

    /// Error when a record with the same key already exists
    #[error("error-authcode-storage-2 Duplicate key: {0}")]
    DuplicateKey(String),
}

pub type Result<T> = std::result::Result<T, HttpError>;

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, "internal server error");
        (StatusCode::INTERNAL_SERVER_ERROR).into_response()
    }
}

impl From<OAuthError> for HttpError {
    fn from(error: OAuthError) -> Self {
        HttpError::RequestProcessingFailed(error.to_string())
    }
}
