//! Error types module
//!
//! Every operation of the upload-and-generation flow either returns its typed payload
//! or fails with one `ClientError` carrying a human-readable message. Stage errors
//! display exactly that message, so a backend's own `message` surfaces verbatim.

use serde::Serialize;
use std::fmt;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for failures the caller can recover from by restarting the flow
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Stage of an upload attempt an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStage {
    Credential,
    Transfer,
    Confirmation,
    Generation,
}

impl UploadStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStage::Credential => "credential",
            UploadStage::Transfer => "transfer",
            UploadStage::Confirmation => "confirmation",
            UploadStage::Generation => "generation",
        }
    }
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing how an error should be presented and handled by the caller
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TRANSFER_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether restarting the flow may succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// Message to show the user
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The broker failed to obtain or synthesize a presigned package.
    #[error("{0}")]
    Credential(String),

    /// The object-store POST failed (non-2xx or network fault).
    #[error("{message}")]
    Transfer { status: Option<u16>, message: String },

    /// The backend rejected the confirm-upload call.
    #[error("{0}")]
    Confirmation(String),

    /// The backend rejected or failed the generation call.
    #[error("{0}")]
    Generation(String),

    /// Caller input was rejected before any network call was made.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Notes(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<validator::ValidationErrors> for ClientError {
    fn from(err: validator::ValidationErrors) -> Self {
        ClientError::Validation(format!("Invalid generation options: {}", err))
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn client_error_static_metadata(
    err: &ClientError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        ClientError::Credential(_) => (
            "CREDENTIAL_ERROR",
            true,
            Some("Restart the upload"),
            LogLevel::Warn,
        ),
        ClientError::Transfer { .. } => (
            "TRANSFER_ERROR",
            true,
            Some("Restart the upload to obtain a fresh credential"),
            LogLevel::Warn,
        ),
        ClientError::Confirmation(_) => (
            "CONFIRMATION_ERROR",
            true,
            Some("Restart the upload"),
            LogLevel::Warn,
        ),
        ClientError::Generation(_) => (
            "GENERATION_ERROR",
            true,
            Some("Retry quiz generation with the same file"),
            LogLevel::Warn,
        ),
        ClientError::Validation(_) => (
            "VALIDATION_ERROR",
            false,
            Some("Check the input values and try again"),
            LogLevel::Debug,
        ),
        ClientError::Auth(_) => (
            "AUTH_ERROR",
            false,
            Some("Sign in again"),
            LogLevel::Warn,
        ),
        ClientError::Notes(_) => (
            "NOTES_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Warn,
        ),
        ClientError::Io { .. } => (
            "IO_ERROR",
            false,
            Some("Check that the file exists and is readable"),
            LogLevel::Error,
        ),
        ClientError::Config(_) => (
            "CONFIG_ERROR",
            false,
            Some("Fix the DOCUQUIZ_* environment variables"),
            LogLevel::Error,
        ),
    }
}

impl ClientError {
    /// Get the error type name
    pub fn error_type(&self) -> &str {
        match self {
            ClientError::Credential(_) => "CredentialError",
            ClientError::Transfer { .. } => "TransferError",
            ClientError::Confirmation(_) => "ConfirmationError",
            ClientError::Generation(_) => "GenerationError",
            ClientError::Validation(_) => "ValidationError",
            ClientError::Auth(_) => "AuthError",
            ClientError::Notes(_) => "NotesError",
            ClientError::Io { .. } => "IoError",
            ClientError::Config(_) => "ConfigError",
        }
    }

    /// Upload stage this error belongs to, if it is a stage error.
    pub fn stage(&self) -> Option<UploadStage> {
        match self {
            ClientError::Credential(_) => Some(UploadStage::Credential),
            ClientError::Transfer { .. } => Some(UploadStage::Transfer),
            ClientError::Confirmation(_) => Some(UploadStage::Confirmation),
            ClientError::Generation(_) => Some(UploadStage::Generation),
            _ => None,
        }
    }

    /// HTTP status of the failed object-store transfer, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transfer { status, .. } => *status,
            _ => None,
        }
    }
}

impl ErrorMetadata for ClientError {
    fn error_code(&self) -> &'static str {
        client_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        client_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        client_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        client_error_static_metadata(self).3
    }
}
