//! DocuQuiz Core Library
//!
//! This crate provides the domain models, error types, configuration, and validation
//! shared by the DocuQuiz API client and CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{ClientConfig, MockLatency, UploadMode};
pub use error::{ClientError, ClientResult, ErrorMetadata, LogLevel, UploadStage};
