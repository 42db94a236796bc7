//! Data models for the DocuQuiz client
//!
//! Wire types exchanged with the backend and the object store, organized by feature.
//! All backend payloads use camelCase field names.

mod account;
mod note;
pub mod presigned_upload;
mod quiz;

// Re-export all models for convenient imports
pub use account::*;
pub use note::*;
pub use presigned_upload::*;
pub use quiz::*;
