//! Upload strategies
//!
//! An upload attempt runs three stages: obtain a presigned package for the file name,
//! transfer the file straight to the object store, and confirm the upload with the
//! backend to obtain the file identifier. `MockUploads` synthesizes every stage,
//! `LiveUploads` talks to the backend and the object store. The strategy is picked
//! once from configuration and shared.

mod form;
pub mod live;
pub mod mock;
mod source;

use async_trait::async_trait;
use docuquiz_core::models::{ConfirmUploadRequest, PresignedPackage, UploadConfirmation};
use docuquiz_core::{ClientConfig, ClientResult, UploadMode};
use std::sync::Arc;

use crate::ApiClient;

pub use live::LiveUploads;
pub use mock::MockUploads;
pub use source::UploadSource;

pub(crate) const PRESIGNED_FAILED_MESSAGE: &str = "presigned URL 요청에 실패했습니다.";
pub(crate) const TRANSFER_FAILED_MESSAGE: &str = "S3 업로드에 실패했습니다.";
pub(crate) const CONFIRM_FAILED_MESSAGE: &str = "업로드 확인에 실패했습니다.";

/// Upload stage operations.
#[async_trait]
pub trait UploadStrategy: Send + Sync {
    /// Obtain a presigned package authorizing a direct write of `file_name`.
    async fn request_presigned_upload(&self, file_name: &str) -> ClientResult<PresignedPackage>;

    /// Transfer `file` to the object store. Returns the object key, which was fixed
    /// when the package was issued.
    async fn upload_file_to_s3(
        &self,
        presigned: &PresignedPackage,
        file: &UploadSource,
    ) -> ClientResult<String>;

    /// Register a completed upload and obtain its file identifier.
    async fn confirm_upload_metadata(
        &self,
        request: &ConfirmUploadRequest,
    ) -> ClientResult<UploadConfirmation>;

    fn mode(&self) -> UploadMode;
}

/// Create the upload strategy selected by configuration.
pub fn create_upload_strategy(config: &ClientConfig, api: &ApiClient) -> Arc<dyn UploadStrategy> {
    match config.upload_mode {
        UploadMode::Mock => {
            tracing::info!("Using mock upload strategy");
            Arc::new(MockUploads::new(config.mock_latency))
        }
        UploadMode::Live => {
            tracing::info!(base_url = ?api.base_url(), "Using live upload strategy");
            Arc::new(LiveUploads::new(api.clone()))
        }
    }
}
