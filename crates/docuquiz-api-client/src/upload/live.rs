//! Live upload strategy: backend presigned URLs, direct object-store POST, and
//! backend upload confirmation.

use async_trait::async_trait;
use docuquiz_core::models::{ConfirmUploadRequest, PresignedPackage, UploadConfirmation};
use docuquiz_core::validation::validate_file_name;
use docuquiz_core::{ClientError, ClientResult, UploadMode};

use super::form::build_upload_form;
use super::{
    UploadSource, UploadStrategy, CONFIRM_FAILED_MESSAGE, PRESIGNED_FAILED_MESSAGE,
    TRANSFER_FAILED_MESSAGE,
};
use crate::ApiClient;

pub const PRESIGNED_URL_PATH: &str = "/file/presigned-url";
pub const CONFIRM_UPLOAD_PATH: &str = "/file/confirm-upload";

#[derive(Clone, Debug)]
pub struct LiveUploads {
    api: ApiClient,
}

impl LiveUploads {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

/// Transfer error message embedding the status and the raw response body.
fn transfer_failure_message(status: reqwest::StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("{} ({})", TRANSFER_FAILED_MESSAGE, status)
    } else {
        format!("S3 업로드 실패 ({}): {}", status, body)
    }
}

#[async_trait]
impl UploadStrategy for LiveUploads {
    async fn request_presigned_upload(&self, file_name: &str) -> ClientResult<PresignedPackage> {
        validate_file_name(file_name)?;
        self.api.require_backend()?;

        let package: PresignedPackage = self
            .api
            .get(PRESIGNED_URL_PATH, &[("fileName", file_name.to_string())])
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, file_name, "Presigned URL request failed");
                ClientError::Credential(e.message_or(PRESIGNED_FAILED_MESSAGE))
            })?;

        if package.url.trim().is_empty() || package.key.trim().is_empty() {
            return Err(ClientError::Credential(PRESIGNED_FAILED_MESSAGE.to_string()));
        }

        tracing::debug!(key = %package.key, "Obtained presigned package");
        Ok(package)
    }

    async fn upload_file_to_s3(
        &self,
        presigned: &PresignedPackage,
        file: &UploadSource,
    ) -> ClientResult<String> {
        let form = build_upload_form(presigned, file)?;

        // The signed fields authenticate this request; the session credential must not be sent.
        let response = self
            .api
            .client()
            .post(&presigned.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, url = %presigned.url, "Object store upload failed");
                ClientError::Transfer {
                    status: e.status().map(|s| s.as_u16()),
                    message: format!("{} ({})", TRANSFER_FAILED_MESSAGE, e),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, key = %presigned.key, "Object store rejected upload");
            return Err(ClientError::Transfer {
                status: Some(status.as_u16()),
                message: transfer_failure_message(status, &body),
            });
        }

        tracing::debug!(key = %presigned.key, size = file.size(), "Uploaded file to object store");
        Ok(presigned.key.clone())
    }

    async fn confirm_upload_metadata(
        &self,
        request: &ConfirmUploadRequest,
    ) -> ClientResult<UploadConfirmation> {
        self.api.require_backend()?;

        let confirmation: UploadConfirmation = self
            .api
            .post_json(CONFIRM_UPLOAD_PATH, request)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, key = %request.s3_key, "Upload confirmation failed");
                ClientError::Confirmation(e.message_or(CONFIRM_FAILED_MESSAGE))
            })?;

        if confirmation.s3_key != request.s3_key {
            tracing::error!(
                expected = %request.s3_key,
                returned = %confirmation.s3_key,
                "Backend confirmed a different object key"
            );
            return Err(ClientError::Confirmation(CONFIRM_FAILED_MESSAGE.to_string()));
        }

        Ok(confirmation)
    }

    fn mode(&self) -> UploadMode {
        UploadMode::Live
    }
}
