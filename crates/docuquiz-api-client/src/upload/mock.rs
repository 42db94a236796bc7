//! Mock upload strategy
//!
//! Synthesizes presigned packages and confirmations without any backend, after a
//! simulated latency so that callers' loading states stay observable.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use docuquiz_core::models::{
    ConfirmUploadRequest, PresignedFields, PresignedPackage, UploadConfirmation,
};
use docuquiz_core::validation::validate_file_name;
use docuquiz_core::{ClientResult, MockLatency, UploadMode};
use std::time::Duration;
use uuid::Uuid;

use super::{UploadSource, UploadStrategy};

pub const MOCK_BUCKET: &str = "docuquiz-demo-bucket";
pub const MOCK_BUCKET_URL: &str = "https://docuquiz-demo-bucket.s3.ap-northeast-2.amazonaws.com";
const MOCK_REGION: &str = "ap-northeast-2";
const PACKAGE_TTL_MINUTES: i64 = 60;

#[derive(Clone, Debug, Default)]
pub struct MockUploads {
    latency: MockLatency,
}

impl MockUploads {
    pub fn new(latency: MockLatency) -> Self {
        Self { latency }
    }

    async fn simulate(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Package with placeholder signing fields and a one-hour expiry.
pub fn build_mock_presigned_package(file_name: &str, now: DateTime<Utc>) -> PresignedPackage {
    let mock_id = Uuid::new_v4().to_string();
    let key = format!("uploads/{}-{}", mock_id, file_name);

    let mut fields = PresignedFields::new();
    fields.insert("bucket".to_string(), MOCK_BUCKET.into());
    fields.insert("key".to_string(), key.clone().into());
    fields.insert("X-Amz-Algorithm".to_string(), "AWS4-HMAC-SHA256".into());
    fields.insert(
        "X-Amz-Credential".to_string(),
        format!(
            "MOCKACCESSKEY/{}/{}/s3/aws4_request",
            now.format("%Y%m%d"),
            MOCK_REGION
        )
        .into(),
    );
    fields.insert(
        "X-Amz-Date".to_string(),
        now.format("%Y%m%dT%H%M%S").to_string().into(),
    );
    fields.insert("Policy".to_string(), "mock-policy".into());
    fields.insert("X-Amz-Signature".to_string(), "mock-signature".into());

    PresignedPackage {
        url: MOCK_BUCKET_URL.to_string(),
        fields,
        key,
        expires_at: Some(now + ChronoDuration::minutes(PACKAGE_TTL_MINUTES)),
        mock_file_id: Some(mock_id),
    }
}

#[async_trait]
impl UploadStrategy for MockUploads {
    async fn request_presigned_upload(&self, file_name: &str) -> ClientResult<PresignedPackage> {
        validate_file_name(file_name)?;
        Self::simulate(self.latency.credential).await;

        let package = build_mock_presigned_package(file_name, Utc::now());
        tracing::debug!(key = %package.key, "Synthesized mock presigned package");
        Ok(package)
    }

    async fn upload_file_to_s3(
        &self,
        presigned: &PresignedPackage,
        file: &UploadSource,
    ) -> ClientResult<String> {
        Self::simulate(self.latency.transfer).await;
        tracing::debug!(
            key = %presigned.key,
            size = file.size(),
            "Simulated object store upload"
        );
        Ok(presigned.key.clone())
    }

    async fn confirm_upload_metadata(
        &self,
        request: &ConfirmUploadRequest,
    ) -> ClientResult<UploadConfirmation> {
        Self::simulate(self.latency.credential).await;

        Ok(UploadConfirmation {
            id: Uuid::new_v4().to_string(),
            original_name: request.file_name.clone(),
            mime_type: request.mime_type.clone(),
            size: request.size,
            s3_key: request.s3_key.clone(),
            s3_url: format!("{}/{}", MOCK_BUCKET_URL, request.s3_key),
            created_at: Utc::now(),
        })
    }

    fn mode(&self) -> UploadMode {
        UploadMode::Mock
    }
}
