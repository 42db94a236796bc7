use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content type sent for files whose own type is unknown
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Backend-issued signing fields. Forwarded to the object store unmodified and in
/// the order they were issued.
pub type PresignedFields = serde_json::Map<String, serde_json::Value>;

/// Presigned POST package for a direct object-store upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedPackage {
    /// Object store endpoint the form is posted to
    pub url: String,
    /// Signing fields (policy, signature, credential, ...)
    #[serde(default)]
    pub fields: PresignedFields,
    /// Object key the file will be stored under
    pub key: String,
    /// Credential expiration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Identifier embedded in the key of a synthesized package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_file_id: Option<String>,
}

impl PresignedPackage {
    /// Whether the package has expired at `now`. Packages without expiry never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Request to register a completed object-store upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmUploadRequest {
    /// Original filename
    pub file_name: String,
    /// Object key returned by the presigned package
    pub s3_key: String,
    /// Content type (MIME type)
    pub mime_type: String,
    /// File size in bytes
    pub size: u64,
}

/// Backend record of a confirmed upload. `id` is the file identifier used by
/// every later generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfirmation {
    pub id: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    pub s3_key: String,
    pub s3_url: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn deserializes_backend_package_without_optional_fields() {
        let package: PresignedPackage = serde_json::from_value(json!({
            "url": "https://bucket.s3.amazonaws.com",
            "fields": { "Policy": "abc", "X-Amz-Signature": "def" },
            "key": "uploads/1-lecture.pdf"
        }))
        .unwrap();

        assert_eq!(package.key, "uploads/1-lecture.pdf");
        assert_eq!(package.fields.get("Policy").and_then(|v| v.as_str()), Some("abc"));
        assert!(package.expires_at.is_none());
        assert!(package.mock_file_id.is_none());
        assert!(!package.is_expired_at(Utc::now()));
    }

    #[test]
    fn keeps_signing_fields_in_issued_order() {
        let package: PresignedPackage = serde_json::from_str(
            r#"{
                "url": "https://bucket.s3.amazonaws.com",
                "fields": { "key": "k", "bucket": "b", "X-Amz-Algorithm": "a", "Policy": "p" },
                "key": "k"
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = package.fields.keys().map(String::as_str).collect();
        assert_eq!(names, ["key", "bucket", "X-Amz-Algorithm", "Policy"]);
    }

    #[test]
    fn expiry_check() {
        let now = Utc::now();
        let package = PresignedPackage {
            url: String::new(),
            fields: PresignedFields::new(),
            key: "k".to_string(),
            expires_at: Some(now + Duration::minutes(5)),
            mock_file_id: None,
        };
        assert!(!package.is_expired_at(now));
        assert!(package.is_expired_at(now + Duration::minutes(5)));
    }

    #[test]
    fn confirm_request_uses_camel_case() {
        let request = ConfirmUploadRequest {
            file_name: "lecture.pdf".to_string(),
            s3_key: "uploads/1-lecture.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size: 123456,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "fileName": "lecture.pdf",
                "s3Key": "uploads/1-lecture.pdf",
                "mimeType": "application/pdf",
                "size": 123456
            })
        );
    }

    #[test]
    fn deserializes_confirmation() {
        let confirmation: UploadConfirmation = serde_json::from_value(json!({
            "id": "file-1",
            "originalName": "lecture.pdf",
            "mimeType": "application/pdf",
            "size": 10,
            "s3Key": "uploads/1-lecture.pdf",
            "s3Url": "https://bucket/uploads/1-lecture.pdf",
            "createdAt": "2025-04-01T09:30:00.000Z"
        }))
        .unwrap();
        assert_eq!(confirmation.original_name, "lecture.pdf");
        assert_eq!(confirmation.created_at.to_rfc3339(), "2025-04-01T09:30:00+00:00");
    }
}
