use bytes::Bytes;
use docuquiz_core::models::DEFAULT_CONTENT_TYPE;
use docuquiz_core::validation::validate_upload_size;
use docuquiz_core::{ClientError, ClientResult};
use std::path::Path;

/// A file about to be uploaded.
#[derive(Clone, Debug)]
pub struct UploadSource {
    pub file_name: String,
    /// MIME type reported for the file. May be empty when unknown.
    pub mime_type: String,
    pub data: Bytes,
}

impl UploadSource {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Read a local file. The MIME type is guessed from the extension. Files over the
    /// upload size limit are rejected before they are read.
    pub async fn from_path(path: &Path) -> ClientResult<Self> {
        if path
            .components()
            .any(|c| c == std::path::Component::ParentDir)
        {
            return Err(ClientError::Validation(format!(
                "Invalid input: {}",
                path.display()
            )));
        }

        let io_error = |source: std::io::Error| ClientError::Io {
            path: path.display().to_string(),
            source,
        };
        let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
        validate_upload_size(metadata.len())?;

        let data = tokio::fs::read(path).await.map_err(io_error)?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ClientError::Validation(format!("Invalid file name: {}", path.display()))
            })?
            .to_string();

        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_string();

        Ok(Self::new(file_name, mime_type, data))
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Content type sent to the object store and the backend.
    pub fn content_type(&self) -> &str {
        if self.mime_type.trim().is_empty() {
            DEFAULT_CONTENT_TYPE
        } else {
            &self.mime_type
        }
    }
}
