use docuquiz_core::models::PresignedPackage;
use docuquiz_core::{ClientError, ClientResult};
use reqwest::multipart::{Form, Part};

use super::UploadSource;

/// Name of the form field carrying the file payload
pub(crate) const FILE_FIELD: &str = "file";

/// Build the object-store POST form: the signing fields verbatim and in issued order,
/// then `Content-Type`, then the file part last.
pub(crate) fn build_upload_form(
    presigned: &PresignedPackage,
    file: &UploadSource,
) -> ClientResult<Form> {
    let mut form = Form::new();
    for (name, value) in &presigned.fields {
        let value = match value.as_str() {
            Some(text) => text.to_string(),
            None => value.to_string(),
        };
        form = form.text(name.clone(), value);
    }
    form = form.text("Content-Type", file.content_type().to_string());

    let part = Part::stream_with_length(file.data.clone(), file.size())
        .file_name(file.file_name.clone())
        .mime_str(file.content_type())
        .map_err(|e| ClientError::Transfer {
            status: None,
            message: format!("Invalid content type {:?}: {}", file.content_type(), e),
        })?;

    Ok(form.part(FILE_FIELD, part))
}
