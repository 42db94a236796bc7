//! Validation of caller input, applied before any network call is made.

use std::collections::HashSet;
use std::path::Path;
use validator::Validate;

use crate::error::{ClientError, ClientResult};
use crate::models::GenerationOptions;

pub const MAX_FILE_NAME_LENGTH: usize = 255;

/// Largest document accepted for upload (10 MB)
pub const MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;
/// The only document type accepted for upload
pub const PDF_MIME_TYPE: &str = "application/pdf";

const FILE_TOO_LARGE_MESSAGE: &str = "파일 크기는 10MB를 초과할 수 없습니다.";
const PDF_ONLY_MESSAGE: &str = "PDF 파일만 업로드할 수 있습니다.";

/// Validate the name of a file about to be uploaded.
pub fn validate_file_name(file_name: &str) -> ClientResult<()> {
    if file_name.trim().is_empty() {
        return Err(ClientError::Validation(
            "File name must not be empty".to_string(),
        ));
    }
    if file_name.chars().count() > MAX_FILE_NAME_LENGTH {
        return Err(ClientError::Validation(format!(
            "File name must be at most {} characters",
            MAX_FILE_NAME_LENGTH
        )));
    }
    if file_name.contains('/') || file_name.contains('\\') {
        return Err(ClientError::Validation(
            "File name must not contain path separators".to_string(),
        ));
    }
    Ok(())
}

/// Validate a document before its upload starts: a valid name, a PDF, at most
/// [`MAX_UPLOAD_SIZE`] bytes. An empty MIME type is accepted for `.pdf` names.
pub fn validate_upload(file_name: &str, mime_type: &str, size: u64) -> ClientResult<()> {
    validate_file_name(file_name)?;

    let mime_type = mime_type.trim();
    let is_pdf = if mime_type.is_empty() {
        Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    } else {
        mime_type.eq_ignore_ascii_case(PDF_MIME_TYPE)
    };
    if !is_pdf {
        return Err(ClientError::Validation(PDF_ONLY_MESSAGE.to_string()));
    }

    validate_upload_size(size)
}

pub fn validate_upload_size(size: u64) -> ClientResult<()> {
    if size > MAX_UPLOAD_SIZE {
        return Err(ClientError::Validation(FILE_TOO_LARGE_MESSAGE.to_string()));
    }
    Ok(())
}

/// Validate generation options: count range, at least one type, no repeated type.
pub fn validate_generation_options(options: &GenerationOptions) -> ClientResult<()> {
    options.validate()?;

    let mut seen = HashSet::new();
    if let Some(repeated) = options.types.iter().find(|t| !seen.insert(**t)) {
        return Err(ClientError::Validation(format!(
            "Question type {} is listed more than once",
            repeated
        )));
    }
    Ok(())
}

/// Validate a generation request: a non-empty file identifier and valid options.
pub fn validate_generation_request(file_id: &str, options: &GenerationOptions) -> ClientResult<()> {
    if file_id.trim().is_empty() {
        return Err(ClientError::Validation(
            "File ID is missing. Upload the file again".to_string(),
        ));
    }
    validate_generation_options(options)
}

/// Validate an identifier used as a path segment (note id, quiz id).
pub fn validate_identifier(kind: &str, id: &str) -> ClientResult<()> {
    if id.trim().is_empty() {
        return Err(ClientError::Validation(format!("{} must not be empty", kind)));
    }
    Ok(())
}
