// src/utils.rs
use crate::error::ApiError;

/// File extensions the resume upload accepts.
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Get file extension in lowercase
pub fn get_file_extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate that a file name carries one of the allowed extensions.
pub fn validate_file_extension(file_name: &str, allowed: &[&str]) -> Result<(), ApiError> {
    let ext = get_file_extension(file_name).ok_or_else(|| {
        ApiError::Validation(format!("File has no extension: {}", file_name))
    })?;

    if !allowed.contains(&ext.as_str()) {
        return Err(ApiError::Validation(format!(
            "Unsupported file type: .{}. Please upload a PDF or DOC/DOCX file.",
            ext
        )));
    }

    Ok(())
}

/// Join a keyword list the way the listing views display it.
pub fn join_keywords(keywords: &[String]) -> String {
    if keywords.is_empty() {
        "none".to_string()
    } else {
        keywords.join(", ")
    }
}
