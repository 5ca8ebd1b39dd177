//! Input normalization and validators shared by the write paths.

use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;

/// Minimum password length accepted on registration and privileged creation.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Normalize an email address for storage and lookup.
///
/// Surrounding whitespace is trimmed and the domain part is lowercased. The
/// local part is kept as given, since mailbox names may be case-sensitive.
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CoreError::Validation("The Email field must be set".to_string()));
    }
    let normalized = match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    };
    if !normalized.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{normalized}' is not a valid email address"
        )));
    }
    Ok(normalized)
}

/// Map blank optional text to `None` so unique columns never hold `""`.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim a required text field, rejecting it when nothing but whitespace
/// remains.
pub fn required_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!(
            "{field}: This field may not be blank."
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate that every entry of an ordered image list is an http(s) URL.
pub fn validate_image_urls(urls: &[String]) -> Result<(), CoreError> {
    for (index, url) in urls.iter().enumerate() {
        let is_http = url.starts_with("http://") || url.starts_with("https://");
        if !is_http || !url.validate_url() {
            return Err(CoreError::Validation(format!(
                "images[{index}]: '{url}' is not a valid URL"
            )));
        }
    }
    Ok(())
}

/// Validate that tags are non-blank.
pub fn validate_tags(tags: &[String]) -> Result<(), CoreError> {
    if let Some(index) = tags.iter().position(|t| t.trim().is_empty()) {
        return Err(CoreError::Validation(format!(
            "tags[{index}]: tag must not be empty"
        )));
    }
    Ok(())
}
