use axum::{Json, extract::rejection::JsonRejection};
use validator::ValidateLength;

use crate::{error::ApiError, resource::Resource};

/// Longest accepted free-text field, in characters
pub const MAX_TEXT_LENGTH: u64 = 500;

/// Parse an integer path id, reporting a malformed id as a validation error.
///
/// # Examples
/// ```
/// use lp_api::{resource::WORD, validation::parse_id};
///
/// assert_eq!(parse_id("42", WORD).unwrap(), 42);
/// assert!(parse_id("abc", WORD).is_err());
/// ```
pub fn parse_id(raw: &str, resource: Resource) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| resource.invalid_id())
}

/// Unwrap a JSON body, turning any rejection into a 400.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected request body");
            Err(ApiError::Validation("Invalid request body".to_string()))
        }
    }
}

/// Validate a required text field: not blank, at most [`MAX_TEXT_LENGTH`] characters.
pub fn validate_required_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} cannot be empty")));
    }

    if !value.validate_length(None, Some(MAX_TEXT_LENGTH), None) {
        return Err(ApiError::Validation(format!(
            "{field} must be at most {MAX_TEXT_LENGTH} characters long"
        )));
    }

    Ok(())
}

/// Validate an optional text field's length.
pub fn validate_optional_text(field: &str, value: &str) -> Result<(), ApiError> {
    if !value.validate_length(None, Some(MAX_TEXT_LENGTH), None) {
        return Err(ApiError::Validation(format!(
            "{field} must be at most {MAX_TEXT_LENGTH} characters long"
        )));
    }

    Ok(())
}
