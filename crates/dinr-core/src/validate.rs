//! Input normalisation shared by the engine and the repositories.

use crate::errors::InvalidInput;
use crate::ids::EntityId;

/// Trim a required text field, rejecting values that are blank after trimming.
///
/// # Errors
///
/// Returns `InvalidInput` naming `field` when the trimmed value is empty.
pub fn required_text(field: &'static str, value: &str) -> Result<String, InvalidInput> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InvalidInput::new(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field. Blank values collapse to `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Reject non-positive ids before they reach a store.
///
/// # Errors
///
/// Returns `InvalidInput` naming `field` when `id` is zero or negative.
pub fn positive_id<I: EntityId>(field: &'static str, id: I) -> Result<I, InvalidInput> {
    if id.is_valid() {
        Ok(id)
    } else {
        Err(InvalidInput::new(field, "must be positive"))
    }
}
