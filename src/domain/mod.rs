//! Domain modules (vertical slices): one per external service, each with
//! its client, wire types, and conversions.

pub mod calendar;
pub mod coda;
pub mod github;

use crate::error::SdkError;

/// Reject empty or whitespace-only identifiers before any network call.
pub(crate) fn require_id(value: &str, what: &str) -> Result<(), SdkError> {
    if value.trim().is_empty() {
        return Err(SdkError::Validation(format!(
            "{what} must be a non-empty identifier"
        )));
    }
    Ok(())
}
