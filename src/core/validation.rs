//! Address validation gate.
//!
//! Runs before any request is issued. A rejected address never reaches
//! the lifecycle controller.

use crate::models::errors::ValidationError;

/// Accept `0x` followed by exactly 40 hex characters (either case).
///
/// The input is expected to be trimmed already; the accepted address is
/// returned unchanged, without case folding.
pub fn validate_address(input: &str) -> Result<String, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::EmptyAddress);
    }

    let body = input
        .strip_prefix("0x")
        .ok_or(ValidationError::MalformedAddress)?;

    if body.len() != 40 || hex::decode(body).is_err() {
        return Err(ValidationError::MalformedAddress);
    }

    Ok(input.to_string())
}
