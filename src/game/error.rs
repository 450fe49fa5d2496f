//! Validation errors surfaced to the presentation layer.

use crate::config::game::{MAX_POINT_COUNT, MIN_POINT_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Check a requested point count against the allowed round sizes.
pub fn validate_point_count(count: i64, min: i64, max: i64) -> Result<u32, GameError> {
    if count < min {
        return Err(GameError::InvalidConfiguration(format!(
            "point count must be at least {min}, got {count}"
        )));
    }
    if count > max {
        return Err(GameError::InvalidConfiguration(format!(
            "point count must be at most {max}, got {count}"
        )));
    }
    u32::try_from(count).map_err(|_| {
        GameError::InvalidConfiguration(format!("point count {count} is too large"))
    })
}

/// Parse the raw text of the point-count input.
///
/// Empty, non-integer and too-small values are all reported as
/// `InvalidConfiguration`; nothing is rounded or clamped.
pub fn parse_point_count(raw: &str) -> Result<u32, GameError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GameError::InvalidConfiguration("point count is missing".to_string()));
    }
    let count: i64 = trimmed.parse().map_err(|_| {
        GameError::InvalidConfiguration(format!("point count '{trimmed}' is not a whole number"))
    })?;
    validate_point_count(count, MIN_POINT_COUNT, MAX_POINT_COUNT)
}
