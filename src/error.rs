//! Configuration errors
//!
//! Only construction-time problems are reported as values. Bad cell indices
//! and negative time steps are caller bugs and panic instead.

use thiserror::Error;

/// Reasons a formation or session configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Grid must have at least one column and one row
    #[error("formation grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    /// A numeric field is NaN or infinite
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    /// A numeric field that must be non-negative is negative
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    /// Cooldown bounds are inverted
    #[error("cooldown bounds inverted: low {low} > high {high}")]
    CooldownRange { low: f32, high: f32 },

    /// Drop probability outside [0, 1]
    #[error("power-up probability must be within [0, 1], got {0}")]
    Probability(f32),

    /// Player must start with some health
    #[error("player health must be at least 1")]
    ZeroHealth,

    /// Settings JSON could not be parsed
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Check that `value` is finite
pub(crate) fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// Check that `value` is finite and non-negative
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    let value = finite(field, value)?;
    if value < 0.0 {
        Err(ConfigError::Negative { field, value })
    } else {
        Ok(value)
    }
}
