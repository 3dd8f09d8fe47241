//! Sampling temperature bounds

use super::error::DomainError;
use std::ops::RangeInclusive;

/// Temperatures the provider accepts
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;

/// Accept a sampling temperature inside [`TEMPERATURE_RANGE`]. NaN is rejected.
pub fn check_temperature(value: f32) -> Result<f32, DomainError> {
    if TEMPERATURE_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::InvalidTemperature(value.to_string()))
    }
}
