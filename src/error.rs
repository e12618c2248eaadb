//! Error types for zmanim calculation.
//!
//! A sun that never reaches a depression angle is not an error; it is an
//! absent (`None`) instant. Errors cover bad input and reference pairs that
//! describe a day of zero or negative length.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Result type alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, ZmanimError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZmanimError {
    #[error("invalid latitude {value}° (must be between -90° and +90°)")]
    InvalidLatitude { value: f64 },

    #[error("invalid longitude {value}° (must be between -180° and +180°)")]
    InvalidLongitude { value: f64 },

    #[error("invalid elevation {value} m (must be finite and not below sea level)")]
    InvalidElevation { value: f64 },

    #[error("unknown time zone identifier `{0}`")]
    UnknownTimeZone(String),

    #[error("a table must cover at least one day")]
    InvalidTableLength,

    /// The evening reference does not fall after the morning reference.
    #[error("degenerate day: end {end} is not after start {start}")]
    DegenerateDay {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl Serialize for ZmanimError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Validates latitude is within -90..=90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ZmanimError::InvalidLatitude { value: latitude });
    }
    Ok(())
}

/// Validates longitude is within -180..=180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ZmanimError::InvalidLongitude { value: longitude });
    }
    Ok(())
}

/// Validates elevation is finite and non-negative (meters).
pub fn check_elevation(elevation: f64) -> Result<()> {
    if !elevation.is_finite() || elevation < 0.0 {
        return Err(ZmanimError::InvalidElevation { value: elevation });
    }
    Ok(())
}

pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}
