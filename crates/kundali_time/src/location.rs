//! Observer location.

use serde::{Deserialize, Serialize};

use crate::error::TimeError;

/// Geographic position of the event plus the UTC offset in effect there.
///
/// Longitude is positive east. The offset is the one that applied at the
/// moment being described (daylight saving already folded in).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub utc_offset_hours: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, utc_offset_hours: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            utc_offset_hours,
        }
    }

    /// Validated constructor.
    pub fn try_new(
        latitude_deg: f64,
        longitude_deg: f64,
        utc_offset_hours: f64,
    ) -> Result<Self, TimeError> {
        let loc = Self::new(latitude_deg, longitude_deg, utc_offset_hours);
        loc.validate()?;
        Ok(loc)
    }

    pub fn validate(&self) -> Result<(), TimeError> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(TimeError::InvalidLocation("latitude must be within [-90, 90]"));
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err(TimeError::InvalidLocation("longitude must be within [-180, 180]"));
        }
        if !self.utc_offset_hours.is_finite() || self.utc_offset_hours.abs() > 14.0 {
            return Err(TimeError::InvalidLocation("UTC offset must be within [-14, 14] hours"));
        }
        Ok(())
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}
