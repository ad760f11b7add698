//! Look Angles Library
//!
//! Azimuth/elevation from a ground point to a geostationary satellite,
//! using a WGS84-flattened Earth and a topocentric East-North-Up frame.
//!
//! The satellite is idealized at a fixed geostationary radius over the
//! equator, so its position is fully described by its sub-longitude.
//! There is no time dependence and no orbit propagation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod geodesy;
pub mod validation;

pub use geodesy::{
    compute_look_angle, GEOSTATIONARY_RADIUS_KM, WGS84_EQUATORIAL_RADIUS_KM, WGS84_FLATTENING,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PointingError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("latitude out of range [-90, 90]: {0}")]
    LatitudeOutOfRange(f64),
    #[error("longitude out of range [-180, 180]: {0}")]
    LongitudeOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, PointingError>;

/// A ground location, either a configured site or a user-placed marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundPoint {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GroundPoint {
    pub fn new(label: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        validation::ensure_latitude(latitude)?;
        validation::ensure_longitude(longitude)?;
        Ok(Self {
            label: label.into(),
            latitude,
            longitude,
        })
    }

    pub fn look_angle_to(&self, satellite: &Satellite) -> Result<LookAngle> {
        compute_look_angle(self.latitude, self.longitude, satellite.sub_longitude)
    }
}

/// A geostationary satellite parked at a fixed sub-longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    pub name: String,
    pub sub_longitude: f64,
}

impl Satellite {
    pub fn new(name: impl Into<String>, sub_longitude: f64) -> Result<Self> {
        validation::ensure_longitude(sub_longitude)?;
        Ok(Self {
            name: name.into(),
            sub_longitude,
        })
    }
}

/// Pointing angles from a ground point to a satellite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookAngle {
    /// Degrees above the local horizon; negative when the satellite is
    /// below it.
    pub elevation_deg: f64,
    /// Degrees clockwise from North, in [0, 360).
    pub azimuth_deg: f64,
    /// Slant range in km
    pub range_km: f64,
}

impl LookAngle {
    pub fn is_above_horizon(&self) -> bool {
        self.elevation_deg >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_point_rejects_out_of_range() {
        assert_eq!(
            GroundPoint::new("North of north", 91.0, 0.0),
            Err(PointingError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            GroundPoint::new("Wrapped", 0.0, 181.0),
            Err(PointingError::LongitudeOutOfRange(181.0))
        );
        assert!(matches!(
            GroundPoint::new("NaN", f64::NAN, 0.0),
            Err(PointingError::NonFinite { field: "latitude", .. })
        ));
    }

    #[test]
    fn test_look_angle_to_matches_free_function() {
        let busan = GroundPoint::new("Busan", 35.1796, 129.0756).unwrap();
        let alt3 = Satellite::new("ALT-3", 110.0).unwrap();

        let via_point = busan.look_angle_to(&alt3).unwrap();
        let direct = compute_look_angle(35.1796, 129.0756, 110.0).unwrap();
        assert_eq!(via_point, direct);
    }

    #[test]
    fn test_horizon_boundary_counts_as_visible() {
        let grazing = LookAngle {
            elevation_deg: 0.0,
            azimuth_deg: 90.0,
            range_km: 41_000.0,
        };
        assert!(grazing.is_above_horizon());

        let hidden = LookAngle {
            elevation_deg: -0.1,
            ..grazing
        };
        assert!(!hidden.is_above_horizon());
    }

    #[test]
    fn test_satellite_serde_shape() {
        let sat = Satellite::new("MUOS-4", 75.0).unwrap();
        let json = serde_json::to_value(&sat).unwrap();
        assert_eq!(json["name"], "MUOS-4");
        assert_eq!(json["sub_longitude"], 75.0);
    }
}
