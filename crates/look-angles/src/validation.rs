//! Numeric guards shared by the look-angle and projection code

use crate::{PointingError, Result};

pub fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && lat.is_finite()
}

pub fn is_valid_longitude(lon: f64) -> bool {
    (-180.0..=180.0).contains(&lon) && lon.is_finite()
}

pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PointingError::NonFinite { field, value })
    }
}

pub fn ensure_latitude(lat: f64) -> Result<f64> {
    ensure_finite("latitude", lat)?;
    if is_valid_latitude(lat) {
        Ok(lat)
    } else {
        Err(PointingError::LatitudeOutOfRange(lat))
    }
}

pub fn ensure_longitude(lon: f64) -> Result<f64> {
    ensure_finite("longitude", lon)?;
    if is_valid_longitude(lon) {
        Ok(lon)
    } else {
        Err(PointingError::LongitudeOutOfRange(lon))
    }
}

/// Fold any angle in degrees into [0, 360).
pub fn normalize_azimuth_deg(deg: f64) -> f64 {
    (deg % 360.0 + 360.0) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_ranges() {
        assert!(is_valid_latitude(90.0));
        assert!(is_valid_latitude(-90.0));
        assert!(!is_valid_latitude(90.000001));
        assert!(!is_valid_latitude(f64::NAN));
        assert!(is_valid_longitude(-180.0));
        assert!(!is_valid_longitude(f64::INFINITY));
    }

    #[test]
    fn test_ensure_finite_names_the_field() {
        let err = ensure_finite("sub_longitude", f64::NEG_INFINITY).unwrap_err();
        assert_eq!(err.to_string(), "sub_longitude must be a finite number, got -inf");
    }

    #[test]
    fn test_normalize_azimuth() {
        assert_eq!(normalize_azimuth_deg(-90.0), 270.0);
        assert_eq!(normalize_azimuth_deg(360.0), 0.0);
        assert_eq!(normalize_azimuth_deg(725.0), 5.0);
        assert_eq!(normalize_azimuth_deg(-1e-15), 0.0);
        assert_eq!(normalize_azimuth_deg(180.0), 180.0);
    }
}
