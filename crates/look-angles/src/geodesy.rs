//! Ground and satellite positions, and the topocentric transform between them.
//!
//! The rotation into East-North-Up uses the geocentric latitude, the same
//! latitude used for the local radius. Mixing in the geodetic latitude here
//! shifts elevations by up to ~0.2° at mid latitudes.

use nalgebra::{Matrix3, Vector3};

use crate::validation::{ensure_finite, normalize_azimuth_deg};
use crate::{LookAngle, Result};

/// WGS84 semi-major axis
pub const WGS84_EQUATORIAL_RADIUS_KM: f64 = 6378.137;
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257223563;
/// Distance from Earth's centre to the geostationary arc
pub const GEOSTATIONARY_RADIUS_KM: f64 = 42164.0;

/// Geocentric latitude (radians) for a geodetic latitude (radians).
pub fn geocentric_latitude(geodetic_rad: f64) -> f64 {
    let axis_ratio_sq = (1.0 - WGS84_FLATTENING).powi(2);
    (axis_ratio_sq * geodetic_rad.tan()).atan()
}

/// Ellipsoid radius in km at a geocentric latitude (radians).
pub fn local_radius_km(geocentric_rad: f64) -> f64 {
    let axis_ratio_sq = (1.0 - WGS84_FLATTENING).powi(2);
    WGS84_EQUATORIAL_RADIUS_KM
        / (geocentric_rad.cos().powi(2) + axis_ratio_sq * geocentric_rad.sin().powi(2)).sqrt()
}

/// Earth-fixed position of a point on the ellipsoid surface.
pub fn ground_position_km(geocentric_rad: f64, lon_rad: f64) -> Vector3<f64> {
    let r = local_radius_km(geocentric_rad);
    Vector3::new(
        r * geocentric_rad.cos() * lon_rad.cos(),
        r * geocentric_rad.cos() * lon_rad.sin(),
        r * geocentric_rad.sin(),
    )
}

/// Earth-fixed position of a satellite on the geostationary arc.
pub fn geostationary_position_km(sub_lon_rad: f64) -> Vector3<f64> {
    Vector3::new(
        GEOSTATIONARY_RADIUS_KM * sub_lon_rad.cos(),
        GEOSTATIONARY_RADIUS_KM * sub_lon_rad.sin(),
        0.0,
    )
}

/// Rotation taking Earth-fixed vectors into the local East-North-Up frame.
pub fn enu_rotation(lat_rad: f64, lon_rad: f64) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();

    Matrix3::new(
        -sin_lon, cos_lon, 0.0,
        -sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat,
        cos_lat * cos_lon, cos_lat * sin_lon, sin_lat,
    )
}

/// Calculate look angles from a ground point to a geostationary satellite.
///
/// Returns `PointingError::NonFinite` for NaN or infinite input instead of
/// panicking; callers show a placeholder for that case. Ranges are not
/// enforced here, only finiteness.
///
/// Below-horizon satellites produce a negative elevation. Directly overhead
/// the horizontal component vanishes and the azimuth is arbitrary.
pub fn compute_look_angle(ground_lat_deg: f64, ground_lon_deg: f64, sat_sub_lon_deg: f64) -> Result<LookAngle> {
    let lat = ensure_finite("latitude", ground_lat_deg)?.to_radians();
    let lon = ensure_finite("longitude", ground_lon_deg)?.to_radians();
    let sub_lon = ensure_finite("sub_longitude", sat_sub_lon_deg)?.to_radians();

    let lat_gc = geocentric_latitude(lat);

    let range = geostationary_position_km(sub_lon) - ground_position_km(lat_gc, lon);
    let range_km = range.norm();

    let enu = enu_rotation(lat_gc, lon) * range;
    let (east, north, up) = (enu.x, enu.y, enu.z);

    let elevation_deg = (up / range_km).clamp(-1.0, 1.0).asin().to_degrees();
    let azimuth_deg = normalize_azimuth_deg(east.atan2(north).to_degrees());

    Ok(LookAngle {
        elevation_deg,
        azimuth_deg,
        range_km,
    })
}
