//! Destination points along an azimuth

use std::f64::consts::PI;

use crate::LatLng;

/// Mean Earth radius used for indicator geometry. Deliberately not the
/// WGS84 semi-major axis used by the look-angle code.
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// Indicator length when first drawn, and at `REFERENCE_ZOOM`
pub const BASE_INDICATOR_LENGTH_KM: f64 = 50.0;
pub const REFERENCE_ZOOM: i32 = 8;

/// Point reached by travelling `length_km` from the origin along
/// `azimuth_deg`, using an equirectangular small-distance approximation.
///
/// The longitude step divides by cos(latitude), so beyond ±89.9° the result
/// grows without bound and is infinite at the poles. It never panics.
pub fn destination_point(origin_lat: f64, origin_lon: f64, azimuth_deg: f64, length_km: f64) -> LatLng {
    let angular_deg = (length_km / MEAN_EARTH_RADIUS_KM) * (180.0 / PI);
    let azimuth = azimuth_deg * PI / 180.0;

    LatLng {
        lat: origin_lat + angular_deg * azimuth.cos(),
        lon: origin_lon + angular_deg * azimuth.sin() / (origin_lat * PI / 180.0).cos(),
    }
}

/// Indicator length for a zoom level: doubles for every level zoomed out
/// from `REFERENCE_ZOOM`, halves for every level zoomed in.
pub fn indicator_length_km(zoom: i32) -> f64 {
    BASE_INDICATOR_LENGTH_KM * 2f64.powi(REFERENCE_ZOOM - zoom)
}

/// Initial great-circle bearing from one point to another, degrees in [0, 360).
pub fn initial_bearing_deg(from: LatLng, to: LatLng) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let x = delta_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    (x.atan2(y).to_degrees() + 360.0) % 360.0
}
