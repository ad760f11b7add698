//! Pointing Map Browser Bridge
//!
//! Thin JSON layer between the map page and the geometry crates:
//! - Look angle from a ground point to a satellite sub-longitude
//! - Indicator endpoints and viewport crossings
//! - Label anchors for the current viewport
//! - A `SiteMap` over a catalog for per-site look tables
//!
//! The native functions return plain serde values and are what the tests
//! exercise. With the `wasm` feature they are exported through
//! `wasm-bindgen` as JSON strings, `null` where the geometry is invalid.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use look_angles::LookAngle;
use serde::{Deserialize, Serialize};
use viewport_projector::{Bounds, IndicatorEndpoint, LabelAnchor, LatLng, Viewport};

pub mod site_map;

pub use site_map::{SatelliteLook, SiteMap};

/// Look angle as sent to the page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookAngleDto {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
    pub above_horizon: bool,
}

impl From<LookAngle> for LookAngleDto {
    fn from(look: LookAngle) -> Self {
        Self {
            elevation_deg: look.elevation_deg,
            azimuth_deg: look.azimuth_deg,
            range_km: look.range_km,
            above_horizon: look.is_above_horizon(),
        }
    }
}

// ============================================================================
// Core functions (used by both WASM and native)
// ============================================================================

/// Look angle, `None` for non-finite input
pub fn look_angle(lat: f64, lon: f64, sub_longitude: f64) -> Option<LookAngleDto> {
    look_angles::compute_look_angle(lat, lon, sub_longitude)
        .ok()
        .map(LookAngleDto::from)
}

fn finite(p: LatLng) -> Option<LatLng> {
    (p.lat.is_finite() && p.lon.is_finite()).then_some(p)
}

/// Indicator endpoint, `None` when the result is not a finite coordinate
pub fn destination(lat: f64, lon: f64, azimuth_deg: f64, length_km: f64) -> Option<LatLng> {
    finite(viewport_projector::destination_point(lat, lon, azimuth_deg, length_km))
}

/// First crossing of `start -> end` with the bounds
pub fn intersect(start: LatLng, end: LatLng, bounds: &Bounds) -> Option<LatLng> {
    viewport_projector::intersect_bounds(start, end, bounds)
}

/// Label anchor for an indicator from `origin` along `azimuth_deg`
pub fn label_anchor(origin: LatLng, azimuth_deg: f64, viewport: &Viewport) -> Option<LabelAnchor> {
    finite(origin)?;
    if !azimuth_deg.is_finite() {
        return None;
    }
    Some(IndicatorEndpoint::new(origin, azimuth_deg).anchor_for(viewport))
}

// ============================================================================
// WASM EXPORTS
// ============================================================================

#[cfg(feature = "wasm")]
fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = lookAngle)]
pub fn look_angle_json(lat: f64, lon: f64, sub_longitude: f64) -> String {
    to_json(&look_angle(lat, lon, sub_longitude))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = destinationPoint)]
pub fn destination_json(lat: f64, lon: f64, azimuth_deg: f64, length_km: f64) -> String {
    to_json(&destination(lat, lon, azimuth_deg, length_km))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = indicatorLengthKm)]
pub fn indicator_length_km(zoom: i32) -> f64 {
    viewport_projector::indicator_length_km(zoom)
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = intersectBounds)]
#[allow(clippy::too_many_arguments)]
pub fn intersect_json(
    start_lat: f64,
    start_lon: f64,
    end_lat: f64,
    end_lon: f64,
    north: f64,
    south: f64,
    east: f64,
    west: f64,
) -> String {
    let bounds = Bounds::new(north, south, east, west);
    to_json(&intersect(
        LatLng::new(start_lat, start_lon),
        LatLng::new(end_lat, end_lon),
        &bounds,
    ))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = labelAnchor)]
#[allow(clippy::too_many_arguments)]
pub fn label_anchor_json(
    origin_lat: f64,
    origin_lon: f64,
    azimuth_deg: f64,
    north: f64,
    south: f64,
    east: f64,
    west: f64,
    zoom: i32,
) -> String {
    let viewport = Viewport::new(Bounds::new(north, south, east, west), zoom);
    to_json(&label_anchor(
        LatLng::new(origin_lat, origin_lon),
        azimuth_deg,
        &viewport,
    ))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct PointingMap {
    inner: SiteMap,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl PointingMap {
    /// Build from catalog JSON
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str) -> Result<PointingMap, JsValue> {
        let inner = SiteMap::from_json(catalog_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid catalog: {}", e)))?;
        Ok(Self { inner })
    }

    /// Look angles to every satellite from a point
    #[wasm_bindgen(js_name = lookAngles)]
    pub fn look_angles(&self, lat: f64, lon: f64) -> String {
        to_json(&self.inner.look_angles(lat, lon))
    }

    /// Look angles to every satellite from a configured site
    #[wasm_bindgen(js_name = siteLookAngles)]
    pub fn site_look_angles(&self, label: &str) -> Result<String, JsValue> {
        self.inner
            .site_look_angles(label)
            .map(|looks| to_json(&looks))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Sites and map movement for a dropdown selection
    #[wasm_bindgen(js_name = applyDropdown)]
    pub fn apply_dropdown(&self, id: &str, value: &str) -> Result<String, JsValue> {
        self.inner
            .apply_dropdown(id, value)
            .map(|view| to_json(&view))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = dropdownOptions)]
    pub fn dropdown_options(&self) -> String {
        to_json(&self.inner.dropdown_options())
    }
}
