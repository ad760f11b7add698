//! Screen-space projection of the map widget

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use viewport_projector::{Bounds, LatLng, Viewport};

/// Leaflet's Web Mercator latitude limit
const MAX_LATITUDE: f64 = 85.051_128_779_806_6;
const TILE_SIZE_PX: f64 = 256.0;

/// Pixel position inside the map container, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Conversion between geographic and container coordinates
pub trait ScreenProjection {
    fn to_screen(&self, p: LatLng) -> ScreenPoint;
    fn to_geo(&self, p: ScreenPoint) -> LatLng;
}

/// A Web Mercator map view of a given container size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercatorView {
    pub center: LatLng,
    pub zoom: i32,
    pub width_px: f64,
    pub height_px: f64,
}

impl WebMercatorView {
    pub fn new(center: LatLng, zoom: i32, width_px: f64, height_px: f64) -> Self {
        Self {
            center,
            zoom,
            width_px,
            height_px,
        }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE_PX * 2f64.powi(self.zoom)
    }

    fn project(&self, p: LatLng) -> (f64, f64) {
        let size = self.world_size();
        let lat = p.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (p.lon + 180.0) / 360.0 * size;
        let y = (1.0 - (PI / 4.0 + lat / 2.0).tan().ln() / PI) / 2.0 * size;
        (x, y)
    }

    fn unproject(&self, x: f64, y: f64) -> LatLng {
        let size = self.world_size();
        let lon = x / size * 360.0 - 180.0;
        let lat = (2.0 * (PI * (1.0 - 2.0 * y / size)).exp().atan() - PI / 2.0).to_degrees();
        LatLng::new(lat, lon)
    }

    fn pixel_origin(&self) -> (f64, f64) {
        let (cx, cy) = self.project(self.center);
        (cx - self.width_px / 2.0, cy - self.height_px / 2.0)
    }

    /// Visible rectangle and zoom, as the map reports them after a pan/zoom
    pub fn viewport(&self) -> Viewport {
        let north_west = self.to_geo(ScreenPoint { x: 0.0, y: 0.0 });
        let south_east = self.to_geo(ScreenPoint {
            x: self.width_px,
            y: self.height_px,
        });
        Viewport::new(
            Bounds::new(north_west.lat, south_east.lat, south_east.lon, north_west.lon),
            self.zoom,
        )
    }
}

impl ScreenProjection for WebMercatorView {
    fn to_screen(&self, p: LatLng) -> ScreenPoint {
        let (x, y) = self.project(p);
        let (ox, oy) = self.pixel_origin();
        ScreenPoint { x: x - ox, y: y - oy }
    }

    fn to_geo(&self, p: ScreenPoint) -> LatLng {
        let (ox, oy) = self.pixel_origin();
        self.unproject(p.x + ox, p.y + oy)
    }
}
