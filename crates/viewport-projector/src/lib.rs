//! Viewport Projector
//!
//! Places the far end of a look-direction line drawn from a ground point,
//! and keeps its label inside the visible map rectangle as the map pans and
//! zooms. All functions are pure; the map widget owns the viewport.
//!
//! Distances here use a flat-Earth local approximation on a sphere of mean
//! radius 6371 km. That is good for indicator lines of a few hundred km and
//! is not a geodesic.

use serde::{Deserialize, Serialize};

pub mod bounds;
pub mod destination;
pub mod indicator;

pub use bounds::{intersect_bounds, nearest_crossing, Crossing, Edge};
pub use destination::{
    destination_point, indicator_length_km, initial_bearing_deg, BASE_INDICATOR_LENGTH_KM,
    MEAN_EARTH_RADIUS_KM, REFERENCE_ZOOM,
};
pub use indicator::{IndicatorEndpoint, LabelAnchor};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Rectangular lat/lon box, edges in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    pub const fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self { north, south, east, west }
    }

    /// Default map extent. The eastern edge stops at 150°E, matching the
    /// map's max bounds.
    pub const fn world() -> Self {
        Self::new(90.0, -90.0, 150.0, -180.0)
    }

    /// Smallest box holding every point, or `None` for an empty input.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self::new(p.lat, p.lat, p.lon, p.lon),
                Some(b) => Self::new(
                    b.north.max(p.lat),
                    b.south.min(p.lat),
                    b.east.max(p.lon),
                    b.west.min(p.lon),
                ),
            })
        })
    }

    /// Edge-inclusive containment.
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lon >= self.west && p.lon <= self.east
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }
}

/// What the map is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub bounds: Bounds,
    pub zoom: i32,
}

impl Viewport {
    pub const fn new(bounds: Bounds, zoom: i32) -> Self {
        Self { bounds, zoom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosing_box() {
        let b = Bounds::enclosing([
            LatLng::new(35.0, 129.0),
            LatLng::new(37.5, 127.0),
            LatLng::new(33.5, 126.5),
        ])
        .unwrap();
        assert_eq!(b, Bounds::new(37.5, 33.5, 129.0, 126.5));
        assert!(Bounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn test_contains_is_edge_inclusive() {
        let b = Bounds::new(10.0, -10.0, 10.0, -10.0);
        assert!(b.contains(LatLng::new(10.0, -10.0)));
        assert!(b.contains(LatLng::new(0.0, 0.0)));
        assert!(!b.contains(LatLng::new(10.0001, 0.0)));
        assert!(!b.contains(LatLng::new(0.0, f64::NAN)));
    }

    #[test]
    fn test_world_extent() {
        let world = Bounds::world();
        assert!(world.contains(LatLng::new(35.1796, 129.0756)));
        assert!(!world.contains(LatLng::new(0.0, 170.0)));
        assert_eq!(world.center(), LatLng::new(0.0, -15.0));
    }
}
