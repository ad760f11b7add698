//! Segment/rectangle intersection for clamping labels to the viewport

use serde::{Deserialize, Serialize};

use crate::{Bounds, LatLng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    North,
    South,
    East,
    West,
}

/// Where a segment crosses a viewport edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    pub point: LatLng,
    pub edge: Edge,
    /// Segment parameter in [0, 1]; 0 is the start point
    pub t: f64,
}

fn crossings(start: LatLng, end: LatLng, bounds: &Bounds) -> impl Iterator<Item = Crossing> {
    let d_lat = end.lat - start.lat;
    let d_lon = end.lon - start.lon;
    let b = *bounds;

    let lat_edges = [(Edge::North, b.north), (Edge::South, b.south)]
        .into_iter()
        .filter(move |_| d_lat != 0.0)
        .filter_map(move |(edge, lat)| {
            let t = (lat - start.lat) / d_lat;
            let lon = start.lon + t * d_lon;
            ((0.0..=1.0).contains(&t) && lon >= b.west && lon <= b.east).then_some(Crossing {
                point: LatLng::new(lat, lon),
                edge,
                t,
            })
        });

    let lon_edges = [(Edge::East, b.east), (Edge::West, b.west)]
        .into_iter()
        .filter(move |_| d_lon != 0.0)
        .filter_map(move |(edge, lon)| {
            let t = (lon - start.lon) / d_lon;
            let lat = start.lat + t * d_lat;
            ((0.0..=1.0).contains(&t) && lat >= b.south && lat <= b.north).then_some(Crossing {
                point: LatLng::new(lat, lon),
                edge,
                t,
            })
        });

    lat_edges.chain(lon_edges)
}

/// Edge crossing closest to `start` along the segment `start -> end`.
///
/// Edges are tested north, south, east, west; on equal `t` the earlier edge
/// wins.
pub fn nearest_crossing(start: LatLng, end: LatLng, bounds: &Bounds) -> Option<Crossing> {
    crossings(start, end, bounds).fold(None, |closest, current| match closest {
        Some(c) if c.t <= current.t => Some(c),
        _ => Some(current),
    })
}

/// Point where the segment first crosses the viewport edge, or `None` when it
/// never does (fully inside, or outside without touching). Callers need
/// their own fallback for `None`.
pub fn intersect_bounds(start: LatLng, end: LatLng, bounds: &Bounds) -> Option<LatLng> {
    nearest_crossing(start, end, bounds).map(|c| c.point)
}
