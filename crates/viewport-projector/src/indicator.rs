//! Look-direction indicator endpoints

use serde::{Deserialize, Serialize};

use crate::{
    destination_point, indicator_length_km, intersect_bounds, LatLng, Viewport,
    BASE_INDICATOR_LENGTH_KM,
};

/// Where a label should sit for the current viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LabelAnchor {
    /// The zoom-scaled endpoint is visible as is.
    Inside(LatLng),
    /// The endpoint is off-screen; this is where the line leaves the view.
    Clamped(LatLng),
    /// The line never crosses the view. The caller picks a position.
    Unresolved { projected: LatLng },
}

impl LabelAnchor {
    pub fn point(&self) -> Option<LatLng> {
        match self {
            LabelAnchor::Inside(p) | LabelAnchor::Clamped(p) => Some(*p),
            LabelAnchor::Unresolved { .. } => None,
        }
    }
}

/// Far end of a drawn look-direction line.
///
/// Origin and azimuth are fixed at creation; only the displayed endpoint
/// moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorEndpoint {
    origin: LatLng,
    azimuth_deg: f64,
    current: LatLng,
}

impl IndicatorEndpoint {
    pub fn new(origin: LatLng, azimuth_deg: f64) -> Self {
        let current = destination_point(origin.lat, origin.lon, azimuth_deg, BASE_INDICATOR_LENGTH_KM);
        Self {
            origin,
            azimuth_deg,
            current,
        }
    }

    pub fn origin(&self) -> LatLng {
        self.origin
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth_deg
    }

    pub fn current(&self) -> LatLng {
        self.current
    }

    /// Endpoint of the line at a given zoom level
    pub fn projected_end(&self, zoom: i32) -> LatLng {
        destination_point(
            self.origin.lat,
            self.origin.lon,
            self.azimuth_deg,
            indicator_length_km(zoom),
        )
    }

    pub fn anchor_for(&self, viewport: &Viewport) -> LabelAnchor {
        let end = self.projected_end(viewport.zoom);
        if viewport.bounds.contains(end) {
            return LabelAnchor::Inside(end);
        }
        match intersect_bounds(self.origin, end, &viewport.bounds) {
            Some(p) => LabelAnchor::Clamped(p),
            None => LabelAnchor::Unresolved { projected: end },
        }
    }

    pub fn move_to(&mut self, position: LatLng) {
        self.current = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bounds, REFERENCE_ZOOM};

    fn busan() -> LatLng {
        LatLng::new(35.1796, 129.0756)
    }

    #[test]
    fn test_new_places_endpoint_at_base_length() {
        let ind = IndicatorEndpoint::new(busan(), 211.086);
        assert_eq!(ind.current(), destination_point(35.1796, 129.0756, 211.086, 50.0));
        assert_eq!(ind.current(), ind.projected_end(REFERENCE_ZOOM));
    }

    #[test]
    fn test_inside_when_view_is_wide() {
        let ind = IndicatorEndpoint::new(busan(), 211.086);
        let view = Viewport::new(Bounds::world(), REFERENCE_ZOOM);
        assert_eq!(ind.anchor_for(&view), LabelAnchor::Inside(ind.projected_end(REFERENCE_ZOOM)));
    }

    #[test]
    fn test_clamped_to_edge_when_endpoint_off_screen() {
        // Looking due east from Busan in a view that ends at 129.2°E
        let ind = IndicatorEndpoint::new(busan(), 90.0);
        let view = Viewport::new(Bounds::new(36.0, 34.0, 129.2, 128.0), REFERENCE_ZOOM);
        match ind.anchor_for(&view) {
            LabelAnchor::Clamped(p) => {
                assert_eq!(p.lon, 129.2);
                assert!((p.lat - 35.1796).abs() < 1e-9);
            }
            other => panic!("expected clamped anchor, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_when_origin_panned_away() {
        let ind = IndicatorEndpoint::new(busan(), 90.0);
        let view = Viewport::new(Bounds::new(10.0, -10.0, 10.0, -10.0), 5);
        let anchor = ind.anchor_for(&view);
        assert!(matches!(anchor, LabelAnchor::Unresolved { .. }));
        assert!(anchor.point().is_none());
    }

    #[test]
    fn test_move_keeps_direction() {
        let mut ind = IndicatorEndpoint::new(busan(), 45.0);
        ind.move_to(LatLng::new(36.0, 130.0));
        assert_eq!(ind.current(), LatLng::new(36.0, 130.0));
        assert_eq!(ind.origin(), busan());
        assert_eq!(ind.azimuth_deg(), 45.0);
    }
}
