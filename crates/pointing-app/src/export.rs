//! GeoJSON export of the rendered map

use chrono::Utc;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use ground_sites::GroundSite;
use serde_json::json;

use crate::state::{AppState, Indicator};

fn properties(value: serde_json::Value) -> Option<JsonObject> {
    match value {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

fn site_feature(site: &GroundSite) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![site.longitude, site.latitude]))),
        id: None,
        properties: properties(json!({
            "kind": "site",
            "label": site.label,
            "country": site.country,
            "aor": site.aor,
        })),
        foreign_members: None,
    }
}

fn indicator_feature(indicator: &Indicator) -> Feature {
    let origin = indicator.endpoint.origin();
    let end = indicator.endpoint.current();
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(vec![
            vec![origin.lon, origin.lat],
            vec![end.lon, end.lat],
        ]))),
        id: None,
        properties: properties(json!({
            "kind": "indicator",
            "satellite": indicator.satellite,
            "azimuth_deg": indicator.look.azimuth_deg,
            "elevation_deg": indicator.look.elevation_deg,
            "range_km": indicator.look.range_km,
            "label_class": indicator.label_class,
        })),
        foreign_members: None,
    }
}

/// Sites as points and indicator lines as line strings, in `[lon, lat]`
/// order
pub fn to_geojson(state: &AppState) -> FeatureCollection {
    let features = state
        .catalog()
        .sites
        .iter()
        .map(site_feature)
        .chain(state.indicators().iter().map(indicator_feature))
        .collect();

    let location = state.location().map(|p| {
        json!({
            "label": p.label,
            "latitude": p.latitude,
            "longitude": p.longitude,
        })
    });

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: properties(json!({
            "metadata": {
                "generated_at": Utc::now().to_rfc3339(),
                "location": location,
                "filter": state.filter(),
                "indicator_count": state.indicators().len(),
            }
        })),
    }
}
