//! Catalog-backed look tables for the page

use ground_sites::{Catalog, CatalogError, Filter, ViewChange};
use look_angles::GroundPoint;
use serde::{Deserialize, Serialize};

use crate::LookAngleDto;

/// One satellite as seen from a ground point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteLook {
    pub name: String,
    pub sub_longitude: f64,
    /// `None` when the look angle cannot be computed
    pub look: Option<LookAngleDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMarker {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownView {
    pub sites: Vec<SiteMarker>,
    pub location: Option<String>,
    pub view: ViewChange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOptions {
    pub locations: Vec<String>,
    pub aors: Vec<String>,
    pub countries: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SiteMap {
    catalog: Catalog,
}

impl SiteMap {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Catalog::from_json_str(json).map(Self::new)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look angles to every satellite, in catalog order
    pub fn look_angles(&self, lat: f64, lon: f64) -> Vec<SatelliteLook> {
        self.catalog
            .satellites
            .iter()
            .map(|sat| SatelliteLook {
                name: sat.name.clone(),
                sub_longitude: sat.sub_longitude,
                look: crate::look_angle(lat, lon, sat.sub_longitude),
            })
            .collect()
    }

    pub fn site_look_angles(&self, label: &str) -> Result<Vec<SatelliteLook>, CatalogError> {
        let GroundPoint {
            latitude,
            longitude,
            ..
        } = self.catalog.sites.get(label)?.point();
        Ok(self.look_angles(latitude, longitude))
    }

    /// Apply a dropdown change. Unknown dropdown ids leave the map where it
    /// is and show every site.
    pub fn apply_dropdown(&self, id: &str, value: &str) -> Result<DropdownView, CatalogError> {
        let filter = Filter::from_dropdown(id, value).unwrap_or_default();
        let view = filter.apply(&self.catalog.sites)?;
        Ok(DropdownView {
            sites: view
                .sites
                .iter()
                .map(|s| SiteMarker {
                    label: s.label.clone(),
                    latitude: s.latitude,
                    longitude: s.longitude,
                })
                .collect(),
            location: view.location.map(|s| s.label.clone()),
            view: view.view,
        })
    }

    pub fn dropdown_options(&self) -> DropdownOptions {
        DropdownOptions {
            locations: self.catalog.sites.labels(),
            aors: self.catalog.sites.aors(),
            countries: self.catalog.sites.countries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "locations": [
            {"city": "Busan", "country": "South Korea", "lat": 35.1796, "lon": 129.0756, "aor": "AOR1"},
            {"city": "Rota", "country": "Spain", "lat": 36.62, "lon": -6.35, "aor": "AOR2"}
        ],
        "satellites": [
            {"name": "ALT-3", "centerLon": 110.0},
            {"name": "MUOS-3", "centerLon": -15.5}
        ]
    }"#;

    #[test]
    fn test_site_look_angles() {
        let map = SiteMap::from_json(CATALOG).unwrap();
        let looks = map.site_look_angles("Busan").unwrap();
        assert_eq!(looks.len(), 2);
        assert_eq!(looks[0].name, "ALT-3");
        assert!(looks[0].look.unwrap().above_horizon);
        assert!(!looks[1].look.unwrap().above_horizon);
        assert!(map.site_look_angles("Atlantis").is_err());
    }

    #[test]
    fn test_invalid_point_gives_null_looks() {
        let map = SiteMap::from_json(CATALOG).unwrap();
        let looks = map.look_angles(f64::NAN, 0.0);
        assert!(looks.iter().all(|l| l.look.is_none()));
        let json = serde_json::to_value(&looks).unwrap();
        assert!(json[0]["look"].is_null());
    }

    #[test]
    fn test_apply_dropdown() {
        let map = SiteMap::from_json(CATALOG).unwrap();
        let view = map.apply_dropdown("countryFilter", "Spain").unwrap();
        assert_eq!(view.sites.len(), 1);
        assert_eq!(view.sites[0].label, "Rota");

        let view = map.apply_dropdown("locationSelect", "Busan").unwrap();
        assert_eq!(view.location.as_deref(), Some("Busan"));

        let view = map.apply_dropdown("somethingElse", "x").unwrap();
        assert_eq!(view.sites.len(), 2);
    }

    #[test]
    fn test_dropdown_options() {
        let options = SiteMap::from_json(CATALOG).unwrap().dropdown_options();
        assert_eq!(options.locations, vec!["Busan", "Rota"]);
        assert_eq!(options.aors, vec!["AOR1", "AOR2"]);
        assert_eq!(options.countries, vec!["South Korea", "Spain"]);
    }

    #[test]
    fn test_bad_catalog_json() {
        assert!(matches!(SiteMap::from_json("{"), Err(CatalogError::Json(_))));
    }
}
