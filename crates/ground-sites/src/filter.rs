//! Site filters and the map view they imply
//!
//! One filter is active at a time. Applying it yields the sites to show and
//! where the map should go, in one place instead of per dropdown.

use serde::{Deserialize, Serialize};
use viewport_projector::{Bounds, LatLng};

use crate::{CatalogError, GroundSite, Result, SiteCatalog};

/// Zoom used when centring on a single site
pub const LOCATION_ZOOM: i32 = 8;

/// Dropdown value that resets to the world view
pub const WORLD_VIEW: &str = "world-view";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Filter {
    #[default]
    None,
    WorldView,
    Location(String),
    Aor(String),
    Country(String),
}

/// Map movement requested by a filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewChange {
    FitBounds { bounds: Bounds },
    Center { center: LatLng, zoom: i32 },
}

#[derive(Debug, Clone)]
pub struct FilterView<'a> {
    pub sites: Vec<&'a GroundSite>,
    /// Set only by a location filter
    pub location: Option<&'a GroundSite>,
    pub view: ViewChange,
}

impl Filter {
    /// Build a filter from a dropdown id and its selected value.
    ///
    /// An empty value clears the filter. Unknown dropdown ids give `None`.
    pub fn from_dropdown(id: &str, value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Some(Filter::None);
        }
        match id {
            "locationSelect" if value == WORLD_VIEW => Some(Filter::WorldView),
            "locationSelect" => Some(Filter::Location(value.to_string())),
            "aorFilter" | "aorFilterMobile" => Some(Filter::Aor(value.to_string())),
            "countryFilter" | "countryFilterMobile" => Some(Filter::Country(value.to_string())),
            _ => None,
        }
    }

    /// True for filters that narrow the map to a region of several sites
    pub fn restricts_region(&self) -> bool {
        matches!(self, Filter::Aor(_) | Filter::Country(_))
    }

    pub fn apply<'a>(&self, catalog: &'a SiteCatalog) -> Result<FilterView<'a>> {
        let world = ViewChange::FitBounds {
            bounds: Bounds::world(),
        };

        match self {
            Filter::None | Filter::WorldView => Ok(FilterView {
                sites: catalog.iter().collect(),
                location: None,
                view: world,
            }),
            Filter::Location(label) => {
                let site = catalog.get(label)?;
                Ok(FilterView {
                    sites: vec![site],
                    location: Some(site),
                    view: ViewChange::Center {
                        center: site.lat_lng(),
                        zoom: LOCATION_ZOOM,
                    },
                })
            }
            Filter::Aor(aor) => region_view(catalog.in_aor(aor).collect(), "AOR", aor),
            Filter::Country(country) => {
                region_view(catalog.in_country(country).collect(), "Country", country)
            }
        }
    }
}

fn region_view<'a>(sites: Vec<&'a GroundSite>, kind: &'static str, value: &str) -> Result<FilterView<'a>> {
    let bounds = Bounds::enclosing(sites.iter().map(|s| s.lat_lng())).ok_or_else(|| {
        CatalogError::NotFound {
            kind,
            value: value.to_string(),
        }
    })?;
    Ok(FilterView {
        sites,
        location: None,
        view: ViewChange::FitBounds { bounds },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SiteCatalog {
        SiteCatalog::new(vec![
            GroundSite::new("Busan", "South Korea", 35.1796, 129.0756, "AOR1").unwrap(),
            GroundSite::new("Pyeongtaek", "South Korea", 36.99, 127.11, "AOR1").unwrap(),
            GroundSite::new("Sasebo", "Japan", 33.16, 129.72, "AOR1").unwrap(),
            GroundSite::new("Rota", "Spain", 36.62, -6.35, "AOR2").unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_no_filter_shows_world() {
        let catalog = catalog();
        let view = Filter::None.apply(&catalog).unwrap();
        assert_eq!(view.sites.len(), 4);
        assert!(view.location.is_none());
        assert_eq!(view.view, ViewChange::FitBounds { bounds: Bounds::world() });
    }

    #[test]
    fn test_location_centres_on_site() {
        let catalog = catalog();
        let view = Filter::Location("Rota".into()).apply(&catalog).unwrap();
        assert_eq!(view.sites.len(), 1);
        assert_eq!(view.location.unwrap().label, "Rota");
        assert_eq!(
            view.view,
            ViewChange::Center {
                center: LatLng::new(36.62, -6.35),
                zoom: LOCATION_ZOOM
            }
        );
    }

    #[test]
    fn test_country_bounds_enclose_its_sites() {
        let catalog = catalog();
        let view = Filter::Country("South Korea".into()).apply(&catalog).unwrap();
        assert_eq!(view.sites.len(), 2);
        match view.view {
            ViewChange::FitBounds { bounds } => {
                assert_eq!(bounds, Bounds::new(36.99, 35.1796, 129.0756, 127.11));
                assert!(view.sites.iter().all(|s| bounds.contains(s.lat_lng())));
            }
            other => panic!("expected fit bounds, got {:?}", other),
        }
    }

    #[test]
    fn test_aor_bounds() {
        let catalog = catalog();
        let view = Filter::Aor("AOR1".into()).apply(&catalog).unwrap();
        assert_eq!(view.sites.len(), 3);
        assert_eq!(
            view.view,
            ViewChange::FitBounds {
                bounds: Bounds::new(36.99, 33.16, 129.72, 127.11)
            }
        );
    }

    #[test]
    fn test_unknown_values_are_not_found() {
        let catalog = catalog();
        assert!(matches!(
            Filter::Aor("AOR9".into()).apply(&catalog),
            Err(CatalogError::NotFound { kind: "AOR", .. })
        ));
        assert!(matches!(
            Filter::Location("Atlantis".into()).apply(&catalog),
            Err(CatalogError::NotFound { kind: "Site", .. })
        ));
    }

    #[test]
    fn test_from_dropdown() {
        assert_eq!(Filter::from_dropdown("locationSelect", WORLD_VIEW), Some(Filter::WorldView));
        assert_eq!(
            Filter::from_dropdown("locationSelect", "Busan"),
            Some(Filter::Location("Busan".into()))
        );
        assert_eq!(Filter::from_dropdown("aorFilterMobile", "AOR1"), Some(Filter::Aor("AOR1".into())));
        assert_eq!(Filter::from_dropdown("countryFilter", ""), Some(Filter::None));
        assert_eq!(Filter::from_dropdown("antenna-toggle", "x"), None);
    }

    #[test]
    fn test_region_restriction() {
        assert!(Filter::Aor("AOR1".into()).restricts_region());
        assert!(Filter::Country("Spain".into()).restricts_region());
        assert!(!Filter::Location("Busan".into()).restricts_region());
        assert!(!Filter::None.restricts_region());
    }
}
