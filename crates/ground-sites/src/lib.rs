//! Ground Sites Library
//!
//! Static catalogs of configured ground sites and geostationary satellites,
//! plus the AOR/country/location filters that pick which sites are shown
//! and where the map should move.

use std::collections::{BTreeSet, HashSet};

use look_angles::{GroundPoint, PointingError, Satellite};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use viewport_projector::LatLng;

pub mod filter;
pub mod loader;

pub use filter::{Filter, FilterView, ViewChange, LOCATION_ZOOM};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{kind} not found: {value}")]
    NotFound { kind: &'static str, value: String },
    #[error("Duplicate satellite name: {0}")]
    DuplicateSatellite(String),
    #[error("Duplicate site label: {0}")]
    DuplicateSite(String),
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(#[from] PointingError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// A configured ground site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundSite {
    pub label: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Area of Responsibility tag
    pub aor: String,
}

impl GroundSite {
    pub fn new(
        label: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
        aor: impl Into<String>,
    ) -> Result<Self> {
        look_angles::validation::ensure_latitude(latitude)?;
        look_angles::validation::ensure_longitude(longitude)?;
        Ok(Self {
            label: label.into(),
            country: country.into(),
            latitude,
            longitude,
            aor: aor.into(),
        })
    }

    pub fn point(&self) -> GroundPoint {
        GroundPoint {
            label: self.label.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SiteCatalog {
    sites: Vec<GroundSite>,
}

impl SiteCatalog {
    pub fn new(sites: Vec<GroundSite>) -> Result<Self> {
        let mut seen = HashSet::new();
        for site in &sites {
            if !seen.insert(site.label.as_str()) {
                return Err(CatalogError::DuplicateSite(site.label.clone()));
            }
        }
        Ok(Self { sites })
    }

    pub fn builtin() -> Self {
        let sites = [("Busan", "South Korea", 35.1796, 129.0756, "AOR1")]
            .into_iter()
            .map(|(label, country, lat, lon, aor)| GroundSite {
                label: label.to_string(),
                country: country.to_string(),
                latitude: lat,
                longitude: lon,
                aor: aor.to_string(),
            })
            .collect();
        Self { sites }
    }

    pub fn get(&self, label: &str) -> Result<&GroundSite> {
        self.sites
            .iter()
            .find(|s| s.label == label)
            .ok_or_else(|| CatalogError::NotFound {
                kind: "Site",
                value: label.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroundSite> {
        self.sites.iter()
    }

    pub fn in_aor<'a, 'b>(&'a self, aor: &'b str) -> impl Iterator<Item = &'a GroundSite> + use<'a, 'b> {
        self.sites.iter().filter(move |s| s.aor == aor)
    }

    pub fn in_country<'a, 'b>(&'a self, country: &'b str) -> impl Iterator<Item = &'a GroundSite> + use<'a, 'b> {
        self.sites.iter().filter(move |s| s.country == country)
    }

    /// Distinct AOR tags, sorted, for populating a dropdown
    pub fn aors(&self) -> Vec<String> {
        distinct(self.sites.iter().map(|s| s.aor.as_str()))
    }

    pub fn countries(&self) -> Vec<String> {
        distinct(self.sites.iter().map(|s| s.country.as_str()))
    }

    pub fn labels(&self) -> Vec<String> {
        distinct(self.sites.iter().map(|s| s.label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Geostationary satellites keyed by unique name
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SatelliteCatalog {
    satellites: Vec<Satellite>,
}

impl SatelliteCatalog {
    pub fn new(satellites: Vec<Satellite>) -> Result<Self> {
        let mut seen = HashSet::new();
        for sat in &satellites {
            if !seen.insert(sat.name.as_str()) {
                return Err(CatalogError::DuplicateSatellite(sat.name.clone()));
            }
        }
        Ok(Self { satellites })
    }

    pub fn builtin() -> Self {
        let satellites = [
            ("ALT-3", 110.0),
            ("MUOS-4", 75.0),
            ("MUOS-3", -15.5),
            ("ALT-2", -24.0),
            ("MUOS-1", -100.0),
            ("MUOS-5", -105.0),
            ("ALT-1", -127.0),
            ("MUOS-2", -177.0),
        ]
        .into_iter()
        .map(|(name, sub_longitude)| Satellite {
            name: name.to_string(),
            sub_longitude,
        })
        .collect();
        Self { satellites }
    }

    pub fn get(&self, name: &str) -> Result<&Satellite> {
        self.satellites
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CatalogError::NotFound {
                kind: "Satellite",
                value: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Satellite> {
        self.satellites.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.satellites.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }
}

/// Sites and satellites, loaded once at startup
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    #[serde(rename = "locations")]
    pub sites: SiteCatalog,
    pub satellites: SatelliteCatalog,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            sites: SiteCatalog::builtin(),
            satellites: SatelliteCatalog::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(label: &str, country: &str, lat: f64, lon: f64, aor: &str) -> GroundSite {
        GroundSite::new(label, country, lat, lon, aor).unwrap()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.sites.len(), 1);
        assert_eq!(catalog.satellites.len(), 8);
        assert_eq!(catalog.sites.get("Busan").unwrap().aor, "AOR1");
        assert_eq!(catalog.satellites.get("MUOS-2").unwrap().sub_longitude, -177.0);
    }

    #[test]
    fn test_duplicate_satellite_rejected() {
        let sats = vec![
            Satellite::new("ALT-3", 110.0).unwrap(),
            Satellite::new("ALT-3", 111.0).unwrap(),
        ];
        match SatelliteCatalog::new(sats) {
            Err(CatalogError::DuplicateSatellite(name)) => assert_eq!(name, "ALT-3"),
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_site_rejected() {
        let sites = vec![
            site("Busan", "South Korea", 35.1796, 129.0756, "AOR1"),
            site("Busan", "South Korea", 35.2, 129.1, "AOR1"),
        ];
        assert!(matches!(SiteCatalog::new(sites), Err(CatalogError::DuplicateSite(_))));
    }

    #[test]
    fn test_site_rejects_bad_coordinates() {
        assert!(matches!(
            GroundSite::new("Nowhere", "XX", 120.0, 0.0, "AOR9"),
            Err(CatalogError::InvalidCoordinates(PointingError::LatitudeOutOfRange(_)))
        ));
    }

    #[test]
    fn test_dropdown_options_are_sorted_and_distinct() {
        let catalog = SiteCatalog::new(vec![
            site("Sasebo", "Japan", 33.16, 129.72, "AOR1"),
            site("Busan", "South Korea", 35.1796, 129.0756, "AOR1"),
            site("Rota", "Spain", 36.62, -6.35, "AOR2"),
        ])
        .unwrap();

        assert_eq!(catalog.aors(), vec!["AOR1", "AOR2"]);
        assert_eq!(catalog.countries(), vec!["Japan", "South Korea", "Spain"]);
        assert_eq!(catalog.labels(), vec!["Busan", "Rota", "Sasebo"]);
        assert_eq!(catalog.in_aor("AOR1").count(), 2);
        assert_eq!(catalog.in_country("Spain").count(), 1);
    }

    #[test]
    fn test_missing_lookup_names_kind() {
        let err = SatelliteCatalog::builtin().get("NOPE").unwrap_err();
        assert_eq!(err.to_string(), "Satellite not found: NOPE");
    }

    #[test]
    fn test_catalog_serializes_with_locations_key() {
        let json = serde_json::to_value(Catalog::builtin()).unwrap();
        assert_eq!(json["locations"][0]["label"], "Busan");
        assert_eq!(json["satellites"].as_array().unwrap().len(), 8);
    }
}
