//! Catalog loading from JSON files
//!
//! Accepts the page data-table keys (`city`, `lat`, `lon`, `centerLon`)
//! as well as the field names used in this crate.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use look_angles::validation::{is_valid_latitude, is_valid_longitude};
use look_angles::Satellite;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{Catalog, GroundSite, Result, SatelliteCatalog, SiteCatalog};

/// Strip control characters and cap the length
fn sanitize_label(label: String) -> String {
    label
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(256)
        .collect()
}

#[derive(Debug, Deserialize)]
struct RawSite {
    #[serde(alias = "city")]
    label: Option<String>,
    country: Option<String>,
    #[serde(alias = "lat")]
    latitude: Option<f64>,
    #[serde(alias = "lon")]
    longitude: Option<f64>,
    aor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSatellite {
    name: Option<String>,
    #[serde(alias = "centerLon")]
    sub_longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default, alias = "sites")]
    locations: Vec<RawSite>,
    #[serde(default)]
    satellites: Vec<RawSatellite>,
}

fn parse_sites(raw: Vec<RawSite>) -> Result<SiteCatalog> {
    let mut sites = Vec::with_capacity(raw.len());
    let mut skipped = 0;

    for (i, site) in raw.into_iter().enumerate() {
        let (Some(lat), Some(lon)) = (site.latitude, site.longitude) else {
            warn!("Skipping site #{}: missing coordinates", i);
            skipped += 1;
            continue;
        };
        if !is_valid_latitude(lat) || !is_valid_longitude(lon) {
            warn!("Skipping site #{}: coordinates out of range ({}, {})", i, lat, lon);
            skipped += 1;
            continue;
        }
        let Some(label) = site.label.map(sanitize_label).filter(|l| !l.is_empty()) else {
            warn!("Skipping site #{}: missing label", i);
            skipped += 1;
            continue;
        };

        sites.push(GroundSite {
            label,
            country: site.country.map(sanitize_label).unwrap_or_default(),
            latitude: lat,
            longitude: lon,
            aor: site.aor.map(sanitize_label).unwrap_or_default(),
        });
    }

    info!("Loaded {} sites ({} skipped)", sites.len(), skipped);
    SiteCatalog::new(sites)
}

fn parse_satellites(raw: Vec<RawSatellite>) -> Result<SatelliteCatalog> {
    let mut satellites = Vec::with_capacity(raw.len());
    let mut skipped = 0;

    for (i, sat) in raw.into_iter().enumerate() {
        let name = sat.name.map(sanitize_label).filter(|n| !n.is_empty());
        match (name, sat.sub_longitude) {
            (Some(name), Some(lon)) if is_valid_longitude(lon) => {
                satellites.push(Satellite {
                    name,
                    sub_longitude: lon,
                });
            }
            _ => {
                warn!("Skipping satellite #{}: missing name or sub-longitude", i);
                skipped += 1;
            }
        }
    }

    info!("Loaded {} satellites ({} skipped)", satellites.len(), skipped);
    SatelliteCatalog::new(satellites)
}

impl Catalog {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Ok(Self {
            sites: parse_sites(raw.locations)?,
            satellites: parse_satellites(raw.satellites)?,
        })
    }
}

/// Load a catalog from a JSON file
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    info!("Loading catalog from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: RawCatalog = serde_json::from_reader(reader)?;

    Ok(Catalog {
        sites: parse_sites(raw.locations)?,
        satellites: parse_satellites(raw.satellites)?,
    })
}
