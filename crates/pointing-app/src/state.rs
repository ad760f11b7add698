//! Application state for the pointing map
//!
//! One owner for everything the map renders from: the active filter, the
//! current ground location, which satellites are checked and the indicator
//! lines drawn for them. Every mutation rebuilds the indicators, so they
//! never lag the location or the selection.

use std::collections::HashMap;

use ground_sites::{Catalog, Filter, GroundSite, ViewChange};
use look_angles::{GroundPoint, LookAngle, Satellite};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use viewport_projector::{IndicatorEndpoint, LabelAnchor, LatLng, Viewport};

use crate::screen::{ScreenPoint, ScreenProjection};
use crate::table::{AntennaRow, LocationRow};
use crate::text::{self, Announcement, PopupTarget};
use crate::{AppConfig, Result};

/// Checked by default iff the satellite is above the horizon and no
/// AOR/country filter is active
pub fn default_checked(look: Option<&LookAngle>, filter: &Filter) -> bool {
    look.is_some_and(LookAngle::is_above_horizon) && !filter.restricts_region()
}

/// Result of applying a filter, detached from the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome {
    pub sites: Vec<GroundSite>,
    pub location: Option<GroundPoint>,
    pub view: ViewChange,
}

/// A drawn look-direction line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub satellite: String,
    pub look: LookAngle,
    pub endpoint: IndicatorEndpoint,
    pub label_class: String,
}

impl Indicator {
    pub fn new(satellite: &Satellite, origin: LatLng, look: LookAngle) -> Self {
        let label_class = if look.is_above_horizon() {
            ""
        } else {
            "negative-elevation"
        };
        Self {
            satellite: satellite.name.clone(),
            endpoint: IndicatorEndpoint::new(origin, look.azimuth_deg),
            look,
            label_class: label_class.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelPlacement {
    /// Placed where the projector put it
    Anchored { position: LatLng },
    /// Offset from the origin on screen because the line never crosses the
    /// view
    ScreenFallback { screen: ScreenPoint, position: LatLng },
}

impl LabelPlacement {
    pub fn position(&self) -> LatLng {
        match self {
            LabelPlacement::Anchored { position } | LabelPlacement::ScreenFallback { position, .. } => {
                *position
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelUpdate {
    pub satellite: String,
    pub anchor: LabelAnchor,
    pub placement: LabelPlacement,
}

#[derive(Debug, Clone)]
pub struct AppState {
    config: AppConfig,
    catalog: Catalog,
    filter: Filter,
    location: Option<GroundPoint>,
    /// Explicit checkbox choices; cleared whenever the location or filter
    /// changes
    overrides: HashMap<String, bool>,
    indicators: Vec<Indicator>,
}

impl AppState {
    pub fn new(catalog: Catalog, config: AppConfig) -> Self {
        Self {
            config,
            catalog,
            filter: Filter::None,
            location: None,
            overrides: HashMap::new(),
            indicators: Vec::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn location(&self) -> Option<&GroundPoint> {
        self.location.as_ref()
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    /// Apply a dropdown filter.
    ///
    /// A location filter selects that site; the world view clears the
    /// location; AOR and country filters keep whatever location is set.
    pub fn apply_filter(&mut self, filter: Filter) -> Result<FilterOutcome> {
        let view = filter.apply(&self.catalog.sites)?;
        let sites: Vec<GroundSite> = view.sites.into_iter().cloned().collect();
        let selected = view.location.map(GroundSite::point);
        let change = view.view;

        match (&filter, selected) {
            (_, Some(point)) => self.location = Some(point),
            (Filter::WorldView, None) => self.location = None,
            _ => {}
        }
        info!("Applied filter {:?}: {} sites", filter, sites.len());

        self.filter = filter;
        self.overrides.clear();
        self.rebuild_indicators();

        Ok(FilterOutcome {
            sites,
            location: self.location.clone(),
            view: change,
        })
    }

    /// Place or move the custom marker
    pub fn set_location(&mut self, point: GroundPoint) -> Vec<Announcement> {
        debug!(
            "Location set to {} ({}, {})",
            point.label, point.latitude, point.longitude
        );
        self.location = Some(point);
        self.overrides.clear();
        self.rebuild_indicators()
    }

    pub fn clear_location(&mut self) {
        self.location = None;
        self.overrides.clear();
        self.indicators.clear();
    }

    /// Look angle from the current location, `None` without a location or
    /// for geometry that cannot be computed
    pub fn look_angle(&self, satellite: &Satellite) -> Option<LookAngle> {
        let location = self.location.as_ref()?;
        match location.look_angle_to(satellite) {
            Ok(look) => Some(look),
            Err(e) => {
                warn!("No look angle from {} to {}: {}", location.label, satellite.name, e);
                None
            }
        }
    }

    pub fn is_checked(&self, satellite: &Satellite) -> bool {
        match self.overrides.get(&satellite.name) {
            Some(&checked) => checked,
            None => default_checked(self.look_angle(satellite).as_ref(), &self.filter),
        }
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) -> Result<Vec<Announcement>> {
        let satellite = self.catalog.satellites.get(name)?;
        self.overrides.insert(satellite.name.clone(), checked);
        Ok(self.rebuild_indicators())
    }

    /// All checked unchecks everything; otherwise everything gets checked
    pub fn toggle_all(&mut self) -> Vec<Announcement> {
        let all_checked = self.catalog.satellites.iter().all(|sat| self.is_checked(sat));
        for name in self.catalog.satellites.names() {
            self.overrides.insert(name.to_string(), !all_checked);
        }
        self.rebuild_indicators()
    }

    pub fn antenna_rows(&self) -> Vec<AntennaRow> {
        self.catalog
            .satellites
            .iter()
            .map(|sat| {
                AntennaRow::new(
                    sat.name.clone(),
                    sat.sub_longitude,
                    self.look_angle(sat),
                    self.is_checked(sat),
                )
            })
            .collect()
    }

    pub fn location_rows(&self) -> Vec<LocationRow> {
        self.catalog.sites.iter().map(LocationRow::from).collect()
    }

    /// Popup for a configured site, listing the checked satellites as seen
    /// from that site
    pub fn site_popup(&self, label: &str) -> Result<String> {
        let site = self.catalog.sites.get(label)?;
        let point = site.point();
        let lines = self
            .catalog
            .satellites
            .iter()
            .filter(|sat| self.is_checked(sat))
            .map(|sat| (sat, point.look_angle_to(sat).ok()));
        Ok(text::site_popup(&site.label, lines))
    }

    /// Popup and announcement for a satellite element, when a location is set
    pub fn satellite_popup(&self, name: &str, target: PopupTarget) -> Result<Option<(String, Announcement)>> {
        let satellite = self.catalog.satellites.get(name)?;
        Ok(self.look_angle(satellite).map(|look| {
            let announcement = Announcement::PopupOpened {
                satellite: satellite.name.clone(),
                target,
                azimuth_deg: look.azimuth_deg,
                elevation_deg: look.elevation_deg,
            };
            (text::look_popup(&satellite.name, &look), announcement)
        }))
    }

    /// Recreate one indicator per checked satellite with a valid look angle
    pub fn rebuild_indicators(&mut self) -> Vec<Announcement> {
        let Some(location) = self.location.as_ref() else {
            self.indicators.clear();
            return Vec::new();
        };
        let origin = LatLng::new(location.latitude, location.longitude);

        let indicators: Vec<Indicator> = self
            .catalog
            .satellites
            .iter()
            .filter(|sat| self.is_checked(sat))
            .filter_map(|sat| self.look_angle(sat).map(|look| Indicator::new(sat, origin, look)))
            .collect();
        debug!("Rebuilt {} indicators for {}", indicators.len(), location.label);

        self.indicators = indicators;
        self.indicators
            .iter()
            .map(|ind| Announcement::PlotLineAdded {
                satellite: ind.satellite.clone(),
            })
            .collect()
    }

    /// Move every indicator label for a new viewport.
    ///
    /// Labels go where the projector anchors them. When the line never
    /// crosses the view, the label sits a fixed screen distance from the
    /// origin along `(cos az, -sin az)`.
    pub fn reposition_labels<P: ScreenProjection>(&mut self, viewport: &Viewport, projection: &P) -> Vec<LabelUpdate> {
        let offset = self.config.label_offset_px;

        self.indicators
            .iter_mut()
            .map(|ind| {
                let anchor = ind.endpoint.anchor_for(viewport);
                let placement = match anchor.point() {
                    Some(position) => LabelPlacement::Anchored { position },
                    None => {
                        let az = ind.endpoint.azimuth_deg().to_radians();
                        let origin = projection.to_screen(ind.endpoint.origin());
                        let screen = ScreenPoint {
                            x: origin.x + az.cos() * offset,
                            y: origin.y - az.sin() * offset,
                        };
                        LabelPlacement::ScreenFallback {
                            screen,
                            position: projection.to_geo(screen),
                        }
                    }
                };
                ind.endpoint.move_to(placement.position());
                LabelUpdate {
                    satellite: ind.satellite.clone(),
                    anchor,
                    placement,
                }
            })
            .collect()
    }
}
