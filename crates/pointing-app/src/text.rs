//! Popup and live-region text

use std::fmt;

use look_angles::{LookAngle, Satellite};
use serde::{Deserialize, Serialize};

/// `"{name}: EL {el}° | AZ {az}°"`, with placeholders when the angle is unknown
pub fn satellite_line(name: &str, look: Option<&LookAngle>) -> String {
    match look {
        Some(look) => format!(
            "{}: EL {:.1}° | AZ {:.1}°",
            name, look.elevation_deg, look.azimuth_deg
        ),
        None => format!("{}: EL - | AZ -", name),
    }
}

/// Site popup: the label followed by one line per shown satellite
pub fn site_popup<'a, I>(label: &str, lines: I) -> String
where
    I: IntoIterator<Item = (&'a Satellite, Option<LookAngle>)>,
{
    std::iter::once(label.to_string())
        .chain(
            lines
                .into_iter()
                .map(|(sat, look)| satellite_line(&sat.name, look.as_ref())),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// Popup shown on a satellite marker, label or indicator line
pub fn look_popup(name: &str, look: &LookAngle) -> String {
    format!(
        "{}\nAzimuth: {:.1}°\nElevation: {:.1}°",
        name, look.azimuth_deg, look.elevation_deg
    )
}

/// Map element whose popup was opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopupTarget {
    Marker,
    Label,
    PlotLine,
    PlotLineLabel,
}

impl PopupTarget {
    fn noun(self) -> &'static str {
        match self {
            PopupTarget::Marker => "",
            PopupTarget::Label => " label",
            PopupTarget::PlotLine => " plot line",
            PopupTarget::PlotLineLabel => " plot line label",
        }
    }
}

/// Messages for the map's screen-reader live region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Announcement {
    PopupOpened {
        satellite: String,
        target: PopupTarget,
        azimuth_deg: f64,
        elevation_deg: f64,
    },
    PlotLineAdded { satellite: String },
    SiteMarkerOpened { label: String },
    CustomMarkerOpened { latitude: f64, longitude: f64 },
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Announcement::PopupOpened {
                satellite,
                target,
                azimuth_deg,
                elevation_deg,
            } => write!(
                f,
                "{}{} popup opened. Azimuth: {:.1} degrees, Elevation: {:.1} degrees.",
                satellite,
                target.noun(),
                azimuth_deg,
                elevation_deg
            ),
            Announcement::PlotLineAdded { satellite } => write!(f, "{} plot line added.", satellite),
            Announcement::SiteMarkerOpened { label } => write!(f, "{} marker popup opened.", label),
            Announcement::CustomMarkerOpened {
                latitude,
                longitude,
            } => write!(
                f,
                "Custom marker popup opened at latitude {}, longitude {}.",
                latitude, longitude
            ),
        }
    }
}
