//! Antenna and location tables
//!
//! Rows carry display-ready text next to the raw values so sorting never has
//! to re-parse what was rendered.

use std::cmp::Ordering;

use ground_sites::GroundSite;
use look_angles::LookAngle;
use serde::{Deserialize, Serialize};

/// Shown in place of an angle that could not be computed
pub const PLACEHOLDER: &str = "-";

/// One decimal place, or the placeholder
pub fn format_angle(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}", v),
        _ => PLACEHOLDER.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntennaRow {
    pub name: String,
    pub sub_longitude: f64,
    pub look: Option<LookAngle>,
    pub elevation: String,
    pub azimuth: String,
    pub checked: bool,
}

impl AntennaRow {
    pub fn new(name: impl Into<String>, sub_longitude: f64, look: Option<LookAngle>, checked: bool) -> Self {
        Self {
            name: name.into(),
            sub_longitude,
            elevation: format_angle(look.map(|l| l.elevation_deg)),
            azimuth: format_angle(look.map(|l| l.azimuth_deg)),
            look,
            checked,
        }
    }

    /// DOM id of the row's checkbox
    pub fn checkbox_id(&self) -> String {
        format!("sat-{}", self.name)
    }

    /// Label class for the row and its map label
    pub fn label_class(&self) -> &'static str {
        match self.look {
            Some(look) if !look.is_above_horizon() => "negative-elevation",
            _ => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRow {
    pub label: String,
    pub country: String,
    pub aor: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&GroundSite> for LocationRow {
    fn from(site: &GroundSite) -> Self {
        Self {
            label: site.label.clone(),
            country: site.country.clone(),
            aor: site.aor.clone(),
            latitude: site.latitude,
            longitude: site.longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Value for the header's `aria-sort` attribute
    pub fn aria_sort(self) -> &'static str {
        match self {
            SortDirection::Asc => "ascending",
            SortDirection::Desc => "descending",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AntennaColumn {
    Satellite,
    Elevation,
    Azimuth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationColumn {
    Location,
    Country,
    Aor,
}

/// Active sort column of a table header row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState<C> {
    pub column: C,
    pub direction: SortDirection,
}

impl<C: Copy + PartialEq> SortState<C> {
    pub fn new(column: C) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    /// Header click: the same column flips, another column starts ascending
    pub fn click(&mut self, column: C) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column;
            self.direction = SortDirection::Asc;
        }
    }

    /// `aria-sort` for a header, `None` on inactive columns
    pub fn aria_sort_for(&self, column: C) -> Option<&'static str> {
        (self.column == column).then(|| self.direction.aria_sort())
    }
}

fn numeric(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(f64::INFINITY)
}

fn text_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Stable sort; a missing angle sorts as +infinity in either direction
pub fn sort_antenna_rows(rows: &mut [AntennaRow], sort: SortState<AntennaColumn>) {
    rows.sort_by(|a, b| {
        let ordering = match sort.column {
            AntennaColumn::Satellite => text_order(&a.name, &b.name),
            AntennaColumn::Elevation => numeric(a.look.map(|l| l.elevation_deg))
                .total_cmp(&numeric(b.look.map(|l| l.elevation_deg))),
            AntennaColumn::Azimuth => numeric(a.look.map(|l| l.azimuth_deg))
                .total_cmp(&numeric(b.look.map(|l| l.azimuth_deg))),
        };
        sort.direction.apply(ordering)
    });
}

pub fn sort_location_rows(rows: &mut [LocationRow], sort: SortState<LocationColumn>) {
    rows.sort_by(|a, b| {
        let ordering = match sort.column {
            LocationColumn::Location => text_order(&a.label, &b.label),
            LocationColumn::Country => text_order(&a.country, &b.country),
            LocationColumn::Aor => text_order(&a.aor, &b.aor),
        };
        sort.direction.apply(ordering)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, el: Option<f64>) -> AntennaRow {
        let look = el.map(|elevation_deg| LookAngle {
            elevation_deg,
            azimuth_deg: 180.0,
            range_km: 38_000.0,
        });
        AntennaRow::new(name, 0.0, look, false)
    }

    fn names(rows: &[AntennaRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_format_angle() {
        assert_eq!(format_angle(Some(44.534)), "44.5");
        assert_eq!(format_angle(Some(-47.76)), "-47.8");
        assert_eq!(format_angle(None), "-");
        assert_eq!(format_angle(Some(f64::NAN)), "-");
    }

    #[test]
    fn test_row_text_and_class() {
        let visible = row("ALT-3", Some(44.534));
        assert_eq!(visible.elevation, "44.5");
        assert_eq!(visible.checkbox_id(), "sat-ALT-3");
        assert_eq!(visible.label_class(), "");

        let hidden = row("MUOS-3", Some(-47.7));
        assert_eq!(hidden.label_class(), "negative-elevation");

        let unknown = row("MUOS-1", None);
        assert_eq!(unknown.elevation, PLACEHOLDER);
        assert_eq!(unknown.azimuth, PLACEHOLDER);
        assert_eq!(unknown.label_class(), "");
    }

    #[test]
    fn test_sort_state_clicks() {
        let mut sort = SortState::new(AntennaColumn::Satellite);
        sort.click(AntennaColumn::Satellite);
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(sort.aria_sort_for(AntennaColumn::Satellite), Some("descending"));

        sort.click(AntennaColumn::Elevation);
        assert_eq!(sort.column, AntennaColumn::Elevation);
        assert_eq!(sort.direction, SortDirection::Asc);
        assert_eq!(sort.aria_sort_for(AntennaColumn::Elevation), Some("ascending"));
        assert_eq!(sort.aria_sort_for(AntennaColumn::Satellite), None);
    }

    #[test]
    fn test_placeholder_sorts_as_infinity() {
        let mut rows = vec![
            row("B", None),
            row("A", Some(20.0)),
            row("C", Some(-5.0)),
        ];

        sort_antenna_rows(&mut rows, SortState::new(AntennaColumn::Elevation));
        assert_eq!(names(&rows), vec!["C", "A", "B"]);

        let mut desc = SortState::new(AntennaColumn::Elevation);
        desc.click(AntennaColumn::Elevation);
        sort_antenna_rows(&mut rows, desc);
        assert_eq!(names(&rows), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_equal_keys_keep_order() {
        let mut rows = vec![row("X", None), row("Y", None), row("Z", Some(1.0))];
        sort_antenna_rows(&mut rows, SortState::new(AntennaColumn::Elevation));
        assert_eq!(names(&rows), vec!["Z", "X", "Y"]);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let mut rows = vec![row("muos-2", None), row("ALT-1", None), row("Muos-1", None)];
        sort_antenna_rows(&mut rows, SortState::new(AntennaColumn::Satellite));
        assert_eq!(names(&rows), vec!["ALT-1", "Muos-1", "muos-2"]);
    }

    #[test]
    fn test_location_sort_by_country() {
        let site = |label: &str, country: &str| LocationRow {
            label: label.into(),
            country: country.into(),
            aor: "AOR1".into(),
            latitude: 0.0,
            longitude: 0.0,
        };
        let mut rows = vec![site("Rota", "Spain"), site("Busan", "South Korea"), site("Sasebo", "Japan")];
        sort_location_rows(&mut rows, SortState::new(LocationColumn::Country));
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Sasebo", "Busan", "Rota"]);
    }
}
