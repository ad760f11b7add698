//! Pointing Map Application Layer
//!
//! Everything the map UI needs around the pure look-angle and projector
//! code: an explicit application state, antenna and location tables,
//! popup and screen-reader text, label repositioning, a debouncer for rapid
//! input, and GeoJSON export.
//!
//! # Flow
//!
//! ```text
//! filter / marker drag ──► AppState ──► look angles per checked satellite
//!                                   └─► indicators ──► labels per viewport
//! ```

use std::time::Duration;

use ground_sites::CatalogError;
use look_angles::PointingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod debounce;
pub mod export;
pub mod screen;
pub mod state;
pub mod table;
pub mod text;

pub use debounce::Debouncer;
pub use screen::{ScreenPoint, ScreenProjection, WebMercatorView};
pub use state::{default_checked, AppState, FilterOutcome, Indicator, LabelPlacement, LabelUpdate};
pub use table::{AntennaColumn, AntennaRow, LocationColumn, LocationRow, SortDirection, SortState};
pub use text::Announcement;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Pointing(#[from] PointingError),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Tunables for the map layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Quiet period before a burst of input is acted on
    pub debounce_ms: u64,
    /// Screen distance used when a label cannot be clamped to the view
    pub label_offset_px: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 250,
            label_offset_px: 50.0,
        }
    }
}

impl AppConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: AppConfig = serde_json::from_str(r#"{"debounce_ms": 100}"#).unwrap();
        assert_eq!(config.debounce(), Duration::from_millis(100));
        assert_eq!(config.label_offset_px, 50.0);
    }
}
