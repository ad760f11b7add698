//! Look-Angle Table CLI
//!
//! Prints the antenna table for a ground site or a custom location.
//!
//! Usage:
//!   look-table --site Busan
//!   look-table --lat -33.9 --lon 18.4 --sort elevation --desc
//!   look-table --catalog data/catalog.json --aor AOR1 --format geojson -o map.geojson

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ground_sites::{loader, Catalog, Filter};
use look_angles::GroundPoint;
use pointing_app::table::{sort_antenna_rows, AntennaColumn, AntennaRow, SortDirection, SortState};
use pointing_app::{export, AppConfig, AppState};
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortKey {
    Satellite,
    Elevation,
    Azimuth,
}

impl From<SortKey> for AntennaColumn {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Satellite => AntennaColumn::Satellite,
            SortKey::Elevation => AntennaColumn::Elevation,
            SortKey::Azimuth => AntennaColumn::Azimuth,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Geojson,
}

#[derive(Parser, Debug)]
#[command(
    name = "look-table",
    about = "Azimuth/elevation table from a ground location to geostationary satellites"
)]
struct Args {
    /// Catalog JSON file; the built-in catalog is used when omitted
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Configured site label
    #[arg(short, long, conflicts_with_all = ["lat", "lon"])]
    site: Option<String>,

    /// Custom location latitude in degrees
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Custom location longitude in degrees
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Restrict to an Area of Responsibility
    #[arg(long, conflicts_with = "country")]
    aor: Option<String>,

    /// Restrict to a country
    #[arg(long)]
    country: Option<String>,

    /// Sort column
    #[arg(long, value_enum, default_value_t = SortKey::Satellite)]
    sort: SortKey,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn render_text(state: &AppState, rows: &[AntennaRow]) -> String {
    let mut out = String::new();
    match state.location() {
        Some(p) => out.push_str(&format!(
            "Location: {} ({:.4}, {:.4})\n",
            p.label, p.latitude, p.longitude
        )),
        None => out.push_str("Location: none\n"),
    }
    out.push_str(&format!(
        "{:<12} {:>9} {:>8} {:>8}  {}\n",
        "Satellite", "Sub-lon", "EL", "AZ", "Shown"
    ));
    for row in rows {
        out.push_str(&format!(
            "{:<12} {:>9.1} {:>8} {:>8}  {}\n",
            row.name,
            row.sub_longitude,
            row.elevation,
            row.azimuth,
            if row.checked { "yes" } else { "no" }
        ));
    }
    out
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let catalog = match &args.catalog {
        Some(path) => loader::load_catalog(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::builtin(),
    };
    info!(
        "Catalog: {} sites, {} satellites",
        catalog.sites.len(),
        catalog.satellites.len()
    );

    let mut state = AppState::new(catalog, AppConfig::default());

    if let Some(aor) = &args.aor {
        state.apply_filter(Filter::Aor(aor.clone()))?;
    }
    if let Some(country) = &args.country {
        state.apply_filter(Filter::Country(country.clone()))?;
    }
    if let Some(site) = &args.site {
        state.apply_filter(Filter::Location(site.clone()))?;
    }
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        state.set_location(GroundPoint::new("Custom Location", lat, lon)?);
    }

    let mut rows = state.antenna_rows();
    let sort = SortState {
        column: args.sort.into(),
        direction: if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        },
    };
    sort_antenna_rows(&mut rows, sort);

    let rendered = match args.format {
        OutputFormat::Text => render_text(&state, &rows),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "location": state.location(),
            "filter": state.filter(),
            "satellites": rows,
        }))?,
        OutputFormat::Geojson => serde_json::to_string_pretty(&export::to_geojson(&state))?,
    };

    match &args.output {
        Some(path) => {
            info!("Writing output to {:?}", path);
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(rendered.as_bytes())?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                lock.write_all(b"\n")?;
            }
        }
    }

    Ok(())
}
