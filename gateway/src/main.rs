use anyhow::Result;
use ground_sites::{loader, Catalog};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod routes;

use config::GatewayConfig;
use routes::GatewayState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "pointing_gateway=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => loader::load_catalog(path)?,
        None => {
            tracing::info!("   No SATPOINT_CATALOG set, using built-in catalog");
            Catalog::builtin()
        }
    };
    tracing::info!(
        "   Catalog: {} sites, {} satellites",
        catalog.sites.len(),
        catalog.satellites.len()
    );

    let api_routes = routes::router(GatewayState::new(catalog)).layer(CorsLayer::permissive());

    // Static file serving for UI (if dist exists)
    let app = if config.ui_dir.exists() {
        tracing::info!("   Serving UI from {}", config.ui_dir.display());
        api_routes.fallback_service(ServeDir::new(&config.ui_dir))
    } else {
        tracing::warn!("   UI not found at {}", config.ui_dir.display());
        api_routes
    };

    let addr = config.bind_addr();
    tracing::info!("Pointing Gateway starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
