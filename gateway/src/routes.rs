use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use ground_sites::{Catalog, GroundSite};
use look_angles::Satellite;
use serde::Serialize;

#[derive(Clone)]
pub struct GatewayState {
    pub catalog: Arc<Catalog>,
}

impl GatewayState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// Dropdown options for the filter controls
#[derive(Serialize)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub aors: Vec<String>,
    pub countries: Vec<String>,
}

pub async fn list_sites(State(state): State<GatewayState>) -> Json<Vec<GroundSite>> {
    Json(state.catalog.sites.iter().cloned().collect())
}

pub async fn list_satellites(State(state): State<GatewayState>) -> Json<Vec<Satellite>> {
    Json(state.catalog.satellites.iter().cloned().collect())
}

pub async fn filter_options(State(state): State<GatewayState>) -> Json<FilterOptions> {
    let sites = &state.catalog.sites;
    Json(FilterOptions {
        locations: sites.labels(),
        aors: sites.aors(),
        countries: sites.countries(),
    })
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "pointing-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// API router without the UI or CORS layers
pub fn router(state: GatewayState) -> Router {
    let catalog_routes = Router::new()
        .route("/sites", get(list_sites))
        .route("/satellites", get(list_satellites))
        .route("/filters", get(filter_options))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", catalog_routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_json(path: &str) -> (StatusCode, serde_json::Value) {
        let app = router(GatewayState::new(Catalog::builtin()));
        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "pointing-gateway");
    }

    #[tokio::test]
    async fn test_sites() {
        let (status, json) = get_json("/api/v1/sites").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["label"], "Busan");
        assert_eq!(json[0]["aor"], "AOR1");
    }

    #[tokio::test]
    async fn test_satellites() {
        let (status, json) = get_json("/api/v1/satellites").await;
        assert_eq!(status, StatusCode::OK);
        let sats = json.as_array().unwrap();
        assert_eq!(sats.len(), 8);
        assert_eq!(sats[0]["name"], "ALT-3");
        assert_eq!(sats[0]["sub_longitude"], 110.0);
    }

    #[tokio::test]
    async fn test_filters() {
        let (status, json) = get_json("/api/v1/filters").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["locations"], serde_json::json!(["Busan"]));
        assert_eq!(json["aors"], serde_json::json!(["AOR1"]));
        assert_eq!(json["countries"], serde_json::json!(["South Korea"]));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = get_json("/api/v1/look-angles").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
