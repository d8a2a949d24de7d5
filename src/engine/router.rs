use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::RawProfile;
use super::ImpactEngine;

/// Analysis request from the presentation layer.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub country: String,
    #[serde(alias = "candidate")]
    pub party: String,
    #[serde(default)]
    pub profile: RawProfile,
}

/// Router builder exposing the analysis and lookup endpoints.
pub fn impact_router(engine: Arc<ImpactEngine>) -> Router {
    Router::new()
        .route("/api/v1/impact/analyze", post(analyze_handler))
        .route("/api/v1/impact/countries", get(countries_handler))
        .route(
            "/api/v1/impact/countries/:country/candidates",
            get(candidates_handler),
        )
        .with_state(engine)
}

pub(crate) async fn analyze_handler(
    State(engine): State<Arc<ImpactEngine>>,
    axum::Json(request): axum::Json<AnalyzeRequest>,
) -> Response {
    let result = engine.analyze(&request.country, &request.party, &request.profile);

    // Unknown selections still answer 200 with the sentinel body.
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn countries_handler(State(engine): State<Arc<ImpactEngine>>) -> Response {
    let payload = json!({ "countries": engine.countries() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn candidates_handler(
    State(engine): State<Arc<ImpactEngine>>,
    Path(country): Path<String>,
) -> Response {
    let payload = json!({
        "country": country,
        "candidates": engine.candidates(&country),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
