//! Shared fixtures for the engine test modules.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};

use crate::engine::domain::{Policy, RawProfile};
use crate::engine::{impact_router, ImpactEngine};

/// Tenant of a rented flat who drives to work, squarely inside several
/// of the bundled eligibility rules.
pub fn renting_driver_profile() -> RawProfile {
    RawProfile {
        age: Some("34".to_string()),
        income: Some("3000".to_string()),
        employment: Some("Employed".to_string()),
        home: Some("Rent".to_string()),
        commute: Some("Car".to_string()),
        city_rural: Some("City".to_string()),
        ..RawProfile::default()
    }
}

pub fn builtin_engine() -> ImpactEngine {
    ImpactEngine::with_builtin_data().expect("bundled knowledge base loads")
}

pub fn test_app() -> Router {
    impact_router(Arc::new(builtin_engine()))
}

pub fn policy_with_compute(kind: &str, params: Value) -> Policy {
    Policy {
        id: "test-policy".to_string(),
        title: "Test policy".to_string(),
        description: "Synthetic policy for formula tests.".to_string(),
        source_url: "https://example.org/test".to_string(),
        compute: serde_json::from_value(json!({ "type": kind, "params": params }))
            .expect("compute spec deserializes"),
        ..Policy::default()
    }
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body reads");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}
