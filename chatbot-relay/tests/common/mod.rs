//! Shared harness: a relay router wired to a wiremock stand-in for the
//! Supervity API.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chatbot_relay::config::SupervitySettings;
use chatbot_relay::services::SupervityClient;
use chatbot_relay::startup::build_router;
use chatbot_relay::AppState;
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::MockServer;

pub const QUERY_PATH: &str = "/app/QueryDocument";

pub fn test_settings(api_url: String) -> SupervitySettings {
    SupervitySettings {
        org_id: "org-42".to_string(),
        api_token: Secret::new("token-abc".to_string()),
        api_org: "acme".to_string(),
        collection_name: "handbook".to_string(),
        usertype: "team".to_string(),
        api_url,
        timeout_secs: Some(5),
    }
}

pub fn router_for(settings: SupervitySettings) -> Router {
    let client = SupervityClient::new(settings).expect("Failed to build client");
    build_router(AppState::new(Arc::new(client)), "public")
}

pub struct TestApp {
    pub router: Router,
    pub upstream: MockServer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let upstream = MockServer::start().await;
        let router = router_for(test_settings(format!("{}{}", upstream.uri(), QUERY_PATH)));

        Self { router, upstream }
    }

    pub async fn ask(&self, body: Value) -> (StatusCode, Value) {
        send_json(&self.router, body.to_string()).await
    }
}

/// POST a raw body to `/api/chatbot` with a JSON content type.
pub async fn send_json(router: &Router, body: String) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chatbot")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).expect("Response body is not JSON");

    (status, json)
}
