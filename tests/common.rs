#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, Response};
use figment::{
    Figment,
    providers::{Format, Serialized, Yaml},
};
use greeter::config::AppConfig;
use greeter::routes::create_router;
use greeter::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

pub fn config_from_yaml(yaml: &str) -> AppConfig {
    Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(Yaml::string(yaml))
        .extract()
        .expect("Failed to parse test config YAML")
}

pub fn build_app(config: AppConfig) -> Router {
    create_router(AppState::new(Arc::new(config)))
}

pub fn request(path: &str, method: Method) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body is not JSON")
}

pub async fn get_json(app: &Router, path: &str) -> Value {
    let response = app
        .clone()
        .oneshot(request(path, Method::GET))
        .await
        .expect("request should succeed");
    body_json(response).await
}
