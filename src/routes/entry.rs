use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    middleware,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::GeneralConfig,
    middleware::{catch_panic_layer, json_error_middleware},
    state::AppState,
};

use super::rpc;

pub const API_PREFIX: &str = "/api/v1";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().nest(API_PREFIX, rpc::router(state))
}

/// The router with the full middleware stack, as served by the binary.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.config.general);
    router(state)
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn build_cors_layer(cfg: &GeneralConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
