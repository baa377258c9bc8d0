//! Admin service for the deployment-wide Redis server setting.
//!
//! Administrators read and update one `host:port` address, check its syntax and
//! run a live PING against it. Every `/api/v1` route requires a bearer token
//! whose role holds [`middleware::Permission::Administer`].

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::Authorizer;
use crate::services::RedisSettingsService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub settings: Arc<RedisSettingsService>,
    pub authorizer: Arc<dyn Authorizer>,
}

pub fn build_router(state: AppState) -> Router {
    let protected = api::routes().route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::require_auth,
    ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", protected)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
