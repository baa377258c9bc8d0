mod redis_settings;

use axum::Router;
use crate::AppState;

pub use redis_settings::{CheckServerUrlRequest, TestConnectionRequest, UpdateRedisSettingsRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/settings", redis_settings::routes())
}
