use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::{CurrentAdmin, Permission};
use crate::models::{AuditAction, CreateAuditLog, FormValidation, RedisServerSettings, ResourceType};
use crate::services::AuditService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/redis", get(get_settings).put(update_settings))
        .route("/redis/check", post(check_server_url))
        .route("/redis/test-connection", post(test_connection))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRedisSettingsRequest {
    pub server_url: String,
}

/// A missing `value` is treated like an empty one
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CheckServerUrlRequest {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TestConnectionRequest {
    #[serde(default)]
    pub server_url: String,
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

async fn get_settings(
    State(state): State<AppState>,
    Extension(current_admin): Extension<CurrentAdmin>,
) -> Result<Json<RedisServerSettings>> {
    state.authorizer.check(&current_admin, Permission::Administer)?;

    Ok(Json(state.settings.current().await?))
}

async fn update_settings(
    State(state): State<AppState>,
    Extension(current_admin): Extension<CurrentAdmin>,
    headers: HeaderMap,
    payload: std::result::Result<Json<UpdateRedisSettingsRequest>, JsonRejection>,
) -> Result<Json<RedisServerSettings>> {
    state.authorizer.check(&current_admin, Permission::Administer)?;
    let Json(payload) = payload?;

    let previous = state.settings.current().await?;
    let settings = state.settings.update(payload.server_url).await?;

    AuditService::new().log(CreateAuditLog {
        admin_id: current_admin.id.clone(),
        action: AuditAction::UpdateSettings,
        resource_type: ResourceType::RedisSettings,
        details: Some(serde_json::json!({
            "previous": previous.server_url,
            "server_url": settings.server_url,
        })),
        user_agent: user_agent(&headers),
    });

    Ok(Json(settings))
}

async fn check_server_url(
    State(state): State<AppState>,
    Extension(current_admin): Extension<CurrentAdmin>,
    payload: std::result::Result<Json<CheckServerUrlRequest>, JsonRejection>,
) -> Result<Json<FormValidation>> {
    state.authorizer.check(&current_admin, Permission::Administer)?;
    let Json(payload) = payload?;

    Ok(Json(state.settings.check_server_url(&payload.value)))
}

async fn test_connection(
    State(state): State<AppState>,
    Extension(current_admin): Extension<CurrentAdmin>,
    headers: HeaderMap,
    payload: std::result::Result<Json<TestConnectionRequest>, JsonRejection>,
) -> Result<Json<FormValidation>> {
    state.authorizer.check(&current_admin, Permission::Administer)?;
    let Json(payload) = payload?;

    let result = state.settings.test_connection(&payload.server_url).await;

    AuditService::new().log(CreateAuditLog {
        admin_id: current_admin.id.clone(),
        action: AuditAction::TestConnection,
        resource_type: ResourceType::RedisSettings,
        details: Some(serde_json::json!({
            "server_url": payload.server_url,
            "result": result.kind,
        })),
        user_agent: user_agent(&headers),
    });

    Ok(Json(result))
}
