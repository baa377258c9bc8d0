use serde::Serialize;

#[derive(Debug)]
pub struct CreateAuditLog {
    pub admin_id: String,
    pub action: AuditAction,
    pub resource_type: ResourceType,
    pub details: Option<serde_json::Value>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    UpdateSettings,
    TestConnection,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::UpdateSettings => "update_settings",
            AuditAction::TestConnection => "test_connection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    RedisSettings,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::RedisSettings => "redis_settings",
        }
    }
}
