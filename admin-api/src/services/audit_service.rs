use crate::models::CreateAuditLog;

/// Writes admin operations to the `audit` tracing target
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditService;

impl AuditService {
    pub fn new() -> Self {
        Self
    }

    pub fn log(&self, entry: CreateAuditLog) {
        let details = entry
            .details
            .map(|d| d.to_string())
            .unwrap_or_default();

        tracing::info!(
            target: "audit",
            admin_id = %entry.admin_id,
            action = entry.action.as_str(),
            resource_type = entry.resource_type.as_str(),
            details = %details,
            user_agent = entry.user_agent.as_deref().unwrap_or("-"),
            "Admin operation"
        );
    }
}
