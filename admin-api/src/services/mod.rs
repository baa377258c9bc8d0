mod audit_service;
mod auth_service;
mod redis_settings_service;

pub use audit_service::*;
pub use auth_service::*;
pub use redis_settings_service::*;
