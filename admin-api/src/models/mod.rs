mod audit_log;
mod form_validation;
mod redis_settings;

pub use audit_log::*;
pub use form_validation::*;
pub use redis_settings::*;
