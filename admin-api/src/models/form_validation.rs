use redis_utils::ProbeErrorKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    Ok,
    Warning,
    Error,
}

/// Result shown next to a settings field.
///
/// Always returned with HTTP 200; the `kind` carries the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValidation {
    pub kind: ValidationKind,
    pub message: Option<String>,
    pub error_kind: Option<String>,
}

impl FormValidation {
    pub fn ok() -> Self {
        Self {
            kind: ValidationKind::Ok,
            message: None,
            error_kind: None,
        }
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: ValidationKind::Warning,
            message: Some(message.into()),
            error_kind: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ValidationKind::Error,
            message: Some(message.into()),
            error_kind: None,
        }
    }

    pub fn with_error_kind(mut self, kind: ProbeErrorKind) -> Self {
        self.error_kind = Some(kind.as_str().to_string());
        self
    }

    pub fn is_ok(&self) -> bool {
        self.kind == ValidationKind::Ok
    }
}
