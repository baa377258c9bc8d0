use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::config::JwtConfig;
use crate::error::{AppError, Result};
use crate::middleware::{AdminRole, Claims};

/// Issues the bearer tokens accepted by `require_auth`
pub struct AuthService {
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(jwt: JwtConfig) -> Self {
        Self { jwt }
    }

    pub fn generate_access_token(&self, admin_id: &str, email: &str, role: AdminRole) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.jwt.expiry_hours as i64);

        let claims = Claims {
            sub: admin_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }
}
