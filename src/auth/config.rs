use crate::auth::{AuthError, AuthResult};

/// Minimum secret length for HS256; shorter keys are trivially brute-forceable.
const MIN_SECRET_BYTES: usize = 32;

/// Authentication configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    pub fn from_env() -> AuthResult<Self> {
        let jwt_secret = std::env::var("USERFORGE_JWT_SECRET")
            .map_err(|_| AuthError::Config("USERFORGE_JWT_SECRET is required".into()))?;

        if jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(AuthError::Config(format!(
                "USERFORGE_JWT_SECRET must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }

        let token_ttl_secs = std::env::var("USERFORGE_TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(24 * 60 * 60);

        Ok(Self {
            jwt_secret,
            token_ttl_secs,
        })
    }
}
