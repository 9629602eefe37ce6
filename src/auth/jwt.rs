use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::auth::{AuthConfig, AuthResult};

/// Claim set carried by every access token. Claims are frozen at issuance;
/// a role change on the underlying user only shows up after the next login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AccessTokenClaims {
    /// The record's email address, even when login used the username.
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct SignedAccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl JwtService {
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret_bytes = config.jwt_secret.as_bytes();
        let encoding_key = EncodingKey::from_secret(secret_bytes);
        let decoding_key = DecodingKey::from_secret(secret_bytes);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            token_ttl: Duration::seconds(config.token_ttl_secs),
        }
    }

    pub fn issue(&self, subject: &str, role: &str) -> AuthResult<SignedAccessToken> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = AccessTokenClaims {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(SignedAccessToken { token, expires_at })
    }

    /// Verifies the signature before returning any claim. Expiry is checked
    /// with zero leeway as part of decoding.
    pub fn decode(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        let token_data =
            decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Uniform verdict over signature, expiry, and subject. Callers cannot
    /// tell which check failed; the reason stays in the logs.
    pub fn validate(&self, token: &str, expected_subject: &str) -> bool {
        match self.decode(token) {
            Ok(claims) => claims.sub == expected_subject,
            Err(err) => {
                log::debug!("token rejected: {}", err);
                false
            }
        }
    }

    pub fn extract_subject(&self, token: &str) -> AuthResult<String> {
        Ok(self.decode(token)?.sub)
    }

    pub fn extract_role(&self, token: &str) -> AuthResult<String> {
        Ok(self.decode(token)?.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-that-is-long-enough!";

    fn make_service(ttl_secs: i64) -> JwtService {
        JwtService::from_config(&AuthConfig {
            jwt_secret: TEST_SECRET.into(),
            token_ttl_secs: ttl_secs,
        })
    }

    #[test]
    fn round_trips_subject_and_role() {
        let service = make_service(3600);
        let signed = service.issue("a@x.com", "admin").expect("issue");

        assert_eq!(service.extract_subject(&signed.token).unwrap(), "a@x.com");
        assert_eq!(service.extract_role(&signed.token).unwrap(), "admin");
        assert!(service.validate(&signed.token, "a@x.com"));
    }

    #[test]
    fn rejects_expired_tokens() {
        let service = make_service(-60);
        let signed = service.issue("a@x.com", "user").expect("issue");
        assert!(!service.validate(&signed.token, "a@x.com"));
    }

    #[test]
    fn rejects_wrong_subject() {
        let service = make_service(3600);
        let signed = service.issue("a@x.com", "user").expect("issue");
        assert!(!service.validate(&signed.token, "b@x.com"));
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() {
        let issuer = JwtService::from_config(&AuthConfig {
            jwt_secret: "a-completely-different-signing-secret".into(),
            token_ttl_secs: 3600,
        });
        let verifier = make_service(3600);
        let signed = issuer.issue("a@x.com", "user").expect("issue");
        assert!(!verifier.validate(&signed.token, "a@x.com"));
    }

    #[test]
    fn rejects_tampered_and_malformed_tokens() {
        let service = make_service(3600);
        let signed = service.issue("a@x.com", "user").expect("issue");

        let mut tampered = signed.token.clone();
        let replacement = if tampered.ends_with('A') { 'B' } else { 'A' };
        tampered.pop();
        tampered.push(replacement);
        assert!(!service.validate(&tampered, "a@x.com"));
        assert!(!service.validate("definitely.not.a.jwt", "a@x.com"));
        assert!(!service.validate("", "a@x.com"));
    }
}
