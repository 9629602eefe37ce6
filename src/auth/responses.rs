use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed role set. Parsing is case-insensitive; anything unrecognized
/// falls back to the least-privileged role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn from_str(role: &str) -> Self {
        match role.to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// Login payload. `loginId` may be either a username or an email address;
/// `username` is accepted as a legacy alias for the same field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoginRequest {
    #[serde(rename = "loginId", alias = "username")]
    pub login_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuthResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!(Role::from_str("admin"), Role::Admin);
        assert_eq!(Role::from_str("ADMIN"), Role::Admin);
        assert_eq!(Role::from_str("Admin"), Role::Admin);
        assert_eq!(Role::from_str("user"), Role::User);
        assert_eq!(Role::from_str("something-else"), Role::User);
    }

    #[test]
    fn login_request_accepts_username_alias() {
        let payload: LoginRequest =
            serde_json::from_str(r#"{"username":"alice","password":"p1"}"#).expect("parse");
        assert_eq!(payload.login_id, "alice");

        let payload: LoginRequest =
            serde_json::from_str(r#"{"loginId":"a@x.com","password":"p1"}"#).expect("parse");
        assert_eq!(payload.login_id, "a@x.com");
    }
}
