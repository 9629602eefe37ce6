use chrono::{DateTime, NaiveDate, Utc};
use rocket_db_pools::sqlx::FromRow;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::auth::responses::Role;

/// Stored user record. The password hash never leaves the server; it is
/// skipped during serialization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub city: Option<String>,
    pub country: Option<String>,
    pub avatar: Option<String>,
    pub company: Option<String>,
    pub job_position: Option<String>,
    pub mobile: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Candidate user as produced by the generator and consumed by the batch
/// importer. Carries a plaintext password; it is hashed before storage and
/// this type is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedUser {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub city: String,
    pub country: String,
    pub avatar: String,
    pub company: String,
    pub job_position: String,
    pub mobile: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Outcome of a batch import. `imported + rejected == total` always holds;
/// rejections cover both in-batch and store-level uniqueness conflicts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct BatchImportSummary {
    pub total: usize,
    pub imported: usize,
    pub rejected: usize,
}
