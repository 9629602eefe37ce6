//! User endpoints: fake-user generation, batch import, and profile lookups.

use rocket::serde::json::Json;
use rocket::{State, get, post};
use rocket_db_pools::sqlx;
use rocket_okapi::openapi;

use crate::auth::guards::{AuthUser, RequireAdmin};
use crate::auth::AuthState;
use crate::error::ApiError;
use crate::models::{BatchImportSummary, GeneratedUser, User};
use crate::users::generator::MAX_GENERATE_COUNT;
use crate::users::{BatchImporter, UserGenerator, UserRepository};

/// Generate a batch of fake users as a JSON array, ready to feed back into
/// the batch-import endpoint. Public by design.
#[openapi(tag = "Users")]
#[get("/users/generate?<count>")]
pub async fn generate_users(count: Option<usize>) -> Result<Json<Vec<GeneratedUser>>, ApiError> {
    let count = count.unwrap_or(10);
    if count == 0 || count > MAX_GENERATE_COUNT {
        return Err(ApiError::BadRequest(format!(
            "count must be between 1 and {MAX_GENERATE_COUNT}, requested: {count}"
        )));
    }

    let users = UserGenerator::new().generate_many(count);
    Ok(Json(users))
}

/// Import a collection of candidate users. Duplicates, both within the
/// payload and against existing rows, are skipped and counted; the rest of
/// the batch still lands.
#[openapi(tag = "Users")]
#[post("/users/batch", data = "<payload>")]
pub async fn batch_import(
    state: &State<AuthState>,
    pool: &State<sqlx::PgPool>,
    payload: Json<Vec<GeneratedUser>>,
) -> Result<Json<BatchImportSummary>, ApiError> {
    let candidates = payload.into_inner();
    if candidates.is_empty() {
        return Err(ApiError::BadRequest(
            "at least one user record is required".to_string(),
        ));
    }

    let importer = BatchImporter::new(pool.inner(), state.password_service.clone());
    let summary = importer
        .import(candidates)
        .await
        .map_err(|err| ApiError::InternalError(err.to_string()))?;

    Ok(Json(summary))
}

/// The caller's own profile, resolved from the token's email subject.
#[openapi(tag = "Users")]
#[get("/users/me")]
pub async fn my_profile(
    user: AuthUser,
    pool: &State<sqlx::PgPool>,
) -> Result<Json<User>, ApiError> {
    let repo = UserRepository::new(pool.inner());
    let record = repo
        .find_by_email(&user.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(record))
}

/// Look up any user by username. Admin only.
#[openapi(tag = "Users")]
#[get("/users/<username>", rank = 2)]
pub async fn user_by_username(
    _admin: RequireAdmin,
    username: String,
    pool: &State<sqlx::PgPool>,
) -> Result<Json<User>, ApiError> {
    let repo = UserRepository::new(pool.inner());
    let record = repo
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {username}")))?;

    Ok(Json(record))
}
