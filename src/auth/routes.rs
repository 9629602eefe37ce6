use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{State, post, tokio};
use rocket_db_pools::sqlx;
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;

use crate::auth::responses::{AuthResponse, LoginRequest};
use crate::auth::{AuthError, AuthState};
use crate::users::repository::UserRepository;

type AuthRouteResult<T> = Result<Json<T>, status::Custom<Json<AuthErrorResponse>>>;

#[derive(Debug, serde::Serialize, JsonSchema)]
pub struct AuthErrorResponse {
    pub error: String,
    pub message: String,
}

/// Login with username or email plus password, returning a signed access
/// token keyed on the record's email.
///
/// Lookup order is username first, then email only on a miss, and every
/// rejection (unknown login, wrong password) produces the identical body so
/// the endpoint cannot be used to enumerate accounts.
#[openapi(tag = "Auth")]
#[post("/auth", data = "<payload>")]
pub async fn login(
    state: &State<AuthState>,
    pool: &State<sqlx::PgPool>,
    payload: Json<LoginRequest>,
) -> AuthRouteResult<AuthResponse> {
    let login_id = payload.login_id.trim();
    let password = payload.password.trim().to_string();

    if login_id.is_empty() || password.is_empty() {
        return Err(respond_message(
            Status::BadRequest,
            "Invalid request",
            "loginId and password are required",
        ));
    }

    let repo = UserRepository::new(pool.inner());

    let user = match repo.find_by_username(login_id).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => repo
            .find_by_email(login_id)
            .await
            .map_err(|err| respond_error(AuthError::from(err)))?,
        Err(err) => return Err(respond_error(AuthError::from(err))),
    };

    let user = match user {
        Some(user) => user,
        None => return Err(invalid_credentials()),
    };

    // Argon2 verification is deliberately CPU-heavy; keep it off the
    // async executor threads.
    let password_service = state.password_service.clone();
    let stored_hash = user.password_hash.clone();
    let verified =
        tokio::task::spawn_blocking(move || password_service.verify_password(&password, &stored_hash))
            .await
            .map_err(|err| respond_error(AuthError::Other(err.to_string())))?;

    if !verified {
        return Err(invalid_credentials());
    }

    let signed = state
        .jwt_service
        .issue(&user.email, &user.role)
        .map_err(respond_error)?;

    log::info!("issued access token for {}", user.username);

    Ok(Json(AuthResponse {
        access_token: signed.token,
    }))
}

fn respond_error(err: AuthError) -> status::Custom<Json<AuthErrorResponse>> {
    match err {
        AuthError::InvalidCredentials => invalid_credentials(),
        err => {
            // Internal failures must not leak detail to the caller.
            log::error!("authentication failed internally: {}", err);
            respond_message(
                Status::InternalServerError,
                "Authentication error",
                "Unexpected error",
            )
        }
    }
}

fn respond_message(
    status: Status,
    error: impl Into<String>,
    message: impl Into<String>,
) -> status::Custom<Json<AuthErrorResponse>> {
    status::Custom(
        status,
        Json(AuthErrorResponse {
            error: error.into(),
            message: message.into(),
        }),
    )
}

fn invalid_credentials() -> status::Custom<Json<AuthErrorResponse>> {
    respond_message(
        Status::Unauthorized,
        "Authentication failed",
        "Invalid credentials",
    )
}
