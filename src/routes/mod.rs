//! HTTP route handlers grouped by resource domain.
//!
//! Authentication routes live in `crate::auth::routes`; everything here is
//! annotated with `#[openapi]` so `rocket_okapi` can derive the OpenAPI
//! document automatically.

pub mod health;
pub mod users;
