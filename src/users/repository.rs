use rocket_db_pools::sqlx::{self, PgPool};

use crate::models::User;

const USER_COLUMNS: &str = "id, first_name, last_name, birth_date, city, country, avatar, \
     company, job_position, mobile, username, email, password_hash, role, created_at";

/// Row to insert; same shape as [`User`] minus the generated columns, with
/// the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: chrono::NaiveDate,
    pub city: Option<String>,
    pub country: Option<String>,
    pub avatar: Option<String>,
    pub company: Option<String>,
    pub job_position: Option<String>,
    pub mobile: Option<String>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Thin repository over the `users` table. All access to user rows goes
/// through here so the uniqueness invariant has a single write path.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await
    }

    /// Insert a user unless the username or email is already taken.
    ///
    /// Returns `true` when the row was written. The UNIQUE constraints are
    /// the arbiter here, so two imports racing on the same key cannot both
    /// win; `ON CONFLICT DO NOTHING` turns the loser into a skipped row.
    pub async fn insert_if_absent(&self, user: &NewUser) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO users
                (first_name, last_name, birth_date, city, country, avatar,
                 company, job_position, mobile, username, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.birth_date)
        .bind(&user.city)
        .bind(&user.country)
        .bind(&user.avatar)
        .bind(&user.company)
        .bind(&user.job_position)
        .bind(&user.mobile)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
    }
}
