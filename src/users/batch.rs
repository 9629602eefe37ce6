use std::collections::HashSet;
use std::sync::Arc;

use rocket::tokio;
use rocket_db_pools::sqlx::{self, PgPool};
use thiserror::Error;

use crate::auth::PasswordService;
use crate::models::{BatchImportSummary, GeneratedUser};
use crate::users::repository::{NewUser, UserRepository};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("password hashing error: {0}")]
    Hash(String),
    #[error("blocking task failed: {0}")]
    Task(String),
}

/// Imports candidate users with partial-success semantics: a uniqueness
/// conflict rejects that record and the import carries on.
pub struct BatchImporter<'a> {
    pool: &'a PgPool,
    passwords: Arc<PasswordService>,
}

impl<'a> BatchImporter<'a> {
    pub fn new(pool: &'a PgPool, passwords: Arc<PasswordService>) -> Self {
        Self { pool, passwords }
    }

    /// Deduplicates within the batch first, then defers to the store's
    /// UNIQUE constraints for records that collide with existing rows.
    pub async fn import(
        &self,
        candidates: Vec<GeneratedUser>,
    ) -> Result<BatchImportSummary, ImportError> {
        let total = candidates.len();
        let mut imported = 0;
        let mut rejected = 0;

        let repo = UserRepository::new(self.pool);
        let mut seen_usernames: HashSet<String> = HashSet::new();
        let mut seen_emails: HashSet<String> = HashSet::new();

        for candidate in candidates {
            let duplicate_in_batch = seen_usernames.contains(&candidate.username)
                || seen_emails.contains(&candidate.email.to_lowercase());
            if duplicate_in_batch {
                rejected += 1;
                continue;
            }

            let password_hash = self.hash_password(candidate.password.clone()).await?;

            let row = NewUser {
                first_name: candidate.first_name,
                last_name: candidate.last_name,
                birth_date: candidate.birth_date,
                city: Some(candidate.city),
                country: Some(candidate.country),
                avatar: Some(candidate.avatar),
                company: Some(candidate.company),
                job_position: Some(candidate.job_position),
                mobile: Some(candidate.mobile),
                username: candidate.username.clone(),
                email: candidate.email.clone(),
                password_hash,
                role: candidate.role.as_str().to_string(),
            };

            if repo.insert_if_absent(&row).await? {
                seen_usernames.insert(candidate.username);
                seen_emails.insert(candidate.email.to_lowercase());
                imported += 1;
            } else {
                // Lost to an existing row (or a concurrent import).
                rejected += 1;
            }
        }

        log::info!(
            "batch import finished: {} total, {} imported, {} rejected",
            total,
            imported,
            rejected
        );

        Ok(BatchImportSummary {
            total,
            imported,
            rejected,
        })
    }

    /// Argon2 is CPU-bound; hash on the blocking pool so a large batch does
    /// not starve the async executor.
    async fn hash_password(&self, password: String) -> Result<String, ImportError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.hash_password(&password))
            .await
            .map_err(|err| ImportError::Task(err.to_string()))?
            .map_err(|err| ImportError::Hash(err.to_string()))
    }
}
