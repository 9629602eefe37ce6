use rocket_db_pools::{Database, sqlx};

#[derive(Database)]
#[database("userforge_db")]
pub struct UserForgeDb(sqlx::PgPool);

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Apply pending migrations before serving traffic. `run` creates the
/// migrations table if needed and verifies checksums of applied steps.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    log::info!("checking database migration state");
    MIGRATOR.run(pool).await?;
    log::info!("database migrations up to date");
    Ok(())
}
