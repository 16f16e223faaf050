//! `db` subcommand handlers.

use std::path::Path;

use ecostay_core::{load_registry_file, AppConfig};
use ecostay_db::PoolConfig;

/// Apply all pending migrations to `DATABASE_URL`.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset, the database is unreachable,
/// or a migration fails.
pub(crate) async fn run_migrate(config: &AppConfig) -> anyhow::Result<()> {
    let database_url = config.require_database_url()?;
    let pool = ecostay_db::connect_pool(database_url, PoolConfig::from_app_config(config)).await?;
    ecostay_db::run_migrations(&pool).await?;
    tracing::info!("migrations applied");
    println!("migrations applied");
    Ok(())
}

/// Upsert every record of the registry file at `path` into `certified_hotels`.
///
/// The file is validated before any database work. Existing rows with the
/// same id are updated in place.
///
/// # Errors
///
/// Returns an error if the file is invalid, `DATABASE_URL` is unset, or the
/// upsert transaction fails.
pub(crate) async fn run_seed(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let file = load_registry_file(path)?;
    let database_url = config.require_database_url()?;
    let pool = ecostay_db::connect_pool(database_url, PoolConfig::from_app_config(config)).await?;
    ecostay_db::run_migrations(&pool).await?;

    let written = ecostay_db::upsert_certified_hotels(&pool, &file.hotels).await?;
    tracing::info!(path = %path.display(), written, "registry seeded");
    println!("seeded {written} certified hotels from {}", path.display());
    Ok(())
}
