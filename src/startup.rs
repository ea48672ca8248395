use std::time::Duration;

use crate::{
    cache::{catalog::CatalogCache, user::UserCache},
    config::Config,
    error::AppError,
    scheduler::catalog_refresh::refresh_catalog,
    service::fortnite::CatalogSource,
};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client shared by every Fortnite API request.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(client)
}

/// Loads both caches before the bot connects.
///
/// A user cache that cannot be populated is fatal, since every command reads it. The
/// catalog is best effort: commands that need it report that it is still loading until
/// the next scheduled refresh succeeds.
pub async fn load_caches<S>(
    users: &UserCache,
    catalog: &CatalogCache,
    source: &S,
) -> Result<(), AppError>
where
    S: CatalogSource + ?Sized,
{
    users.populate().await?;

    refresh_catalog(catalog, source).await;

    Ok(())
}
