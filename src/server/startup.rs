use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    progression::catalog::GameCatalog,
};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "questboard=info,serenity=warn";

/// Installs the global tracing subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Loads the game catalog from `CATALOG_PATH`, or the built-in one when unset.
///
/// # Returns
/// - `Ok(GameCatalog)` - Catalog ready for use
/// - `Err(AppError::ConfigErr)` - The file is unreadable or malformed
pub async fn load_catalog(config: &Config) -> Result<GameCatalog, AppError> {
    let Some(path) = &config.catalog_path else {
        tracing::info!("Using built-in game catalog");
        return Ok(GameCatalog::default());
    };

    let catalog_error = |reason: String| ConfigError::Catalog {
        path: path.clone(),
        reason,
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| catalog_error(e.to_string()))?;
    let catalog = GameCatalog::from_json(&json).map_err(|e| catalog_error(e.to_string()))?;

    tracing::info!(
        "Loaded game catalog from {} ({} games with quests, {} bonus games, {} trivia questions)",
        path,
        catalog.quests.len(),
        catalog.bonus_games.len(),
        catalog.trivia_questions.len()
    );

    Ok(catalog)
}
