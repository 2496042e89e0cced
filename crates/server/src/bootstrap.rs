use std::sync::Arc;

use staybot_agent::{AgentRuntime, LlmClient, LlmError, OpenAiCompatibleClient};
use staybot_core::config::{AppConfig, ConfigError, LoadOptions};
use staybot_core::directive::DirectiveDispatcher;
use staybot_db::{connect_with_config, migrations, DbPool, FileCatalog, SqlBookingRepository};
use thiserror::Error;
use tracing::{info, warn};

use crate::api::AppState;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("language model client could not be created: {0}")]
    LlmClient(#[source] LlmError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

/// Wires the application from an already loaded config:
/// pool, migrations, catalog, booking repository, dispatcher, agent.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool =
        connect_with_config(&config.database).await.map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    if !config.catalog.path.exists() {
        warn!(
            event_name = "system.bootstrap.catalog_missing",
            correlation_id = "bootstrap",
            path = %config.catalog.path.display(),
            "catalog file not found; house lookups will fail until it exists"
        );
    }
    let catalog = Arc::new(FileCatalog::new(config.catalog.path.clone()));
    let bookings = Arc::new(SqlBookingRepository::new(db_pool.clone()));
    let dispatcher = DirectiveDispatcher::new(catalog.clone(), bookings.clone());

    let llm: Arc<dyn LlmClient> = Arc::new(
        OpenAiCompatibleClient::from_config(&config.llm).map_err(BootstrapError::LlmClient)?,
    );
    info!(
        event_name = "system.bootstrap.llm_configured",
        correlation_id = "bootstrap",
        provider = config.llm.provider.as_str(),
        model = %config.llm.model,
        "language model client configured"
    );

    let state = AppState { agent: Arc::new(AgentRuntime::new(llm, dispatcher)), catalog, bookings };
    Ok(Application { config, db_pool, state })
}
