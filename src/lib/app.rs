use chrono::NaiveDate;

#[cfg(feature = "tracing")]
use tracing::info;

use crate::config::AppConfig;
use crate::core::TodoError;
use crate::service::TodoService;
use crate::storage::sqlite::SqliteTodoStore;

/// Runs the startup sequence: connect, bring the schema up to date, then seed
/// an empty store. Nothing should serve requests unless this returns `Ok`.
pub async fn prepare(
    config: &AppConfig,
    today: NaiveDate,
) -> Result<TodoService<SqliteTodoStore>, TodoError> {
    let store = SqliteTodoStore::connect(&config.database_url, config.max_connections).await?;
    prepare_store(store, config.seed, today).await
}

pub async fn prepare_store(
    store: SqliteTodoStore,
    seed: bool,
    today: NaiveDate,
) -> Result<TodoService<SqliteTodoStore>, TodoError> {
    let added = store.bootstrap_schema().await?;
    #[cfg(feature = "tracing")]
    info!(added = ?added, "Schema ready");
    #[cfg(not(feature = "tracing"))]
    let _ = added;

    let service = TodoService::new(store);
    if seed {
        service.seed_if_empty(today).await?;
    }
    Ok(service)
}
