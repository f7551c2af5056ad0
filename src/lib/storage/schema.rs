use std::collections::HashSet;

use sqlx::SqlitePool;

#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::core::TodoError;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    due_date DATE NOT NULL,
    title VARCHAR(200) NOT NULL,
    assignee VARCHAR(100) NOT NULL
)";

/// A column added after the base table shipped.
pub struct ColumnMigration {
    pub column: &'static str,
    pub ddl: &'static str,
}

/// Applied in order. Append only.
pub const COLUMN_MIGRATIONS: &[ColumnMigration] = &[
    ColumnMigration {
        column: "completed",
        ddl: "ALTER TABLE todos ADD COLUMN completed BOOLEAN NOT NULL DEFAULT 0",
    },
    ColumnMigration {
        column: "favorite",
        ddl: "ALTER TABLE todos ADD COLUMN favorite BOOLEAN NOT NULL DEFAULT 0",
    },
];

/// Brings the live table up to the current schema. Existing rows pick up the
/// column defaults; nothing is dropped or rewritten. Returns the columns that
/// had to be added, empty when the schema was already current.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<Vec<&'static str>, TodoError> {
    sqlx::query(CREATE_TABLE)
        .execute(pool)
        .await
        .map_err(TodoError::SchemaUnreachable)?;

    let mut added = Vec::new();
    for migration in COLUMN_MIGRATIONS {
        // Re-read per migration so each check sees the previous one's effect.
        let columns = table_columns(pool).await?;
        if columns.contains(migration.column) {
            #[cfg(feature = "tracing")]
            debug!(column = migration.column, "Column already present");
            continue;
        }
        sqlx::query(migration.ddl)
            .execute(pool)
            .await
            .map_err(TodoError::SchemaUnreachable)?;
        #[cfg(feature = "tracing")]
        info!(column = migration.column, "Added column to todos");
        added.push(migration.column);
    }
    Ok(added)
}

pub async fn table_columns(pool: &SqlitePool) -> Result<HashSet<String>, TodoError> {
    let names: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('todos')")
        .fetch_all(pool)
        .await
        .map_err(TodoError::SchemaUnreachable)?;
    Ok(names.into_iter().collect())
}
