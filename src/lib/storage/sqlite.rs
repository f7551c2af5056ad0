use async_trait::async_trait;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

#[cfg(feature = "tracing")]
use tracing::{info, instrument};

use crate::core::{ListQuery, Todo, TodoError, TodoFields};
use crate::storage::{schema, TodoStore};

const SELECT_TODOS: &str =
    "SELECT id, due_date, title, assignee, completed, favorite FROM todos";
const INSERT_TODO: &str =
    "INSERT INTO todos (due_date, title, assignee, completed, favorite) VALUES (?, ?, ?, ?, ?)";

#[derive(Clone)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
}

impl SqliteTodoStore {
    /// Opens (creating if needed) the database at `url`. Failing to reach the
    /// database is fatal to startup, so it is reported as `SchemaUnreachable`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, TodoError> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            #[cfg(feature = "tracing")]
            info!(url = %url, "Creating database");
            Sqlite::create_database(url)
                .await
                .map_err(TodoError::SchemaUnreachable)?;
        }
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(TodoError::SchemaUnreachable)?;
        Ok(Self { pool })
    }

    /// A private in-memory database. Pinned to one connection that is never
    /// recycled, since each SQLite memory connection is its own database.
    pub async fn new_memory() -> Result<Self, TodoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(TodoError::SchemaUnreachable)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn bootstrap_schema(&self) -> Result<Vec<&'static str>, TodoError> {
        schema::bootstrap_schema(&self.pool).await
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    #[cfg_attr(feature = "tracing", instrument(skip(self)))]
    async fn list(&self, query: &ListQuery) -> Result<Vec<Todo>, TodoError> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_TODOS);
        if let Some(needle) = &query.assignee {
            // instr is case-sensitive, LIKE is not.
            builder
                .push(" WHERE instr(assignee, ")
                .push_bind(needle.as_str())
                .push(") > 0");
        }
        builder.push(" ORDER BY ").push(query.order_by());
        let todos = builder
            .build_query_as::<Todo>()
            .fetch_all(&self.pool)
            .await?;
        Ok(todos)
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>, TodoError> {
        let todo = sqlx::query_as::<_, Todo>(&format!("{SELECT_TODOS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(todo)
    }

    async fn insert(&self, fields: &TodoFields) -> Result<Todo, TodoError> {
        let result = sqlx::query(INSERT_TODO)
            .bind(fields.due_date)
            .bind(&fields.title)
            .bind(&fields.assignee)
            .bind(fields.completed)
            .bind(fields.favorite)
            .execute(&self.pool)
            .await?;
        Ok(fields.clone().into_todo(result.last_insert_rowid()))
    }

    async fn insert_batch(&self, batch: &[TodoFields]) -> Result<Vec<i64>, TodoError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(batch.len());
        for fields in batch {
            let result = sqlx::query(INSERT_TODO)
                .bind(fields.due_date)
                .bind(&fields.title)
                .bind(&fields.assignee)
                .bind(fields.completed)
                .bind(fields.favorite)
                .execute(&mut *tx)
                .await?;
            ids.push(result.last_insert_rowid());
        }
        tx.commit().await?;
        Ok(ids)
    }

    async fn update(&self, id: i64, fields: &TodoFields) -> Result<Option<Todo>, TodoError> {
        let result = sqlx::query(
            "UPDATE todos SET due_date = ?, title = ?, assignee = ?, completed = ?, favorite = ?
             WHERE id = ?",
        )
        .bind(fields.due_date)
        .bind(&fields.title)
        .bind(&fields.assignee)
        .bind(fields.completed)
        .bind(fields.favorite)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(fields.clone().into_todo(id)))
    }

    async fn delete(&self, id: i64) -> Result<bool, TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn has_any(&self) -> Result<bool, TodoError> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM todos)")
            .fetch_one(&self.pool)
            .await?;
        Ok(exists != 0)
    }
}
