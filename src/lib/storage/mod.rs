pub mod memory;
pub mod schema;
pub mod sqlite;

use async_trait::async_trait;
use crate::core::{ListQuery, Todo, TodoError, TodoFields};

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Todo>, TodoError>;
    async fn get(&self, id: i64) -> Result<Option<Todo>, TodoError>;
    async fn insert(&self, fields: &TodoFields) -> Result<Todo, TodoError>;
    /// All rows are written or none are.
    async fn insert_batch(&self, batch: &[TodoFields]) -> Result<Vec<i64>, TodoError>;
    /// `None` when no row has this id.
    async fn update(&self, id: i64, fields: &TodoFields) -> Result<Option<Todo>, TodoError>;
    /// `false` when no row has this id.
    async fn delete(&self, id: i64) -> Result<bool, TodoError>;
    async fn has_any(&self) -> Result<bool, TodoError>;
}
