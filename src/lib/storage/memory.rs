use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::{ListQuery, Todo, TodoError, TodoFields};

use super::TodoStore;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Todo>,
    last_id: i64,
}

impl Table {
    // Ids only grow, so a deleted id is never handed out again.
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Process-local store with the same ordering and filtering as the SQLite
/// store. Rows come back in id order before the list query is applied.
#[derive(Clone, Default)]
pub struct MemoryTodoStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Todo>, TodoError> {
        let table = self.table.read().await;
        Ok(query.apply(table.rows.values().cloned()))
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>, TodoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, fields: &TodoFields) -> Result<Todo, TodoError> {
        let mut table = self.table.write().await;
        let todo = fields.clone().into_todo(table.next_id());
        table.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn insert_batch(&self, batch: &[TodoFields]) -> Result<Vec<i64>, TodoError> {
        let mut table = self.table.write().await;
        let mut ids = Vec::with_capacity(batch.len());
        for fields in batch {
            let todo = fields.clone().into_todo(table.next_id());
            ids.push(todo.id);
            table.rows.insert(todo.id, todo);
        }
        Ok(ids)
    }

    async fn update(&self, id: i64, fields: &TodoFields) -> Result<Option<Todo>, TodoError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = fields.clone().into_todo(id);
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, TodoError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn has_any(&self) -> Result<bool, TodoError> {
        Ok(!self.table.read().await.rows.is_empty())
    }
}
