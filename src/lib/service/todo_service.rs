use chrono::NaiveDate;

#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

use crate::core::seed;
use crate::core::{CreateTodo, ListQuery, Todo, TodoError, TodoFields, UpdateTodo};
use crate::storage::TodoStore;

#[derive(Clone)]
pub struct TodoService<S: TodoStore> {
    store: S,
}

impl<S: TodoStore> TodoService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg_attr(feature = "tracing", instrument(skip(self)))]
    pub async fn list_todos(
        &self,
        sort: &str,
        order: &str,
        assignee: Option<&str>,
    ) -> Result<Vec<Todo>, TodoError> {
        let query = ListQuery::parse(sort, order, assignee)?;
        let todos = self.store.list(&query).await?;
        #[cfg(feature = "tracing")]
        debug!(count = todos.len(), "Listed todos");
        Ok(todos)
    }

    pub async fn get_todo(&self, id: i64) -> Result<Todo, TodoError> {
        self.store.get(id).await?.ok_or(TodoError::NotFound(id))
    }

    #[cfg_attr(feature = "tracing", instrument(skip(self, body)))]
    pub async fn create_todo(&self, body: CreateTodo) -> Result<Todo, TodoError> {
        let fields = TodoFields::from(body);
        fields.validate()?;
        let todo = self.store.insert(&fields).await?;
        #[cfg(feature = "tracing")]
        debug!(id = todo.id, "Created todo");
        Ok(todo)
    }

    #[cfg_attr(feature = "tracing", instrument(skip(self, body)))]
    pub async fn update_todo(&self, id: i64, body: UpdateTodo) -> Result<Todo, TodoError> {
        let fields = TodoFields::from(body);
        fields.validate()?;
        self.store
            .update(id, &fields)
            .await?
            .ok_or(TodoError::NotFound(id))
    }

    #[cfg_attr(feature = "tracing", instrument(skip(self)))]
    pub async fn delete_todo(&self, id: i64) -> Result<(), TodoError> {
        if !self.store.delete(id).await? {
            return Err(TodoError::NotFound(id));
        }
        Ok(())
    }

    pub async fn seed_if_empty(&self, today: NaiveDate) -> Result<usize, TodoError> {
        seed::seed_if_empty(&self.store, today).await
    }
}
