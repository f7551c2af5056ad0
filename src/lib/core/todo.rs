use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::TodoError;

pub const TITLE_MAX_CHARS: usize = 200;
pub const ASSIGNEE_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub due_date: NaiveDate,
    pub title: String,
    pub assignee: String,
    pub completed: bool,
    pub favorite: bool,
}

/// Every column except `id`; what the store writes on insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    pub due_date: NaiveDate,
    pub title: String,
    pub assignee: String,
    pub completed: bool,
    pub favorite: bool,
}

impl TodoFields {
    pub fn validate(&self) -> Result<(), TodoError> {
        check_length("title", &self.title, TITLE_MAX_CHARS)?;
        check_length("assignee", &self.assignee, ASSIGNEE_MAX_CHARS)?;
        Ok(())
    }

    pub fn into_todo(self, id: i64) -> Todo {
        Todo {
            id,
            due_date: self.due_date,
            title: self.title,
            assignee: self.assignee,
            completed: self.completed,
            favorite: self.favorite,
        }
    }
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), TodoError> {
    let len = value.chars().count();
    if len > max {
        return Err(TodoError::InvalidField {
            field,
            reason: format!("{len} characters exceeds the limit of {max}"),
        });
    }
    Ok(())
}

/// Create payload. The flags are optional and default to false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub due_date: NaiveDate,
    pub title: String,
    pub assignee: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub favorite: bool,
}

impl From<CreateTodo> for TodoFields {
    fn from(body: CreateTodo) -> Self {
        Self {
            due_date: body.due_date,
            title: body.title,
            assignee: body.assignee,
            completed: body.completed,
            favorite: body.favorite,
        }
    }
}

/// Update payload: a full replace, so every field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub due_date: NaiveDate,
    pub title: String,
    pub assignee: String,
    pub completed: bool,
    pub favorite: bool,
}

impl From<UpdateTodo> for TodoFields {
    fn from(body: UpdateTodo) -> Self {
        Self {
            due_date: body.due_date,
            title: body.title,
            assignee: body.assignee,
            completed: body.completed,
            favorite: body.favorite,
        }
    }
}
