use std::cmp::Ordering;
use std::str::FromStr;

use crate::core::{Todo, TodoError};

pub const DEFAULT_SORT: &str = "due_date";
pub const DEFAULT_ORDER: &str = "asc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    DueDate,
    Title,
    Assignee,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::DueDate => "due_date",
            SortField::Title => "title",
            SortField::Assignee => "assignee",
        }
    }

    fn compare(self, a: &Todo, b: &Todo) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::DueDate => a.due_date.cmp(&b.due_date),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Assignee => a.assignee.cmp(&b.assignee),
        }
    }
}

impl FromStr for SortField {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "due_date" => Ok(SortField::DueDate),
            "title" => Ok(SortField::Title),
            "assignee" => Ok(SortField::Assignee),
            other => Err(TodoError::InvalidSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(TodoError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// A validated list request: incomplete todos first, then the requested
/// column and direction, optionally narrowed to assignees containing a
/// case-sensitive substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub sort: SortField,
    pub order: SortOrder,
    pub assignee: Option<String>,
}

impl ListQuery {
    /// Sort is checked before order, so a request with both wrong reports
    /// the sort field.
    pub fn parse(sort: &str, order: &str, assignee: Option<&str>) -> Result<Self, TodoError> {
        let sort = sort.parse::<SortField>()?;
        let order = order.parse::<SortOrder>()?;
        let assignee = assignee
            .filter(|needle| !needle.is_empty())
            .map(str::to_string);
        Ok(Self { sort, order, assignee })
    }

    /// `ORDER BY` body for SQL stores. Only static column names and keywords
    /// are interpolated.
    pub fn order_by(&self) -> String {
        format!("completed ASC, {} {}", self.sort.column(), self.order.keyword())
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        match &self.assignee {
            Some(needle) => todo.assignee.contains(needle.as_str()),
            None => true,
        }
    }

    pub fn compare(&self, a: &Todo, b: &Todo) -> Ordering {
        let secondary = match self.order {
            SortOrder::Asc => self.sort.compare(a, b),
            SortOrder::Desc => self.sort.compare(b, a),
        };
        a.completed.cmp(&b.completed).then(secondary)
    }

    /// Filter and order an in-memory set of todos the same way a SQL store
    /// would. The sort is stable, so ties keep their input order.
    pub fn apply(&self, todos: impl IntoIterator<Item = Todo>) -> Vec<Todo> {
        let mut rows: Vec<Todo> = todos.into_iter().filter(|t| self.matches(t)).collect();
        rows.sort_by(|a, b| self.compare(a, b));
        rows
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            sort: SortField::DueDate,
            order: SortOrder::Asc,
            assignee: None,
        }
    }
}
