use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),
    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Todo {0} not found")]
    NotFound(i64),
    #[error("Schema unreachable: {0}")]
    SchemaUnreachable(#[source] sqlx::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TodoError {
    /// Errors caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TodoError::InvalidSortField(_)
                | TodoError::InvalidSortOrder(_)
                | TodoError::InvalidField { .. }
                | TodoError::NotFound(_)
        )
    }
}
