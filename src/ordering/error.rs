use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrderingError {
    #[error("Scope not found: {0}")]
    ScopeNotFound(String),

    #[error("Ordering request must not be empty")]
    EmptyRequest,

    #[error("Duplicate identifier in ordering request: {0}")]
    DuplicateId(Uuid),

    #[error("Identifier {id} does not belong to {scope}")]
    UnknownId { scope: String, id: Uuid },

    #[error("Ordering request omits {missing} of {total} children of {scope}")]
    IncompleteSet {
        scope: String,
        missing: usize,
        total: usize,
    },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
