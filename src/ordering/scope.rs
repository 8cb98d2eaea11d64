use async_trait::async_trait;
use uuid::Uuid;

use super::error::OrderingError;

/// Capability interface for a parent scope whose children carry a positional
/// `order` value. Implementations resolve the scope, list the current
/// children, and persist a full positional rewrite as one atomic unit.
#[async_trait]
pub trait OrderedScope: Send + Sync {
    /// Human-readable scope identity for error messages and logs.
    fn describe(&self) -> String;

    /// Current child ids, ascending by `order`. Errors with
    /// [`OrderingError::ScopeNotFound`] when the parent does not exist.
    async fn list_child_ids(&self) -> Result<Vec<Uuid>, OrderingError>;

    /// Persist `order = index` for every id in `ordered`. Must be atomic:
    /// either every child's order is rewritten or none is observable.
    /// The caller guarantees `ordered` is a permutation of the current set.
    async fn write_order(&self, ordered: &[Uuid]) -> Result<(), OrderingError>;
}
