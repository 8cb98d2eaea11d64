use std::collections::HashSet;

use uuid::Uuid;

use super::error::OrderingError;
use super::scope::OrderedScope;

/// Persist a caller-supplied full ordering of a scope's children.
///
/// `requested` must be an exact permutation of the scope's current child-id
/// set. Anything else is rejected before any write: empty input, duplicate
/// ids, ids from outside the scope, and orderings that omit children. On
/// success every child's `order` equals its index in `requested`.
pub async fn reorder<S: OrderedScope + ?Sized>(
    scope: &S,
    requested: &[Uuid],
) -> Result<(), OrderingError> {
    if requested.is_empty() {
        return Err(OrderingError::EmptyRequest);
    }

    let mut seen = HashSet::with_capacity(requested.len());
    for id in requested {
        if !seen.insert(*id) {
            return Err(OrderingError::DuplicateId(*id));
        }
    }

    let current = scope.list_child_ids().await?;
    let current_set: HashSet<Uuid> = current.iter().copied().collect();

    for id in requested {
        if !current_set.contains(id) {
            return Err(OrderingError::UnknownId {
                scope: scope.describe(),
                id: *id,
            });
        }
    }

    // No duplicates and no foreign ids, so a shorter request means children
    // were omitted.
    if requested.len() < current.len() {
        return Err(OrderingError::IncompleteSet {
            scope: scope.describe(),
            missing: current.len() - requested.len(),
            total: current.len(),
        });
    }

    scope.write_order(requested).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory scope with a fail switch to simulate a store that rejects
    /// the write. A failed write leaves the previous ordering untouched,
    /// mirroring the transactional contract of the sqlx scopes.
    struct MemoryScope {
        name: &'static str,
        exists: bool,
        children: Mutex<Vec<Uuid>>,
        fail_writes: bool,
    }

    impl MemoryScope {
        fn with_children(name: &'static str, n: usize) -> Self {
            Self {
                name,
                exists: true,
                children: Mutex::new((0..n).map(|_| Uuid::new_v4()).collect()),
                fail_writes: false,
            }
        }

        fn snapshot(&self) -> Vec<Uuid> {
            self.children.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OrderedScope for MemoryScope {
        fn describe(&self) -> String {
            self.name.to_string()
        }

        async fn list_child_ids(&self) -> Result<Vec<Uuid>, OrderingError> {
            if !self.exists {
                return Err(OrderingError::ScopeNotFound(self.describe()));
            }
            Ok(self.snapshot())
        }

        async fn write_order(&self, ordered: &[Uuid]) -> Result<(), OrderingError> {
            if self.fail_writes {
                return Err(OrderingError::Database(sqlx::Error::PoolClosed));
            }
            *self.children.lock().unwrap() = ordered.to_vec();
            Ok(())
        }
    }

    #[tokio::test]
    async fn round_trips_any_permutation() {
        let scope = MemoryScope::with_children("lesson", 3);
        let ids = scope.snapshot();

        // [P3, P1, P2]
        let requested = vec![ids[2], ids[0], ids[1]];
        reorder(&scope, &requested).await.unwrap();
        assert_eq!(scope.snapshot(), requested);
    }

    #[tokio::test]
    async fn reorder_is_idempotent() {
        let scope = MemoryScope::with_children("lesson", 4);
        let ids = scope.snapshot();

        let requested = vec![ids[3], ids[1], ids[0], ids[2]];
        reorder(&scope, &requested).await.unwrap();
        let after_first = scope.snapshot();
        reorder(&scope, &requested).await.unwrap();
        assert_eq!(scope.snapshot(), after_first);
    }

    #[tokio::test]
    async fn rejects_empty_request() {
        let scope = MemoryScope::with_children("lesson", 2);
        let before = scope.snapshot();

        let err = reorder(&scope, &[]).await.unwrap_err();
        assert!(matches!(err, OrderingError::EmptyRequest));
        assert_eq!(scope.snapshot(), before);
    }

    #[tokio::test]
    async fn rejects_duplicate_ids() {
        let scope = MemoryScope::with_children("page", 2);
        let ids = scope.snapshot();
        let before = scope.snapshot();

        // [B2, B1, B1]
        let err = reorder(&scope, &[ids[1], ids[0], ids[0]]).await.unwrap_err();
        assert!(matches!(err, OrderingError::DuplicateId(id) if id == ids[0]));
        assert_eq!(scope.snapshot(), before);
    }

    #[tokio::test]
    async fn rejects_subset_of_children() {
        let scope = MemoryScope::with_children("lesson", 3);
        let ids = scope.snapshot();
        let before = scope.snapshot();

        let err = reorder(&scope, &[ids[1], ids[0]]).await.unwrap_err();
        assert!(matches!(
            err,
            OrderingError::IncompleteSet { missing: 1, total: 3, .. }
        ));
        assert_eq!(scope.snapshot(), before);
    }

    #[tokio::test]
    async fn rejects_foreign_ids() {
        let scope = MemoryScope::with_children("lesson", 2);
        let ids = scope.snapshot();
        let before = scope.snapshot();
        let foreign = Uuid::new_v4();

        let err = reorder(&scope, &[ids[0], ids[1], foreign]).await.unwrap_err();
        assert!(matches!(err, OrderingError::UnknownId { id, .. } if id == foreign));
        assert_eq!(scope.snapshot(), before);
    }

    #[tokio::test]
    async fn missing_scope_is_an_error() {
        let scope = MemoryScope {
            name: "deleted lesson",
            exists: false,
            children: Mutex::new(vec![]),
            fail_writes: false,
        };

        let err = reorder(&scope, &[Uuid::new_v4()]).await.unwrap_err();
        assert!(matches!(err, OrderingError::ScopeNotFound(_)));
    }

    #[tokio::test]
    async fn failed_write_leaves_prior_ordering() {
        let mut scope = MemoryScope::with_children("lesson", 3);
        scope.fail_writes = true;
        let ids = scope.snapshot();
        let before = scope.snapshot();

        let err = reorder(&scope, &[ids[2], ids[1], ids[0]]).await.unwrap_err();
        assert!(matches!(err, OrderingError::Database(_)));
        assert_eq!(scope.snapshot(), before);
    }

    #[tokio::test]
    async fn scopes_are_isolated() {
        let a = MemoryScope::with_children("lesson a", 3);
        let b = MemoryScope::with_children("lesson b", 3);
        let a_ids = a.snapshot();
        let b_before = b.snapshot();

        reorder(&a, &[a_ids[2], a_ids[0], a_ids[1]]).await.unwrap();
        assert_eq!(b.snapshot(), b_before);
    }
}
