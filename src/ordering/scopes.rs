use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::error::OrderingError;
use super::scope::OrderedScope;

/// Pages of one lesson track. `variant_id` NULL addresses the default track;
/// a reorder never crosses tracks.
pub struct LessonPageScope {
    pool: PgPool,
    lesson_id: Uuid,
    variant_id: Option<Uuid>,
}

impl LessonPageScope {
    pub fn new(pool: PgPool, lesson_id: Uuid, variant_id: Option<Uuid>) -> Self {
        Self {
            pool,
            lesson_id,
            variant_id,
        }
    }
}

#[async_trait]
impl OrderedScope for LessonPageScope {
    fn describe(&self) -> String {
        match self.variant_id {
            Some(variant) => format!("lesson {} (variant {})", self.lesson_id, variant),
            None => format!("lesson {}", self.lesson_id),
        }
    }

    async fn list_child_ids(&self) -> Result<Vec<Uuid>, OrderingError> {
        let lessons: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE id = $1")
            .bind(self.lesson_id)
            .fetch_one(&self.pool)
            .await?;
        if lessons == 0 {
            return Err(OrderingError::ScopeNotFound(self.describe()));
        }

        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"SELECT id FROM pages
               WHERE lesson_id = $1 AND variant_id IS NOT DISTINCT FROM $2
               ORDER BY "order", id"#,
        )
        .bind(self.lesson_id)
        .bind(self.variant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn write_order(&self, ordered: &[Uuid]) -> Result<(), OrderingError> {
        let mut tx = self.pool.begin().await?;

        for (index, id) in ordered.iter().enumerate() {
            sqlx::query(
                r#"UPDATE pages SET "order" = $1, updated_at = NOW()
                   WHERE id = $2 AND lesson_id = $3 AND variant_id IS NOT DISTINCT FROM $4"#,
            )
            .bind(index as i32)
            .bind(id)
            .bind(self.lesson_id)
            .bind(self.variant_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(
            "Rewrote page order for {} ({} pages)",
            self.describe(),
            ordered.len()
        );
        Ok(())
    }
}

/// Content blocks of one page.
pub struct PageBlockScope {
    pool: PgPool,
    page_id: Uuid,
}

impl PageBlockScope {
    pub fn new(pool: PgPool, page_id: Uuid) -> Self {
        Self { pool, page_id }
    }
}

#[async_trait]
impl OrderedScope for PageBlockScope {
    fn describe(&self) -> String {
        format!("page {}", self.page_id)
    }

    async fn list_child_ids(&self) -> Result<Vec<Uuid>, OrderingError> {
        let pages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pages WHERE id = $1")
            .bind(self.page_id)
            .fetch_one(&self.pool)
            .await?;
        if pages == 0 {
            return Err(OrderingError::ScopeNotFound(self.describe()));
        }

        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"SELECT id FROM blocks WHERE page_id = $1 ORDER BY "order", id"#,
        )
        .bind(self.page_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn write_order(&self, ordered: &[Uuid]) -> Result<(), OrderingError> {
        let mut tx = self.pool.begin().await?;

        for (index, id) in ordered.iter().enumerate() {
            sqlx::query(
                r#"UPDATE blocks SET "order" = $1, updated_at = NOW()
                   WHERE id = $2 AND page_id = $3"#,
            )
            .bind(index as i32)
            .bind(id)
            .bind(self.page_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(
            "Rewrote block order for {} ({} blocks)",
            self.describe(),
            ordered.len()
        );
        Ok(())
    }
}
