use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Block, Lesson, Page};
use crate::ordering::{self, LessonPageScope, OrderingError, PageBlockScope};
use crate::validation::{
    CreateBlockRequest, CreateLessonRequest, CreatePageRequest, UpdateBlockRequest,
    UpdateLessonRequest, UpdatePageRequest,
};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Topic not found: {0}")]
    TopicNotFound(Uuid),
    #[error("Lesson not found: {0}")]
    LessonNotFound(Uuid),
    #[error("Page not found: {0}")]
    PageNotFound(Uuid),
    #[error("Block not found: {0}")]
    BlockNotFound(Uuid),
    #[error(transparent)]
    Ordering(#[from] OrderingError),
    #[error("Database manager error: {0}")]
    Manager(#[from] DatabaseError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Lessons, their pages and page blocks. Pages order within a
/// (lesson, variant) track, blocks within their page; creation appends,
/// full reordering goes through the ordering core.
pub struct ContentService {
    pool: PgPool,
}

impl ContentService {
    pub async fn new() -> Result<Self, ContentError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Lessons
    // ------------------------------------------------------------------

    pub async fn list_lessons(&self, topic_id: Uuid) -> Result<Vec<Lesson>, ContentError> {
        let topics: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics WHERE id = $1")
            .bind(topic_id)
            .fetch_one(&self.pool)
            .await?;
        if topics == 0 {
            return Err(ContentError::TopicNotFound(topic_id));
        }

        let lessons = sqlx::query_as::<_, Lesson>(
            r#"SELECT id, topic_id, title, summary, created_at, updated_at
               FROM lessons WHERE topic_id = $1 ORDER BY created_at"#,
        )
        .bind(topic_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lessons)
    }

    pub async fn create_lesson(
        &self,
        topic_id: Uuid,
        input: &CreateLessonRequest,
    ) -> Result<Lesson, ContentError> {
        let topics: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics WHERE id = $1")
            .bind(topic_id)
            .fetch_one(&self.pool)
            .await?;
        if topics == 0 {
            return Err(ContentError::TopicNotFound(topic_id));
        }

        let lesson = sqlx::query_as::<_, Lesson>(
            r#"INSERT INTO lessons (id, topic_id, title, summary)
               VALUES ($1, $2, $3, $4)
               RETURNING id, topic_id, title, summary, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(topic_id)
        .bind(&input.title)
        .bind(&input.summary)
        .fetch_one(&self.pool)
        .await?;
        Ok(lesson)
    }

    pub async fn get_lesson(&self, lesson_id: Uuid) -> Result<Lesson, ContentError> {
        sqlx::query_as::<_, Lesson>(
            r#"SELECT id, topic_id, title, summary, created_at, updated_at
               FROM lessons WHERE id = $1"#,
        )
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ContentError::LessonNotFound(lesson_id))
    }

    pub async fn update_lesson(
        &self,
        lesson_id: Uuid,
        input: &UpdateLessonRequest,
    ) -> Result<Lesson, ContentError> {
        sqlx::query_as::<_, Lesson>(
            r#"UPDATE lessons SET title = $1, summary = $2, updated_at = NOW()
               WHERE id = $3
               RETURNING id, topic_id, title, summary, created_at, updated_at"#,
        )
        .bind(&input.title)
        .bind(&input.summary)
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ContentError::LessonNotFound(lesson_id))
    }

    pub async fn delete_lesson(&self, lesson_id: Uuid) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ContentError::LessonNotFound(lesson_id));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Pages (ordered within a lesson variant track)
    // ------------------------------------------------------------------

    pub async fn list_pages(
        &self,
        lesson_id: Uuid,
        variant_id: Option<Uuid>,
    ) -> Result<Vec<Page>, ContentError> {
        let lessons: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .fetch_one(&self.pool)
            .await?;
        if lessons == 0 {
            return Err(ContentError::LessonNotFound(lesson_id));
        }

        let pages = sqlx::query_as::<_, Page>(
            r#"SELECT id, lesson_id, variant_id, title, "order", created_at, updated_at
               FROM pages
               WHERE lesson_id = $1 AND variant_id IS NOT DISTINCT FROM $2
               ORDER BY "order", id"#,
        )
        .bind(lesson_id)
        .bind(variant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(pages)
    }

    /// Append a page at the end of its (lesson, variant) track.
    pub async fn create_page(
        &self,
        lesson_id: Uuid,
        input: &CreatePageRequest,
    ) -> Result<Page, ContentError> {
        let mut tx = self.pool.begin().await?;

        let lessons: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .fetch_one(&mut *tx)
            .await?;
        if lessons == 0 {
            return Err(ContentError::LessonNotFound(lesson_id));
        }

        let next_order: i32 = sqlx::query_scalar(
            r#"SELECT COALESCE(MAX("order") + 1, 0) FROM pages
               WHERE lesson_id = $1 AND variant_id IS NOT DISTINCT FROM $2"#,
        )
        .bind(lesson_id)
        .bind(input.variant_id)
        .fetch_one(&mut *tx)
        .await?;

        let page = sqlx::query_as::<_, Page>(
            r#"INSERT INTO pages (id, lesson_id, variant_id, title, "order")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, lesson_id, variant_id, title, "order", created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(lesson_id)
        .bind(input.variant_id)
        .bind(&input.title)
        .bind(next_order)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(page)
    }

    pub async fn get_page(&self, page_id: Uuid) -> Result<Page, ContentError> {
        sqlx::query_as::<_, Page>(
            r#"SELECT id, lesson_id, variant_id, title, "order", created_at, updated_at
               FROM pages WHERE id = $1"#,
        )
        .bind(page_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ContentError::PageNotFound(page_id))
    }

    /// Retitle a page. `order` and `variant_id` are deliberately untouched:
    /// moving between tracks is not an edit operation.
    pub async fn update_page(
        &self,
        page_id: Uuid,
        input: &UpdatePageRequest,
    ) -> Result<Page, ContentError> {
        sqlx::query_as::<_, Page>(
            r#"UPDATE pages SET title = $1, updated_at = NOW()
               WHERE id = $2
               RETURNING id, lesson_id, variant_id, title, "order", created_at, updated_at"#,
        )
        .bind(&input.title)
        .bind(page_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ContentError::PageNotFound(page_id))
    }

    pub async fn delete_page(&self, page_id: Uuid) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(page_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ContentError::PageNotFound(page_id));
        }
        Ok(())
    }

    /// Persist a full reordering of one lesson track's pages.
    pub async fn reorder_pages(
        &self,
        lesson_id: Uuid,
        variant_id: Option<Uuid>,
        page_ids: &[Uuid],
    ) -> Result<(), ContentError> {
        let scope = LessonPageScope::new(self.pool.clone(), lesson_id, variant_id);
        ordering::reorder(&scope, page_ids).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Blocks (ordered within their page)
    // ------------------------------------------------------------------

    pub async fn list_blocks(&self, page_id: Uuid) -> Result<Vec<Block>, ContentError> {
        let pages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pages WHERE id = $1")
            .bind(page_id)
            .fetch_one(&self.pool)
            .await?;
        if pages == 0 {
            return Err(ContentError::PageNotFound(page_id));
        }

        let blocks = sqlx::query_as::<_, Block>(
            r#"SELECT id, page_id, kind, content, "order", created_at, updated_at
               FROM blocks WHERE page_id = $1 ORDER BY "order", id"#,
        )
        .bind(page_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(blocks)
    }

    /// Append a block at the end of its page.
    pub async fn create_block(
        &self,
        page_id: Uuid,
        input: &CreateBlockRequest,
    ) -> Result<Block, ContentError> {
        let mut tx = self.pool.begin().await?;

        let pages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pages WHERE id = $1")
            .bind(page_id)
            .fetch_one(&mut *tx)
            .await?;
        if pages == 0 {
            return Err(ContentError::PageNotFound(page_id));
        }

        let next_order: i32 = sqlx::query_scalar(
            r#"SELECT COALESCE(MAX("order") + 1, 0) FROM blocks WHERE page_id = $1"#,
        )
        .bind(page_id)
        .fetch_one(&mut *tx)
        .await?;

        let block = sqlx::query_as::<_, Block>(
            r#"INSERT INTO blocks (id, page_id, kind, content, "order")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, page_id, kind, content, "order", created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(page_id)
        .bind(&input.kind)
        .bind(&input.content)
        .bind(next_order)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(block)
    }

    pub async fn get_block(&self, block_id: Uuid) -> Result<Block, ContentError> {
        sqlx::query_as::<_, Block>(
            r#"SELECT id, page_id, kind, content, "order", created_at, updated_at
               FROM blocks WHERE id = $1"#,
        )
        .bind(block_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ContentError::BlockNotFound(block_id))
    }

    pub async fn update_block(
        &self,
        block_id: Uuid,
        input: &UpdateBlockRequest,
    ) -> Result<Block, ContentError> {
        sqlx::query_as::<_, Block>(
            r#"UPDATE blocks SET kind = $1, content = $2, updated_at = NOW()
               WHERE id = $3
               RETURNING id, page_id, kind, content, "order", created_at, updated_at"#,
        )
        .bind(&input.kind)
        .bind(&input.content)
        .bind(block_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ContentError::BlockNotFound(block_id))
    }

    pub async fn delete_block(&self, block_id: Uuid) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM blocks WHERE id = $1")
            .bind(block_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ContentError::BlockNotFound(block_id));
        }
        Ok(())
    }

    /// Persist a full reordering of one page's blocks.
    pub async fn reorder_blocks(
        &self,
        page_id: Uuid,
        block_ids: &[Uuid],
    ) -> Result<(), ContentError> {
        let scope = PageBlockScope::new(self.pool.clone(), page_id);
        ordering::reorder(&scope, block_ids).await?;
        Ok(())
    }
}
