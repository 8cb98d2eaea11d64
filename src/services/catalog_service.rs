use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Course, Subject, Topic};
use crate::validation::{
    CreateCourseRequest, CreateSubjectRequest, CreateTopicRequest, UpdateCourseRequest,
    UpdateSubjectRequest, UpdateTopicRequest,
};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Course not found: {0}")]
    CourseNotFound(Uuid),
    #[error("Subject not found: {0}")]
    SubjectNotFound(Uuid),
    #[error("Topic not found: {0}")]
    TopicNotFound(Uuid),
    #[error("Database manager error: {0}")]
    Manager(#[from] DatabaseError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Courses, subjects and topics. Topics are the only ordered collection here;
/// their `order` is assigned append-style at creation and is never touched by
/// renames or other edits.
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub async fn new() -> Result<Self, CatalogError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Courses
    // ------------------------------------------------------------------

    pub async fn list_courses(&self) -> Result<Vec<Course>, CatalogError> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT id, title, description, created_at, updated_at FROM courses ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }

    pub async fn create_course(&self, input: &CreateCourseRequest) -> Result<Course, CatalogError> {
        let course = sqlx::query_as::<_, Course>(
            r#"INSERT INTO courses (id, title, description)
               VALUES ($1, $2, $3)
               RETURNING id, title, description, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(course)
    }

    pub async fn get_course(&self, course_id: Uuid) -> Result<Course, CatalogError> {
        sqlx::query_as::<_, Course>(
            "SELECT id, title, description, created_at, updated_at FROM courses WHERE id = $1",
        )
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::CourseNotFound(course_id))
    }

    pub async fn update_course(
        &self,
        course_id: Uuid,
        input: &UpdateCourseRequest,
    ) -> Result<Course, CatalogError> {
        sqlx::query_as::<_, Course>(
            r#"UPDATE courses SET title = $1, description = $2, updated_at = NOW()
               WHERE id = $3
               RETURNING id, title, description, created_at, updated_at"#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::CourseNotFound(course_id))
    }

    pub async fn delete_course(&self, course_id: Uuid) -> Result<(), CatalogError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(course_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(CatalogError::CourseNotFound(course_id));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Subjects
    // ------------------------------------------------------------------

    pub async fn list_subjects(&self, course_id: Uuid) -> Result<Vec<Subject>, CatalogError> {
        self.ensure_course(course_id).await?;
        let subjects = sqlx::query_as::<_, Subject>(
            r#"SELECT id, course_id, title, description, created_at, updated_at
               FROM subjects WHERE course_id = $1 ORDER BY title"#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(subjects)
    }

    pub async fn create_subject(
        &self,
        course_id: Uuid,
        input: &CreateSubjectRequest,
    ) -> Result<Subject, CatalogError> {
        self.ensure_course(course_id).await?;
        let subject = sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (id, course_id, title, description)
               VALUES ($1, $2, $3, $4)
               RETURNING id, course_id, title, description, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(course_id)
        .bind(&input.title)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(subject)
    }

    pub async fn get_subject(&self, subject_id: Uuid) -> Result<Subject, CatalogError> {
        sqlx::query_as::<_, Subject>(
            r#"SELECT id, course_id, title, description, created_at, updated_at
               FROM subjects WHERE id = $1"#,
        )
        .bind(subject_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::SubjectNotFound(subject_id))
    }

    pub async fn update_subject(
        &self,
        subject_id: Uuid,
        input: &UpdateSubjectRequest,
    ) -> Result<Subject, CatalogError> {
        sqlx::query_as::<_, Subject>(
            r#"UPDATE subjects SET title = $1, description = $2, updated_at = NOW()
               WHERE id = $3
               RETURNING id, course_id, title, description, created_at, updated_at"#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(subject_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::SubjectNotFound(subject_id))
    }

    pub async fn delete_subject(&self, subject_id: Uuid) -> Result<(), CatalogError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(subject_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(CatalogError::SubjectNotFound(subject_id));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Topics (ordered within their course)
    // ------------------------------------------------------------------

    pub async fn list_topics(&self, course_id: Uuid) -> Result<Vec<Topic>, CatalogError> {
        self.ensure_course(course_id).await?;
        let topics = sqlx::query_as::<_, Topic>(
            r#"SELECT id, course_id, subject_id, title, "order", created_at, updated_at
               FROM topics WHERE course_id = $1 ORDER BY "order", id"#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(topics)
    }

    /// Append a topic at the end of the course's ordering. The next order
    /// value is read and the row inserted inside one transaction so two
    /// concurrent appends cannot both claim the same slot and then commit a
    /// torn pair.
    pub async fn create_topic(
        &self,
        course_id: Uuid,
        input: &CreateTopicRequest,
    ) -> Result<Topic, CatalogError> {
        let mut tx = self.pool.begin().await?;

        let courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE id = $1")
            .bind(course_id)
            .fetch_one(&mut *tx)
            .await?;
        if courses == 0 {
            return Err(CatalogError::CourseNotFound(course_id));
        }

        if let Some(subject_id) = input.subject_id {
            let subjects: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM subjects WHERE id = $1 AND course_id = $2",
            )
            .bind(subject_id)
            .bind(course_id)
            .fetch_one(&mut *tx)
            .await?;
            if subjects == 0 {
                return Err(CatalogError::SubjectNotFound(subject_id));
            }
        }

        let next_order: i32 = sqlx::query_scalar(
            r#"SELECT COALESCE(MAX("order") + 1, 0) FROM topics WHERE course_id = $1"#,
        )
        .bind(course_id)
        .fetch_one(&mut *tx)
        .await?;

        let topic = sqlx::query_as::<_, Topic>(
            r#"INSERT INTO topics (id, course_id, subject_id, title, "order")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, course_id, subject_id, title, "order", created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(course_id)
        .bind(input.subject_id)
        .bind(&input.title)
        .bind(next_order)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(topic)
    }

    pub async fn get_topic(&self, topic_id: Uuid) -> Result<Topic, CatalogError> {
        sqlx::query_as::<_, Topic>(
            r#"SELECT id, course_id, subject_id, title, "order", created_at, updated_at
               FROM topics WHERE id = $1"#,
        )
        .bind(topic_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::TopicNotFound(topic_id))
    }

    /// Rename or re-subject a topic. `order` is deliberately untouched:
    /// unrelated edits never move a topic.
    pub async fn update_topic(
        &self,
        topic_id: Uuid,
        input: &UpdateTopicRequest,
    ) -> Result<Topic, CatalogError> {
        sqlx::query_as::<_, Topic>(
            r#"UPDATE topics SET title = $1, subject_id = $2, updated_at = NOW()
               WHERE id = $3
               RETURNING id, course_id, subject_id, title, "order", created_at, updated_at"#,
        )
        .bind(&input.title)
        .bind(input.subject_id)
        .bind(topic_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::TopicNotFound(topic_id))
    }

    pub async fn delete_topic(&self, topic_id: Uuid) -> Result<(), CatalogError> {
        let result = sqlx::query("DELETE FROM topics WHERE id = $1")
            .bind(topic_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(CatalogError::TopicNotFound(topic_id));
        }
        Ok(())
    }

    async fn ensure_course(&self, course_id: Uuid) -> Result<(), CatalogError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE id = $1")
            .bind(course_id)
            .fetch_one(&self.pool)
            .await?;
        if count == 0 {
            return Err(CatalogError::CourseNotFound(course_id));
        }
        Ok(())
    }
}
