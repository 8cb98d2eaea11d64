use axum::{
    extract::{Extension, Path},
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::Lesson;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::ContentService;
use crate::validation::{CreateLessonRequest, UpdateLessonRequest};

/// GET /api/topics/:topic_id/lessons - List a topic's lessons
pub async fn list(Path(topic_id): Path<Uuid>) -> ApiResult<Vec<Lesson>> {
    let service = ContentService::new().await?;
    let lessons = service.list_lessons(topic_id).await?;
    Ok(ApiResponse::success(lessons))
}

/// POST /api/topics/:topic_id/lessons - Create a lesson in a topic
pub async fn create(
    Extension(principal): Extension<Principal>,
    Path(topic_id): Path<Uuid>,
    Json(body): Json<CreateLessonRequest>,
) -> ApiResult<Lesson> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid lesson payload", Some(errors)))?;

    let service = ContentService::new().await?;
    let lesson = service.create_lesson(topic_id, &body).await?;
    Ok(ApiResponse::created(lesson))
}

/// GET /api/lessons/:lesson_id - Get a lesson by id
pub async fn get(Path(lesson_id): Path<Uuid>) -> ApiResult<Lesson> {
    let service = ContentService::new().await?;
    let lesson = service.get_lesson(lesson_id).await?;
    Ok(ApiResponse::success(lesson))
}

/// PUT /api/lessons/:lesson_id - Update a lesson
pub async fn update(
    Extension(principal): Extension<Principal>,
    Path(lesson_id): Path<Uuid>,
    Json(body): Json<UpdateLessonRequest>,
) -> ApiResult<Lesson> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid lesson payload", Some(errors)))?;

    let service = ContentService::new().await?;
    let lesson = service.update_lesson(lesson_id, &body).await?;
    Ok(ApiResponse::success(lesson))
}

/// DELETE /api/lessons/:lesson_id - Delete a lesson and its pages
pub async fn delete(
    Extension(principal): Extension<Principal>,
    Path(lesson_id): Path<Uuid>,
) -> ApiResult<Value> {
    principal.require_editor()?;

    let service = ContentService::new().await?;
    service.delete_lesson(lesson_id).await?;
    Ok(ApiResponse::success(json!({ "deleted": lesson_id })))
}
