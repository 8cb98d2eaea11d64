use axum::{
    extract::{Extension, Path},
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::Topic;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::CatalogService;
use crate::validation::{CreateTopicRequest, UpdateTopicRequest};

/// GET /api/courses/:course_id/topics - List a course's topics in order
pub async fn list(Path(course_id): Path<Uuid>) -> ApiResult<Vec<Topic>> {
    let service = CatalogService::new().await?;
    let topics = service.list_topics(course_id).await?;
    Ok(ApiResponse::success(topics))
}

/// POST /api/courses/:course_id/topics - Append a topic to a course.
/// The new topic always lands at the end of the course's ordering.
pub async fn create(
    Extension(principal): Extension<Principal>,
    Path(course_id): Path<Uuid>,
    Json(body): Json<CreateTopicRequest>,
) -> ApiResult<Topic> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid topic payload", Some(errors)))?;

    let service = CatalogService::new().await?;
    let topic = service.create_topic(course_id, &body).await?;
    Ok(ApiResponse::created(topic))
}

/// GET /api/topics/:topic_id - Get a topic by id
pub async fn get(Path(topic_id): Path<Uuid>) -> ApiResult<Topic> {
    let service = CatalogService::new().await?;
    let topic = service.get_topic(topic_id).await?;
    Ok(ApiResponse::success(topic))
}

/// PUT /api/topics/:topic_id - Update a topic (order is untouched)
pub async fn update(
    Extension(principal): Extension<Principal>,
    Path(topic_id): Path<Uuid>,
    Json(body): Json<UpdateTopicRequest>,
) -> ApiResult<Topic> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid topic payload", Some(errors)))?;

    let service = CatalogService::new().await?;
    let topic = service.update_topic(topic_id, &body).await?;
    Ok(ApiResponse::success(topic))
}

/// DELETE /api/topics/:topic_id - Delete a topic
pub async fn delete(
    Extension(principal): Extension<Principal>,
    Path(topic_id): Path<Uuid>,
) -> ApiResult<Value> {
    principal.require_editor()?;

    let service = CatalogService::new().await?;
    service.delete_topic(topic_id).await?;
    Ok(ApiResponse::success(json!({ "deleted": topic_id })))
}
