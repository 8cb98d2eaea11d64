use axum::{
    extract::{Extension, Path},
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::Course;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::CatalogService;
use crate::validation::{CreateCourseRequest, UpdateCourseRequest};

/// GET /api/courses - List all courses
pub async fn list() -> ApiResult<Vec<Course>> {
    let service = CatalogService::new().await?;
    let courses = service.list_courses().await?;
    Ok(ApiResponse::success(courses))
}

/// POST /api/courses - Create a course
pub async fn create(
    Extension(principal): Extension<Principal>,
    Json(body): Json<CreateCourseRequest>,
) -> ApiResult<Course> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid course payload", Some(errors)))?;

    let service = CatalogService::new().await?;
    let course = service.create_course(&body).await?;
    Ok(ApiResponse::created(course))
}

/// GET /api/courses/:course_id - Get a course by id
pub async fn get(Path(course_id): Path<Uuid>) -> ApiResult<Course> {
    let service = CatalogService::new().await?;
    let course = service.get_course(course_id).await?;
    Ok(ApiResponse::success(course))
}

/// PUT /api/courses/:course_id - Update a course
pub async fn update(
    Extension(principal): Extension<Principal>,
    Path(course_id): Path<Uuid>,
    Json(body): Json<UpdateCourseRequest>,
) -> ApiResult<Course> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid course payload", Some(errors)))?;

    let service = CatalogService::new().await?;
    let course = service.update_course(course_id, &body).await?;
    Ok(ApiResponse::success(course))
}

/// DELETE /api/courses/:course_id - Delete a course and its children
pub async fn delete(
    Extension(principal): Extension<Principal>,
    Path(course_id): Path<Uuid>,
) -> ApiResult<Value> {
    principal.require_editor()?;

    let service = CatalogService::new().await?;
    service.delete_course(course_id).await?;
    Ok(ApiResponse::success(json!({ "deleted": course_id })))
}
