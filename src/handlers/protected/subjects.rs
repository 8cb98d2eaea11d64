use axum::{
    extract::{Extension, Path},
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::Subject;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::CatalogService;
use crate::validation::{CreateSubjectRequest, UpdateSubjectRequest};

/// GET /api/courses/:course_id/subjects - List a course's subjects
pub async fn list(Path(course_id): Path<Uuid>) -> ApiResult<Vec<Subject>> {
    let service = CatalogService::new().await?;
    let subjects = service.list_subjects(course_id).await?;
    Ok(ApiResponse::success(subjects))
}

/// POST /api/courses/:course_id/subjects - Create a subject in a course
pub async fn create(
    Extension(principal): Extension<Principal>,
    Path(course_id): Path<Uuid>,
    Json(body): Json<CreateSubjectRequest>,
) -> ApiResult<Subject> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid subject payload", Some(errors)))?;

    let service = CatalogService::new().await?;
    let subject = service.create_subject(course_id, &body).await?;
    Ok(ApiResponse::created(subject))
}

/// GET /api/subjects/:subject_id - Get a subject by id
pub async fn get(Path(subject_id): Path<Uuid>) -> ApiResult<Subject> {
    let service = CatalogService::new().await?;
    let subject = service.get_subject(subject_id).await?;
    Ok(ApiResponse::success(subject))
}

/// PUT /api/subjects/:subject_id - Update a subject
pub async fn update(
    Extension(principal): Extension<Principal>,
    Path(subject_id): Path<Uuid>,
    Json(body): Json<UpdateSubjectRequest>,
) -> ApiResult<Subject> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid subject payload", Some(errors)))?;

    let service = CatalogService::new().await?;
    let subject = service.update_subject(subject_id, &body).await?;
    Ok(ApiResponse::success(subject))
}

/// DELETE /api/subjects/:subject_id - Delete a subject
pub async fn delete(
    Extension(principal): Extension<Principal>,
    Path(subject_id): Path<Uuid>,
) -> ApiResult<Value> {
    principal.require_editor()?;

    let service = CatalogService::new().await?;
    service.delete_subject(subject_id).await?;
    Ok(ApiResponse::success(json!({ "deleted": subject_id })))
}
