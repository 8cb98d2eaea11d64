use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::Page;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::ContentService;
use crate::validation::{CreatePageRequest, ReorderPagesRequest, UpdatePageRequest};

#[derive(Debug, Deserialize)]
pub struct PageListQuery {
    /// Variant track to list. Omitted means the default track.
    pub variant: Option<Uuid>,
}

/// GET /api/lessons/:lesson_id/pages - List one track's pages in order
pub async fn list(
    Path(lesson_id): Path<Uuid>,
    Query(query): Query<PageListQuery>,
) -> ApiResult<Vec<Page>> {
    let service = ContentService::new().await?;
    let pages = service.list_pages(lesson_id, query.variant).await?;
    Ok(ApiResponse::success(pages))
}

/// POST /api/lessons/:lesson_id/pages - Append a page to a lesson track
pub async fn create(
    Extension(principal): Extension<Principal>,
    Path(lesson_id): Path<Uuid>,
    Json(body): Json<CreatePageRequest>,
) -> ApiResult<Page> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid page payload", Some(errors)))?;

    let service = ContentService::new().await?;
    let page = service.create_page(lesson_id, &body).await?;
    Ok(ApiResponse::created(page))
}

/// GET /api/pages/:page_id - Get a page by id
pub async fn get(Path(page_id): Path<Uuid>) -> ApiResult<Page> {
    let service = ContentService::new().await?;
    let page = service.get_page(page_id).await?;
    Ok(ApiResponse::success(page))
}

/// PUT /api/pages/:page_id - Retitle a page (order is untouched)
pub async fn update(
    Extension(principal): Extension<Principal>,
    Path(page_id): Path<Uuid>,
    Json(body): Json<UpdatePageRequest>,
) -> ApiResult<Page> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid page payload", Some(errors)))?;

    let service = ContentService::new().await?;
    let page = service.update_page(page_id, &body).await?;
    Ok(ApiResponse::success(page))
}

/// DELETE /api/pages/:page_id - Delete a page and its blocks
pub async fn delete(
    Extension(principal): Extension<Principal>,
    Path(page_id): Path<Uuid>,
) -> ApiResult<Value> {
    principal.require_editor()?;

    let service = ContentService::new().await?;
    service.delete_page(page_id).await?;
    Ok(ApiResponse::success(json!({ "deleted": page_id })))
}

/// PATCH /api/lessons/:lesson_id/pages/order - Reorder one track's pages.
/// The body must carry the full current set of the track's page ids in the
/// desired sequence; anything else is rejected with no mutation.
pub async fn reorder(
    Extension(principal): Extension<Principal>,
    Path(lesson_id): Path<Uuid>,
    Json(body): Json<ReorderPagesRequest>,
) -> ApiResult<Value> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid reorder payload", Some(errors)))?;

    let service = ContentService::new().await?;
    service
        .reorder_pages(lesson_id, body.variant_id, &body.page_ids)
        .await?;
    Ok(ApiResponse::success(json!({
        "message": "page order updated",
        "count": body.page_ids.len()
    })))
}
