use axum::{
    extract::{Extension, Path},
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::Block;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::ContentService;
use crate::validation::{CreateBlockRequest, ReorderBlocksRequest, UpdateBlockRequest};

/// GET /api/pages/:page_id/blocks - List a page's blocks in order
pub async fn list(Path(page_id): Path<Uuid>) -> ApiResult<Vec<Block>> {
    let service = ContentService::new().await?;
    let blocks = service.list_blocks(page_id).await?;
    Ok(ApiResponse::success(blocks))
}

/// POST /api/pages/:page_id/blocks - Append a block to a page
pub async fn create(
    Extension(principal): Extension<Principal>,
    Path(page_id): Path<Uuid>,
    Json(body): Json<CreateBlockRequest>,
) -> ApiResult<Block> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid block payload", Some(errors)))?;

    let service = ContentService::new().await?;
    let block = service.create_block(page_id, &body).await?;
    Ok(ApiResponse::created(block))
}

/// GET /api/blocks/:block_id - Get a block by id
pub async fn get(Path(block_id): Path<Uuid>) -> ApiResult<Block> {
    let service = ContentService::new().await?;
    let block = service.get_block(block_id).await?;
    Ok(ApiResponse::success(block))
}

/// PUT /api/blocks/:block_id - Update a block's kind/content (order untouched)
pub async fn update(
    Extension(principal): Extension<Principal>,
    Path(block_id): Path<Uuid>,
    Json(body): Json<UpdateBlockRequest>,
) -> ApiResult<Block> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid block payload", Some(errors)))?;

    let service = ContentService::new().await?;
    let block = service.update_block(block_id, &body).await?;
    Ok(ApiResponse::success(block))
}

/// DELETE /api/blocks/:block_id - Delete a block
pub async fn delete(
    Extension(principal): Extension<Principal>,
    Path(block_id): Path<Uuid>,
) -> ApiResult<Value> {
    principal.require_editor()?;

    let service = ContentService::new().await?;
    service.delete_block(block_id).await?;
    Ok(ApiResponse::success(json!({ "deleted": block_id })))
}

/// PATCH /api/pages/:page_id/blocks/order - Reorder a page's blocks.
/// The body must carry the full current set of the page's block ids in the
/// desired sequence; anything else is rejected with no mutation.
pub async fn reorder(
    Extension(principal): Extension<Principal>,
    Path(page_id): Path<Uuid>,
    Json(body): Json<ReorderBlocksRequest>,
) -> ApiResult<Value> {
    principal.require_editor()?;
    body.validate()
        .map_err(|errors| ApiError::validation_error("Invalid reorder payload", Some(errors)))?;

    let service = ContentService::new().await?;
    service.reorder_blocks(page_id, &body.block_ids).await?;
    Ok(ApiResponse::success(json!({
        "message": "block order updated",
        "count": body.block_ids.len()
    })))
}
