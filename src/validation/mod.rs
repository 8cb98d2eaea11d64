//! Typed request payloads and their validation.
//!
//! Wire shape (types, required fields) is enforced by serde at extraction
//! time; `validate()` covers what the type system can't: non-empty trimmed
//! titles, bounded lengths, known block kinds, non-empty id sequences with
//! no duplicates. Failures come back as a per-field error map that the
//! boundary folds into `ApiError::validation_error`. Set-completeness
//! against the live scope is the reorderer's job, not validation's.

use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

const MAX_TITLE_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;

/// Block kinds the frontend knows how to render.
pub const BLOCK_KINDS: &[&str] = &["text", "heading", "image", "video", "quiz", "embed", "code"];

pub type FieldErrors = HashMap<String, String>;

fn check_title(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), "must not be empty".to_string());
    } else if value.len() > MAX_TITLE_LEN {
        errors.insert(
            field.to_string(),
            format!("must be at most {} characters", MAX_TITLE_LEN),
        );
    }
}

fn check_description(errors: &mut FieldErrors, field: &str, value: &Option<String>) {
    if let Some(text) = value {
        if text.len() > MAX_DESCRIPTION_LEN {
            errors.insert(
                field.to_string(),
                format!("must be at most {} characters", MAX_DESCRIPTION_LEN),
            );
        }
    }
}

fn check_id_sequence(errors: &mut FieldErrors, field: &str, ids: &[Uuid]) {
    if ids.is_empty() {
        errors.insert(field.to_string(), "must not be empty".to_string());
        return;
    }
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id) {
            errors.insert(
                field.to_string(),
                format!("contains duplicate identifier {}", id),
            );
            return;
        }
    }
}

fn finish(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ---------------------------------------------------------------------------
// Reorder requests
// ---------------------------------------------------------------------------

/// PATCH /api/lessons/:lesson_id/pages/order
#[derive(Debug, Deserialize)]
pub struct ReorderPagesRequest {
    pub page_ids: Vec<Uuid>,
    pub variant_id: Option<Uuid>,
}

impl ReorderPagesRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_id_sequence(&mut errors, "page_ids", &self.page_ids);
        finish(errors)
    }
}

/// PATCH /api/pages/:page_id/blocks/order
#[derive(Debug, Deserialize)]
pub struct ReorderBlocksRequest {
    pub block_ids: Vec<Uuid>,
}

impl ReorderBlocksRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_id_sequence(&mut errors, "block_ids", &self.block_ids);
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Catalog payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, "title", &self.title);
        check_description(&mut errors, "description", &self.description);
        finish(errors)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    pub title: String,
    pub description: Option<String>,
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, "title", &self.title);
        check_description(&mut errors, "description", &self.description);
        finish(errors)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    pub title: String,
    pub description: Option<String>,
}

impl CreateSubjectRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, "title", &self.title);
        check_description(&mut errors, "description", &self.description);
        finish(errors)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSubjectRequest {
    pub title: String,
    pub description: Option<String>,
}

impl UpdateSubjectRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, "title", &self.title);
        check_description(&mut errors, "description", &self.description);
        finish(errors)
    }
}

/// Topic creation appends to the course ordering; callers never supply an
/// order value.
#[derive(Debug, Deserialize)]
pub struct CreateTopicRequest {
    pub title: String,
    pub subject_id: Option<Uuid>,
}

impl CreateTopicRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, "title", &self.title);
        finish(errors)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTopicRequest {
    pub title: String,
    pub subject_id: Option<Uuid>,
}

impl UpdateTopicRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, "title", &self.title);
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Content payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateLessonRequest {
    pub title: String,
    pub summary: Option<String>,
}

impl CreateLessonRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, "title", &self.title);
        check_description(&mut errors, "summary", &self.summary);
        finish(errors)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateLessonRequest {
    pub title: String,
    pub summary: Option<String>,
}

impl UpdateLessonRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, "title", &self.title);
        check_description(&mut errors, "summary", &self.summary);
        finish(errors)
    }
}

/// Page creation appends to its (lesson, variant) track.
#[derive(Debug, Deserialize)]
pub struct CreatePageRequest {
    pub title: String,
    pub variant_id: Option<Uuid>,
}

impl CreatePageRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, "title", &self.title);
        finish(errors)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePageRequest {
    pub title: String,
}

impl UpdatePageRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, "title", &self.title);
        finish(errors)
    }
}

/// Block creation appends to its page.
#[derive(Debug, Deserialize)]
pub struct CreateBlockRequest {
    pub kind: String,
    pub content: Value,
}

impl CreateBlockRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !BLOCK_KINDS.contains(&self.kind.as_str()) {
            errors.insert(
                "kind".to_string(),
                format!("must be one of: {}", BLOCK_KINDS.join(", ")),
            );
        }
        finish(errors)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlockRequest {
    pub kind: String,
    pub content: Value,
}

impl UpdateBlockRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !BLOCK_KINDS.contains(&self.kind.as_str()) {
            errors.insert(
                "kind".to_string(),
                format!("must be one of: {}", BLOCK_KINDS.join(", ")),
            );
        }
        finish(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_reorder_request_is_rejected() {
        let req = ReorderPagesRequest {
            page_ids: vec![],
            variant_id: None,
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors["page_ids"], "must not be empty");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let id = Uuid::new_v4();
        let req = ReorderBlocksRequest {
            block_ids: vec![Uuid::new_v4(), id, id],
        };
        let errors = req.validate().unwrap_err();
        assert!(errors["block_ids"].contains("duplicate"));
    }

    #[test]
    fn distinct_ids_pass() {
        let req = ReorderPagesRequest {
            page_ids: vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()],
            variant_id: Some(Uuid::new_v4()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        let req = CreateCourseRequest {
            title: "   ".to_string(),
            description: None,
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors["title"], "must not be empty");
    }

    #[test]
    fn overlong_title_is_rejected() {
        let req = CreateLessonRequest {
            title: "x".repeat(MAX_TITLE_LEN + 1),
            summary: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_block_kind_is_rejected() {
        let req = CreateBlockRequest {
            kind: "hologram".to_string(),
            content: json!({}),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors["kind"].contains("must be one of"));
    }

    #[test]
    fn known_block_kind_passes() {
        let req = CreateBlockRequest {
            kind: "text".to_string(),
            content: json!({"body": "hello"}),
        };
        assert!(req.validate().is_ok());
    }
}
