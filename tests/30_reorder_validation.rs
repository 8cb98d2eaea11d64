mod common;

use anyhow::Result;
use edu_api_rust::auth::Role;
use reqwest::StatusCode;
use serde_json::json;

// All of these fail at the validation boundary, before any store access,
// so they hold with or without a reachable database.

#[tokio::test]
async fn empty_page_reorder_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::token_for(Role::Editor);

    let lesson_id = uuid::Uuid::new_v4();
    let res = client
        .patch(format!(
            "{}/api/lessons/{}/pages/order",
            server.base_url, lesson_id
        ))
        .bearer_auth(&token)
        .json(&json!({ "page_ids": [] }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field_errors"]["page_ids"], "must not be empty");
    Ok(())
}

#[tokio::test]
async fn duplicate_page_ids_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::token_for(Role::Editor);

    let lesson_id = uuid::Uuid::new_v4();
    let page = uuid::Uuid::new_v4();
    let res = client
        .patch(format!(
            "{}/api/lessons/{}/pages/order",
            server.base_url, lesson_id
        ))
        .bearer_auth(&token)
        .json(&json!({ "page_ids": [uuid::Uuid::new_v4(), page, page] }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["field_errors"]["page_ids"]
        .as_str()
        .unwrap()
        .contains("duplicate"));
    Ok(())
}

#[tokio::test]
async fn duplicate_block_ids_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::token_for(Role::Editor);

    let page_id = uuid::Uuid::new_v4();
    let block = uuid::Uuid::new_v4();
    let res = client
        .patch(format!(
            "{}/api/pages/{}/blocks/order",
            server.base_url, page_id
        ))
        .bearer_auth(&token)
        .json(&json!({ "block_ids": [block, block] }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn malformed_reorder_bodies_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::token_for(Role::Editor);

    let lesson_id = uuid::Uuid::new_v4();
    let res = client
        .patch(format!(
            "{}/api/lessons/{}/pages/order",
            server.base_url, lesson_id
        ))
        .bearer_auth(&token)
        .json(&json!({ "page_ids": "not-an-array" }))
        .send()
        .await?;

    // Serde rejects the shape before validation runs
    assert!(res.status().is_client_error(), "status: {}", res.status());
    Ok(())
}
