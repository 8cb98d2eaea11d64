mod common;

use anyhow::Result;
use edu_api_rust::auth::Role;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn api_requires_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/courses", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn garbage_tokens_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/courses", server.base_url))
        .bearer_auth("definitely-not-a-jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn viewers_cannot_reorder() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::token_for(Role::Viewer);

    let lesson_id = uuid::Uuid::new_v4();
    let res = client
        .patch(format!(
            "{}/api/lessons/{}/pages/order",
            server.base_url, lesson_id
        ))
        .bearer_auth(&token)
        .json(&json!({ "page_ids": [uuid::Uuid::new_v4()] }))
        .send()
        .await?;

    // Role gate fires before validation or any store access
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn viewers_cannot_create_courses() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::token_for(Role::Viewer);

    let res = client
        .post(format!("{}/api/courses", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "title": "Algebra I" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}
