use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use edu_api_rust::database::manager::DatabaseManager;
use edu_api_rust::handlers::protected::{blocks, courses, lessons, pages, subjects, topics};
use edu_api_rust::middleware::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = edu_api_rust::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Edu API in {:?} mode", config.environment);

    // Apply migrations when a database is configured; otherwise boot degraded
    // and let /health report the store as unavailable.
    if std::env::var("DATABASE_URL").is_ok() {
        if let Err(e) = DatabaseManager::migrate().await {
            tracing::warn!("Migrations not applied: {}", e);
        }
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("EDU_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Edu API Rust server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    // Everything under /api requires a validated JWT
    let api = Router::new()
        .merge(catalog_routes())
        .merge(content_routes())
        .layer(axum::middleware::from_fn(jwt_auth_middleware));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(api)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn catalog_routes() -> Router {
    Router::new()
        // Courses
        .route("/api/courses", get(courses::list).post(courses::create))
        .route(
            "/api/courses/:course_id",
            get(courses::get).put(courses::update).delete(courses::delete),
        )
        // Subjects within a course
        .route(
            "/api/courses/:course_id/subjects",
            get(subjects::list).post(subjects::create),
        )
        .route(
            "/api/subjects/:subject_id",
            get(subjects::get).put(subjects::update).delete(subjects::delete),
        )
        // Topics within a course (append-ordered)
        .route(
            "/api/courses/:course_id/topics",
            get(topics::list).post(topics::create),
        )
        .route(
            "/api/topics/:topic_id",
            get(topics::get).put(topics::update).delete(topics::delete),
        )
}

fn content_routes() -> Router {
    Router::new()
        // Lessons within a topic
        .route(
            "/api/topics/:topic_id/lessons",
            get(lessons::list).post(lessons::create),
        )
        .route(
            "/api/lessons/:lesson_id",
            get(lessons::get).put(lessons::update).delete(lessons::delete),
        )
        // Pages within a lesson track
        .route(
            "/api/lessons/:lesson_id/pages",
            get(pages::list).post(pages::create),
        )
        .route("/api/lessons/:lesson_id/pages/order", axum::routing::patch(pages::reorder))
        .route(
            "/api/pages/:page_id",
            get(pages::get).put(pages::update).delete(pages::delete),
        )
        // Blocks within a page
        .route(
            "/api/pages/:page_id/blocks",
            get(blocks::list).post(blocks::create),
        )
        .route("/api/pages/:page_id/blocks/order", axum::routing::patch(blocks::reorder))
        .route(
            "/api/blocks/:block_id",
            get(blocks::get).put(blocks::update).delete(blocks::delete),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Edu API (Rust)",
            "version": version,
            "description": "Education content management API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "courses": "/api/courses[/:course] (protected)",
                "subjects": "/api/courses/:course/subjects, /api/subjects/:subject (protected)",
                "topics": "/api/courses/:course/topics, /api/topics/:topic (protected)",
                "lessons": "/api/topics/:topic/lessons, /api/lessons/:lesson (protected)",
                "pages": "/api/lessons/:lesson/pages[/order], /api/pages/:page (protected)",
                "blocks": "/api/pages/:page/blocks[/order], /api/blocks/:block (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
