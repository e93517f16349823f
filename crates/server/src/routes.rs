use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, Todo};
use service::TodoStore;

use crate::errors::ApiError;
use crate::payload;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn list_todos(State(store): State<TodoStore>) -> Json<Vec<Todo>> {
    Json(store.list().await)
}

async fn create_todo(
    State(store): State<TodoStore>,
    body: Option<Json<serde_json::Value>>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let title = payload::create_title(body.as_deref());
    let todo = store.create(&title).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(store): State<TodoStore>,
    Path(id): Path<u64>,
    body: Option<Json<serde_json::Value>>,
) -> Result<Json<Todo>, ApiError> {
    let update = payload::update_record(body.as_deref());
    let todo = store.update(id, update).await?;
    Ok(Json(todo))
}

async fn delete_todo(
    State(store): State<TodoStore>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build the full application router: health check plus the todo collection.
pub fn build_router(store: TodoStore, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/:id", put(update_todo).delete(delete_todo))
        .with_state(store)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
