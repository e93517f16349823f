use std::net::SocketAddr;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use service::TodoStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app: Router = routes::build_router(TodoStore::new(), CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_full_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Create with surrounding whitespace
    let res = c
        .post(format!("{}/todos", app.base_url))
        .json(&json!({"title": " Buy milk "}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"id": 1, "title": "Buy milk", "completed": false}));

    // Mark it done
    let res = c
        .put(format!("{}/todos/1", app.base_url))
        .json(&json!({"completed": true}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"id": 1, "title": "Buy milk", "completed": true}));

    // List reflects the update
    let res = c.get(format!("{}/todos", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!([{"id": 1, "title": "Buy milk", "completed": true}]));

    // Delete and verify empty
    let res = c.delete(format!("{}/todos/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let res = c.get(format!("{}/todos", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_failed_create_does_not_consume_id() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/todos", app.base_url))
        .json(&json!({"title": ""}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"error": "title is required"}));

    let res = c
        .post(format!("{}/todos", app.base_url))
        .json(&json!({"title": "A"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["id"], 1);
    Ok(())
}

#[tokio::test]
async fn e2e_create_without_body_is_validation_error() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().post(format!("{}/todos", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"error": "title is required"}));
    Ok(())
}

#[tokio::test]
async fn e2e_update_unknown_id_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .put(format!("{}/todos/99", app.base_url))
        .json(&json!({"completed": true}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"error": "todo not found"}));
    Ok(())
}

#[tokio::test]
async fn e2e_update_blank_title_rejected_without_side_effects() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    c.post(format!("{}/todos", app.base_url))
        .json(&json!({"title": "Buy milk"}))
        .send()
        .await?;

    let res = c
        .put(format!("{}/todos/1", app.base_url))
        .json(&json!({"title": "   ", "completed": true}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"error": "title cannot be empty"}));

    // The completed flag from the rejected request was not applied either.
    let res = c.get(format!("{}/todos", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!([{"id": 1, "title": "Buy milk", "completed": false}]));
    Ok(())
}

#[tokio::test]
async fn e2e_delete_is_idempotent_in_status_only() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    c.post(format!("{}/todos", app.base_url))
        .json(&json!({"title": "once"}))
        .send()
        .await?;

    let res = c.delete(format!("{}/todos/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.delete(format!("{}/todos/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"error": "todo not found"}));
    Ok(())
}
