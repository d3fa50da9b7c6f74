//! Handler tests for the Tasks domain
//!
//! These drive the task router end to end over the in-memory repository:
//! request deserialization, validation, status codes, and response bodies.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_tasks::{handlers, InMemoryTaskRepository, TaskService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = TaskService::new(InMemoryTaskRepository::new());
    handlers::router(service)
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_task(app: &Router, title: &str) -> Value {
    let response = app
        .clone()
        .oneshot(post_json("/", json!({"title": title})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_task_returns_pending_task() {
    let app = app();

    let response = app
        .oneshot(post_json(
            "/",
            json!({"title": "Buy milk", "description": "2%"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let task = json_body(response.into_body()).await;
    assert!(task["id"].is_i64());
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["description"], "2%");
    assert_eq!(task["taskStatus"], "PENDING");
    assert!(task["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_task_rejects_short_title_with_field_error() {
    let app = app();

    let response = app
        .oneshot(post_json("/", json!({"title": "AB"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert!(body.get("title").is_some());
}

#[tokio::test]
async fn test_create_task_title_length_boundaries() {
    let app = app();

    for (len, expected) in [(2, StatusCode::BAD_REQUEST), (3, StatusCode::OK), (75, StatusCode::OK), (76, StatusCode::BAD_REQUEST)] {
        let response = app
            .clone()
            .oneshot(post_json("/", json!({"title": "A".repeat(len)})))
            .await
            .unwrap();
        assert_eq!(response.status(), expected, "title length {}", len);
    }
}

#[tokio::test]
async fn test_create_task_description_length_boundaries() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/",
            json!({"title": "Valid", "description": "d".repeat(300)}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json(
            "/",
            json!({"title": "Valid", "description": "d".repeat(301)}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert!(body.get("description").is_some());

    // Absent and empty descriptions are both accepted
    let response = app
        .clone()
        .oneshot(post_json("/", json!({"title": "Valid"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json("/", json!({"title": "Valid", "description": ""})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_task_rejects_blank_title() {
    let app = app();

    let response = app
        .oneshot(post_json("/", json!({"title": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert!(body.get("title").is_some());
}

#[tokio::test]
async fn test_create_task_rejects_missing_title() {
    let app = app();

    let response = app
        .oneshot(post_json("/", json!({"description": "no title"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_task_rejects_malformed_json() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{ \"title\": \"Test\", \"description\": }"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_task_missing_returns_404_with_id_in_error() {
    let app = app();

    let response = app.oneshot(get("/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response.into_body()).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("999"));
}

#[tokio::test]
async fn test_get_task_with_non_integer_id_returns_400() {
    let app = app();

    let response = app.oneshot(get("/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_tasks_starts_empty() {
    let app = app();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_tasks_by_status_partitions_tasks() {
    let app = app();

    let pending = create_task(&app, "Stay pending").await;
    let completed = create_task(&app, "Get completed").await;

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/{}/status?taskStatus=COMPLETED", completed["id"]),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/status/PENDING")).await.unwrap();
    let pending_tasks = json_body(response.into_body()).await;
    assert_eq!(pending_tasks.as_array().unwrap().len(), 1);
    assert_eq!(pending_tasks[0]["id"], pending["id"]);

    let response = app.clone().oneshot(get("/status/COMPLETED")).await.unwrap();
    let completed_tasks = json_body(response.into_body()).await;
    assert_eq!(completed_tasks.as_array().unwrap().len(), 1);
    assert_eq!(completed_tasks[0]["id"], completed["id"]);
}

#[tokio::test]
async fn test_list_tasks_by_unknown_status_returns_400() {
    let app = app();

    let response = app.oneshot(get("/status/BOGUS")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("BOGUS"));
}

#[tokio::test]
async fn test_update_task_missing_returns_404() {
    let app = app();

    let response = app
        .oneshot(put_json("/999", json!({"title": "New title"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_task_validates_body() {
    let app = app();
    let task = create_task(&app, "Valid title").await;

    let response = app
        .oneshot(put_json(&format!("/{}", task["id"]), json!({"title": "AB"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_status_missing_returns_404() {
    let app = app();

    let response = app
        .oneshot(put_json("/999/status?taskStatus=COMPLETED", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_status_with_unknown_value_returns_400() {
    let app = app();
    let task = create_task(&app, "Valid title").await;

    let response = app
        .oneshot(put_json(
            &format!("/{}/status?taskStatus=DONE", task["id"]),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_task_missing_returns_404() {
    let app = app();

    let request = Request::builder()
        .method("DELETE")
        .uri("/999")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_crud_flow() {
    let app = app();

    // Create
    let response = app
        .clone()
        .oneshot(post_json(
            "/",
            json!({"title": "Buy milk", "description": "2%"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = json_body(response.into_body()).await;
    assert_eq!(created["taskStatus"], "PENDING");
    let id = created["id"].as_i64().unwrap();
    let created_at = created["createdAt"].clone();

    // Read back
    let response = app.clone().oneshot(get(&format!("/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_body(response.into_body()).await;
    assert_eq!(fetched["title"], "Buy milk");

    // Listed among all tasks
    let response = app.clone().oneshot(get("/")).await.unwrap();
    let all = json_body(response.into_body()).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    // Update title; status and creation timestamp must not move
    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/{}", id),
            json!({"title": "Buy oat milk"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response.into_body()).await;
    assert_eq!(updated["title"], "Buy oat milk");
    assert_eq!(updated["taskStatus"], "PENDING");
    assert_eq!(updated["createdAt"], created_at);

    // Complete it
    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/{}/status?taskStatus=COMPLETED", id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let completed = json_body(response.into_body()).await;
    assert_eq!(completed["taskStatus"], "COMPLETED");
    assert_eq!(completed["title"], "Buy oat milk");

    // Delete
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone
    let response = app.oneshot(get(&format!("/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
