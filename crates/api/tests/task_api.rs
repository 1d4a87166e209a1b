//! Integration tests for the `/api/tasks` resource.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use common::{body_json, delete, get, patch_json, post_json, put_json, send_raw};
use serde_json::{json, Value};

async fn create_category(app: &Router, name: &str) -> i64 {
    let json = body_json(post_json(app.clone(), "/api/categories", json!({ "name": name })).await).await;
    json["id"].as_i64().unwrap()
}

async fn create_task(app: &Router, body: Value) -> Value {
    let response = post_json(app.clone(), "/api/tasks", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

fn ids(json: &Value) -> Vec<i64> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_applies_defaults() {
    let app = common::build_test_app();
    let task = create_task(&app, json!({ "title": "Write report" })).await;

    assert_eq!(task["title"], "Write report");
    assert_eq!(task["priority"], "MEDIUM");
    assert_eq!(task["status"], "PENDING");
    assert_eq!(task["category"], Value::Null);
    assert_eq!(task["categoryId"], Value::Null);
    assert_eq!(task["completedAt"], Value::Null);
    assert!(task["createdAt"].is_string());
    assert_eq!(task["createdAt"], task["updatedAt"]);
}

#[tokio::test]
async fn create_resolves_category() {
    let app = common::build_test_app();
    let category_id = create_category(&app, "Work").await;

    let task = create_task(
        &app,
        json!({ "title": "Report", "priority": "HIGH", "category": { "id": category_id } }),
    )
    .await;
    assert_eq!(task["priority"], "HIGH");
    assert_eq!(task["categoryId"], category_id);
    assert_eq!(task["category"]["name"], "Work");
}

#[tokio::test]
async fn create_with_unknown_category_returns_400_and_persists_nothing() {
    let app = common::build_test_app();
    let response = post_json(
        app.clone(),
        "/api/tasks",
        json!({ "title": "Orphan", "category": { "id": 999 } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Category not found with id: 999");

    let list = body_json(get(app, "/api/tasks").await).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_with_blank_title_returns_400() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/tasks", json!({ "title": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_overlong_description_returns_400() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/tasks",
        json!({ "title": "Long", "description": "x".repeat(2001) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_accepts_due_date_with_and_without_offset() {
    let app = common::build_test_app();

    let local = create_task(&app, json!({ "title": "local", "dueDate": "2024-12-31T23:59:59" })).await;
    let utc = create_task(&app, json!({ "title": "utc", "dueDate": "2024-12-31T23:59:59Z" })).await;

    assert!(local["dueDate"].is_string());
    assert_eq!(local["dueDate"], utc["dueDate"]);
}

#[tokio::test]
async fn update_accepts_local_due_date() {
    let app = common::build_test_app();
    let task = create_task(&app, json!({ "title": "t" })).await;
    let uri = format!("/api/tasks/{}", task["id"]);

    let response = put_json(app.clone(), &uri, json!({ "dueDate": "2030-06-01T09:30:00" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let local = body_json(response).await;

    let response = put_json(app, &uri, json!({ "dueDate": "2030-06-01T09:30:00+00:00" })).await;
    assert_eq!(body_json(response).await["dueDate"], local["dueDate"]);
}

#[tokio::test]
async fn create_with_unparseable_due_date_returns_400() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/tasks", json!({ "title": "t", "dueDate": "next week" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_unknown_priority_returns_400() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/tasks",
        json!({ "title": "Odd", "priority": "CRITICAL" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_missing_task_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/tasks/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Task not found with id: 999");
}

#[tokio::test]
async fn filters_by_status_priority_and_category() {
    let app = common::build_test_app();
    let work = create_category(&app, "Work").await;
    let a = create_task(&app, json!({ "title": "a", "priority": "HIGH", "category": { "id": work } })).await;
    let b = create_task(&app, json!({ "title": "b", "status": "IN_PROGRESS" })).await;
    let c = create_task(&app, json!({ "title": "c", "priority": "HIGH", "status": "IN_PROGRESS" })).await;

    let json = body_json(get(app.clone(), "/api/tasks/status/IN_PROGRESS").await).await;
    assert_eq!(ids(&json), vec![b["id"].as_i64().unwrap(), c["id"].as_i64().unwrap()]);

    let json = body_json(get(app.clone(), "/api/tasks/priority/HIGH").await).await;
    assert_eq!(ids(&json), vec![a["id"].as_i64().unwrap(), c["id"].as_i64().unwrap()]);

    let json = body_json(get(app.clone(), &format!("/api/tasks/category/{work}")).await).await;
    assert_eq!(ids(&json), vec![a["id"].as_i64().unwrap()]);
    assert_eq!(json[0]["category"]["name"], "Work");

    let json = body_json(get(app, "/api/tasks/category/999").await).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_enum_path_segment_returns_400() {
    let app = common::build_test_app();

    let response = get(app.clone(), "/api/tasks/status/DONE").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("DONE"));

    let response = get(app, "/api/tasks/priority/low").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overdue_excludes_completed_and_future_tasks() {
    let app = common::build_test_app();
    let past = (Utc::now() - Duration::days(2)).to_rfc3339();
    let future = (Utc::now() + Duration::days(2)).to_rfc3339();

    let late = create_task(&app, json!({ "title": "late", "dueDate": past })).await;
    create_task(&app, json!({ "title": "later", "dueDate": future })).await;
    create_task(&app, json!({ "title": "undated" })).await;
    let done = create_task(&app, json!({ "title": "done", "dueDate": past })).await;
    let done_id = done["id"].as_i64().unwrap();
    patch_json(app.clone(), &format!("/api/tasks/{done_id}/status"), json!("COMPLETED")).await;
    let cancelled = create_task(&app, json!({ "title": "dropped", "dueDate": past, "status": "CANCELLED" })).await;

    let json = body_json(get(app, "/api/tasks/overdue").await).await;
    assert_eq!(
        ids(&json),
        vec![late["id"].as_i64().unwrap(), cancelled["id"].as_i64().unwrap()]
    );
}

#[tokio::test]
async fn stats_count_each_status() {
    let app = common::build_test_app();
    create_task(&app, json!({ "title": "a" })).await;
    create_task(&app, json!({ "title": "b" })).await;
    create_task(&app, json!({ "title": "c", "status": "IN_PROGRESS" })).await;
    create_task(&app, json!({ "title": "d", "status": "CANCELLED" })).await;

    let response = get(app, "/api/tasks/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "pending": 2, "inProgress": 1, "completed": 0, "cancelled": 1 })
    );
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_merges_provided_fields_only() {
    let app = common::build_test_app();
    let task = create_task(
        &app,
        json!({ "title": "Draft", "description": "first", "priority": "LOW" }),
    )
    .await;
    let id = task["id"].as_i64().unwrap();

    let response = put_json(
        app,
        &format!("/api/tasks/{id}"),
        json!({ "title": "", "priority": "URGENT" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Draft");
    assert_eq!(json["description"], "first");
    assert_eq!(json["priority"], "URGENT");
    assert_eq!(json["createdAt"], task["createdAt"]);
}

#[tokio::test]
async fn update_assigns_and_clears_category() {
    let app = common::build_test_app();
    let work = create_category(&app, "Work").await;
    let task = create_task(&app, json!({ "title": "t" })).await;
    let uri = format!("/api/tasks/{}", task["id"]);

    let json = body_json(put_json(app.clone(), &uri, json!({ "category": { "id": work } })).await).await;
    assert_eq!(json["categoryId"], work);
    assert_eq!(json["category"]["name"], "Work");

    let json = body_json(put_json(app.clone(), &uri, json!({ "title": "kept" })).await).await;
    assert_eq!(json["categoryId"], work);

    let json = body_json(put_json(app, &uri, json!({ "category": { "id": null } })).await).await;
    assert_eq!(json["categoryId"], Value::Null);
    assert_eq!(json["category"], Value::Null);
}

#[tokio::test]
async fn update_with_unknown_category_returns_400() {
    let app = common::build_test_app();
    let task = create_task(&app, json!({ "title": "t" })).await;
    let response = put_json(
        app,
        &format!("/api/tasks/{}", task["id"]),
        json!({ "category": { "id": 999 } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_missing_task_with_overlong_description_returns_404() {
    let app = common::build_test_app();
    let response = put_json(
        app,
        "/api/tasks/999",
        json!({ "description": "x".repeat(2001) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_missing_task_returns_404() {
    let app = common::build_test_app();
    let response = put_json(app, "/api/tasks/999", json!({ "title": "x" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn completing_via_update_stamps_completed_at_once() {
    let app = common::build_test_app();
    let task = create_task(&app, json!({ "title": "t" })).await;
    let uri = format!("/api/tasks/{}", task["id"]);

    let first = body_json(put_json(app.clone(), &uri, json!({ "status": "COMPLETED" })).await).await;
    let stamped = first["completedAt"].clone();
    assert!(stamped.is_string());

    let reopened = body_json(put_json(app.clone(), &uri, json!({ "status": "IN_PROGRESS" })).await).await;
    assert_eq!(reopened["completedAt"], stamped);

    let again = body_json(put_json(app, &uri, json!({ "status": "COMPLETED" })).await).await;
    assert_eq!(again["completedAt"], stamped);
}

// ---------------------------------------------------------------------------
// Status patch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_status_accepts_bare_and_wrapped_bodies() {
    let app = common::build_test_app();
    let task = create_task(&app, json!({ "title": "t" })).await;
    let uri = format!("/api/tasks/{}/status", task["id"]);

    let response = patch_json(app.clone(), &uri, json!("IN_PROGRESS")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "IN_PROGRESS");

    let response = patch_json(app, &uri, json!({ "status": "COMPLETED" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "COMPLETED");
    assert!(json["completedAt"].is_string());
}

#[tokio::test]
async fn patch_status_without_body_returns_400() {
    let app = common::build_test_app();
    let task = create_task(&app, json!({ "title": "t" })).await;
    let response = send_raw(
        app,
        Method::PATCH,
        &format!("/api/tasks/{}/status", task["id"]),
        "",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Status is required");
}

#[tokio::test]
async fn patch_status_unknown_value_returns_400() {
    let app = common::build_test_app();
    let task = create_task(&app, json!({ "title": "t" })).await;
    let response = patch_json(
        app,
        &format!("/api/tasks/{}/status", task["id"]),
        json!("FINISHED"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_status_missing_task_returns_404() {
    let app = common::build_test_app();
    let response = patch_json(app, "/api/tasks/999/status", json!("COMPLETED")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Task not found with id: 999"
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_task_returns_204_then_404() {
    let app = common::build_test_app();
    let task = create_task(&app, json!({ "title": "t" })).await;
    let uri = format!("/api/tasks/{}", task["id"]);

    let response = delete(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_task_frees_its_category() {
    let app = common::build_test_app();
    let work = create_category(&app, "Work").await;
    let task = create_task(&app, json!({ "title": "t", "category": { "id": work } })).await;

    delete(app.clone(), &format!("/api/tasks/{}", task["id"])).await;
    let response = delete(app, &format!("/api/categories/{work}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
