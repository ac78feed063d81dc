//! Integration tests for task CRUD, status updates, and counts.

mod common;

use axum::http::StatusCode;
use common::TestServer;
use serde_json::json;

// Helper to make JSON requests (duplicated for test isolation)
async fn json_request(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let mut builder = Request::builder().method(method).uri(uri);

    let body = match body {
        Some(v) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let request = builder.body(body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_json: serde_json::Value = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, body_json)
}

async fn create_task(
    server: &TestServer,
    list_id: i64,
    title: &str,
    status: Option<&str>,
) -> serde_json::Value {
    let mut body = json!({"title": title, "taskListId": list_id});
    if let Some(s) = status {
        body["status"] = json!(s);
    }
    let (code, body) = json_request(&server.router, "POST", "/api/tasks", Some(body)).await;
    assert_eq!(code, StatusCode::CREATED, "create failed: {body}");
    body
}

#[tokio::test]
async fn create_defaults_to_pending() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    let task = create_task(&server, list_id, "Buy milk", None).await;
    assert_eq!(task["status"], "Pending");
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["taskListId"], list_id);
    assert!(task["description"].is_null());
}

#[tokio::test]
async fn create_accepts_string_and_numeric_status() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    let task = create_task(&server, list_id, "By name", Some("InProgress")).await;
    assert_eq!(task["status"], "InProgress");

    let (code, task) = json_request(
        &server.router,
        "POST",
        "/api/tasks",
        Some(json!({"title": "By code", "taskListId": list_id, "status": 2})),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED);
    assert_eq!(task["status"], "Completed");
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    // Blank title
    let (status, _) = json_request(
        &server.router,
        "POST",
        "/api/tasks",
        Some(json!({"title": "  ", "taskListId": list_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing list id
    let (status, _) = json_request(
        &server.router,
        "POST",
        "/api/tasks",
        Some(json!({"title": "No list"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nonexistent list
    let (status, _) = json_request(
        &server.router,
        "POST",
        "/api/tasks",
        Some(json!({"title": "Ghost list", "taskListId": 9999})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown status value
    let (status, _) = json_request(
        &server.router,
        "POST",
        "/api/tasks",
        Some(json!({"title": "Bad status", "taskListId": list_id, "status": "Done"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_title_on_create_is_bad_request() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    create_task(&server, list_id, "Buy milk", None).await;

    // Creation reports the collision as 400, unlike updates which use 409.
    let (status, body) = json_request(
        &server.router,
        "POST",
        "/api/tasks",
        Some(json!({"title": "Buy milk", "taskListId": list_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Buy milk"));
}

#[tokio::test]
async fn duplicate_title_allowed_in_other_list() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    let (_, other) = json_request(
        &server.router,
        "POST",
        "/api/tasklists",
        Some(json!({"name": "Other"})),
    )
    .await;
    let other_id = other["id"].as_i64().unwrap();

    create_task(&server, list_id, "Buy milk", None).await;
    create_task(&server, other_id, "Buy milk", None).await;
}

#[tokio::test]
async fn title_and_description_limits_count_characters() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    // Multibyte input within the character limits must be accepted even
    // though its byte length exceeds them.
    let (status, body) = json_request(
        &server.router,
        "POST",
        "/api/tasks",
        Some(json!({
            "title": "買い物".repeat(60),
            "description": "ü".repeat(800),
            "taskListId": list_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, _) = json_request(
        &server.router,
        "POST",
        "/api/tasks",
        Some(json!({"title": "é".repeat(201), "taskListId": list_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = json_request(
        &server.router,
        "POST",
        "/api/tasks",
        Some(json!({
            "title": "Long description",
            "description": "é".repeat(1001),
            "taskListId": list_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tasks_are_listed_newest_first() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    for title in ["first", "second", "third"] {
        create_task(&server, list_id, title, None).await;
    }

    let (_, body) = json_request(&server.router, "GET", "/api/tasks", None).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn list_filters_by_task_list() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    let (_, other) = json_request(
        &server.router,
        "POST",
        "/api/tasklists",
        Some(json!({"name": "Other"})),
    )
    .await;
    let other_id = other["id"].as_i64().unwrap();

    create_task(&server, list_id, "Here", None).await;
    create_task(&server, other_id, "There", None).await;

    let (_, all) = json_request(&server.router, "GET", "/api/tasks", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, filtered) = json_request(
        &server.router,
        "GET",
        &format!("/api/tasks?taskListId={other_id}"),
        None,
    )
    .await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["title"], "There");
}

#[tokio::test]
async fn update_changes_all_fields() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    let task = create_task(&server, list_id, "Draft", None).await;
    let id = task["id"].as_i64().unwrap();

    let (status, body) = json_request(
        &server.router,
        "PUT",
        &format!("/api/tasks/{id}"),
        Some(json!({"title": "Final", "description": "polished", "status": "Completed"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Final");
    assert_eq!(body["description"], "polished");
    assert_eq!(body["status"], "Completed");

    let (_, fetched) =
        json_request(&server.router, "GET", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(fetched["title"], "Final");
    assert_eq!(fetched["status"], "Completed");
}

#[tokio::test]
async fn update_to_taken_title_conflicts() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    create_task(&server, list_id, "Taken", None).await;
    let task = create_task(&server, list_id, "Mine", None).await;
    let id = task["id"].as_i64().unwrap();

    let (status, _) = json_request(
        &server.router,
        "PUT",
        &format!("/api/tasks/{id}"),
        Some(json!({"title": "Taken", "status": "Pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Keeping its own title is not a collision.
    let (status, _) = json_request(
        &server.router,
        "PUT",
        &format!("/api/tasks/{id}"),
        Some(json!({"title": "Mine", "status": "InProgress"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn update_missing_task_returns_not_found() {
    let server = TestServer::new().await;

    let (status, _) = json_request(
        &server.router,
        "PUT",
        "/api/tasks/9999",
        Some(json!({"title": "Ghost", "status": "Pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_patch_is_idempotent() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    let task = create_task(&server, list_id, "Flip", None).await;
    let id = task["id"].as_i64().unwrap();

    for _ in 0..2 {
        let (status, _) = json_request(
            &server.router,
            "PATCH",
            &format!("/api/tasks/{id}/status"),
            Some(json!({"status": "Completed"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (_, fetched) =
        json_request(&server.router, "GET", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(fetched["status"], "Completed");
}

#[tokio::test]
async fn status_patch_accepts_numeric_code() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    let task = create_task(&server, list_id, "Numeric", None).await;
    let id = task["id"].as_i64().unwrap();

    let (status, _) = json_request(
        &server.router,
        "PATCH",
        &format!("/api/tasks/{id}/status"),
        Some(json!({"status": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, fetched) =
        json_request(&server.router, "GET", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(fetched["status"], "InProgress");
}

#[tokio::test]
async fn status_patch_missing_task_returns_not_found() {
    let server = TestServer::new().await;

    let (status, _) = json_request(
        &server.router,
        "PATCH",
        "/api/tasks/9999/status",
        Some(json!({"status": "Completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_get_returns_not_found() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    let task = create_task(&server, list_id, "Doomed", None).await;
    let id = task["id"].as_i64().unwrap();

    let (status, _) =
        json_request(&server.router, "DELETE", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = json_request(&server.router, "GET", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        json_request(&server.router, "DELETE", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn counts_partition_tasks_by_status() {
    let server = TestServer::new().await;
    let list_id = server.default_list_id().await;

    create_task(&server, list_id, "a", None).await;
    create_task(&server, list_id, "b", Some("Pending")).await;
    create_task(&server, list_id, "c", Some("InProgress")).await;
    create_task(&server, list_id, "d", Some("Completed")).await;

    let (status, counts) = json_request(&server.router, "GET", "/api/tasks/counts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(counts["pending"], 2);
    assert_eq!(counts["inProgress"], 1);
    assert_eq!(counts["completed"], 1);

    let (_, filtered) = json_request(
        &server.router,
        "GET",
        &format!("/api/tasks/counts?taskListId={list_id}"),
        None,
    )
    .await;
    assert_eq!(filtered, counts);
}

#[tokio::test]
async fn counts_for_empty_list_are_zero() {
    let server = TestServer::new().await;

    let (status, counts) = json_request(&server.router, "GET", "/api/tasks/counts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(counts["pending"], 0);
    assert_eq!(counts["inProgress"], 0);
    assert_eq!(counts["completed"], 0);
}
