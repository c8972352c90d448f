//! HTTP-level tests for the `/tasks` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json, seed_project, seed_task};
use serde_json::json;
use sqlx::SqlitePool;
use taskboard_core::roles::Role;

fn task(title: &str) -> serde_json::Value {
    json!({"title": title, "status": "pending", "priority": "medium"})
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_task_returns_joined_project_name(pool: SqlitePool) {
    let project_id = seed_project(&pool, "Website").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/tasks",
        Role::Contributor,
        json!({
            "title": "Write copy",
            "desc": "Landing page",
            "status": "in_progress",
            "priority": "high",
            "dueDate": "2024-05-01",
            "projectId": project_id,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Write copy");
    assert_eq!(json["desc"], "Landing page");
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["priority"], "high");
    assert_eq!(json["dueDate"], "2024-05-01");
    assert_eq!(json["projectId"], project_id);
    assert_eq!(json["projectName"], "Website");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_task_missing_required_field_is_rejected(pool: SqlitePool) {
    for body in [
        json!({"status": "pending", "priority": "low"}),
        json!({"title": "t", "priority": "low"}),
        json!({"title": "t", "status": "pending"}),
        json!({"title": "   ", "status": "pending", "priority": "low"}),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/tasks", Role::Admin, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let app = common::build_test_app(pool);
    let list = body_json(get(app, "/tasks", Role::Admin).await).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_status_or_priority_is_rejected(pool: SqlitePool) {
    for body in [
        json!({"title": "t", "status": "archived", "priority": "low"}),
        json!({"title": "t", "status": "pending", "priority": "urgent"}),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/tasks", Role::Contributor, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn task_for_missing_project_is_rejected(pool: SqlitePool) {
    let mut body = task("Dangling");
    body["projectId"] = json!(4242);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/tasks", Role::Contributor, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Referenced project does not exist");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_by_project_id(pool: SqlitePool) {
    let a = seed_project(&pool, "A").await;
    let b = seed_project(&pool, "B").await;
    for (title, project) in [("a1", a), ("b1", b), ("a2", a)] {
        let mut body = task(title);
        body["projectId"] = json!(project);
        seed_task(&pool, body).await;
    }
    seed_task(&pool, task("loose")).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/tasks?projectId={a}"), Role::Contributor).await).await;
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["a1", "a2"]);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/tasks?projectId=", Role::Contributor).await).await;
    assert_eq!(json.as_array().unwrap().len(), 4);

    let app = common::build_test_app(pool);
    let response = get(app, "/tasks?projectId=abc", Role::Contributor).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn status_only_update_leaves_other_fields(pool: SqlitePool) {
    let project_id = seed_project(&pool, "P").await;
    let id = seed_task(
        &pool,
        json!({
            "title": "Ship it",
            "status": "pending",
            "priority": "high",
            "dueDate": "2024-03-01",
            "projectId": project_id,
        }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/tasks/{id}"),
        Role::Contributor,
        json!({"status": "done"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/tasks/{id}"), Role::Contributor).await).await;
    assert_eq!(json["status"], "done");
    assert_eq!(json["title"], "Ship it");
    assert_eq!(json["priority"], "high");
    assert_eq!(json["dueDate"], "2024-03-01");
    assert_eq!(json["projectName"], "P");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn null_clears_project_and_due_date(pool: SqlitePool) {
    let project_id = seed_project(&pool, "P").await;
    let id = seed_task(
        &pool,
        json!({
            "title": "t1",
            "status": "pending",
            "priority": "low",
            "dueDate": "2024-01-01",
            "projectId": project_id,
        }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/tasks/{id}"),
        Role::Contributor,
        json!({"projectId": null, "dueDate": null, "title": "t2"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/tasks/{id}"), Role::Contributor).await).await;
    assert_eq!(json["title"], "t2");
    assert!(json["projectId"].is_null());
    assert!(json["projectName"].is_null());
    assert!(json["dueDate"].is_null());
    assert_eq!(json["status"], "pending");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_to_missing_project_is_rejected(pool: SqlitePool) {
    let project_id = seed_project(&pool, "P").await;
    let mut body = task("Anchored");
    body["projectId"] = json!(project_id);
    let id = seed_task(&pool, body).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/tasks/{id}"),
        Role::Contributor,
        json!({"projectId": 4242}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Referenced project does not exist");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/tasks/{id}"), Role::Contributor).await).await;
    assert_eq!(json["projectId"], project_id);
    assert_eq!(json["projectName"], "P");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_of_unknown_task_is_acknowledged(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());
    let response = put_json(app, "/tasks/999", Role::Contributor, json!({"title": "x"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/tasks", Role::Contributor).await).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_update_is_rejected(pool: SqlitePool) {
    let id = seed_task(&pool, task("Unchanged")).await;

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/tasks/{id}"), Role::Contributor, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "At least one field to update is required"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_managers_delete_tasks(pool: SqlitePool) {
    let id = seed_task(&pool, task("Keep")).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/tasks/{id}"), Role::Contributor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/tasks/{id}"), Role::Manager).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/tasks/{id}"), Role::Manager).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again is still a success.
    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/tasks/{id}"), Role::Admin).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_due_date_is_rejected(pool: SqlitePool) {
    let mut body = task("Dated");
    body["dueDate"] = json!("2024-1-5");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/tasks", Role::Contributor, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
