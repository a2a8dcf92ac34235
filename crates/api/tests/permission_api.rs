//! HTTP-level integration tests for the `/permissions` endpoints and `/health`.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_named, delete, get, post_json, put_empty, put_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_permission_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/permissions",
        serde_json::json!({"name": " Users:Read "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "users:read");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_duplicate_permission_returns_409(pool: PgPool) {
    create_named(&pool, "/permissions", "users:read").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/permissions/",
        serde_json::json!({"name": "USERS:READ"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_permission_without_name_returns_400_json(pool: PgPool) {
    for body in [serde_json::json!({"title": "x"}), serde_json::json!({"name": 7})] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/permissions", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body={body}");

        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json["error"].as_str().is_some_and(|m| !m.is_empty()));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_permissions_with_filter(pool: PgPool) {
    for name in ["posts:read", "posts:write", "users:read"] {
        create_named(&pool, "/permissions", name).await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/permissions?page=1&limit=10&name=Posts").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["total_pages"], 1);
    let names: Vec<&str> = json["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["posts:write", "posts:read"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_permissions_accepts_large_limit(pool: PgPool) {
    create_named(&pool, "/permissions", "posts:read").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/permissions?page=1&limit=500").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["limit"], 500);
    assert_eq!(json["total_pages"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unparseable_query_returns_400_json(pool: PgPool) {
    for uri in ["/permissions?limit=5", "/permissions?page=abc&limit=5"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri={uri}");
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST", "uri={uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_keeps_name(pool: PgPool) {
    let id = create_named(&pool, "/permissions", "posts:read").await;

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/permissions/{id}"), serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "posts:read");
    assert_ne!(json["updated_at"], json["created_at"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_permission_with_blank_name_returns_400(pool: PgPool) {
    let id = create_named(&pool, "/permissions", "posts:read").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/permissions/{id}"),
        serde_json::json!({"name": "  "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_permission(pool: PgPool) {
    let id = create_named(&pool, "/permissions", "posts:read").await;

    let app = common::build_test_app(pool.clone());
    assert_eq!(
        delete(app, &format!("/permissions/{id}")).await.status(),
        StatusCode::NO_CONTENT
    );

    let app = common::build_test_app(pool);
    assert_eq!(
        delete(app, &format!("/permissions/{id}")).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_granted_permission_returns_400(pool: PgPool) {
    let role_id = create_named(&pool, "/roles", "admin").await;
    let id = create_named(&pool, "/permissions", "users:delete").await;

    let app = common::build_test_app(pool.clone());
    let response = put_empty(app, &format!("/roles/{role_id}/permissions/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/permissions/{id}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "IN_USE");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/permissions/{id}/roles")).await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], role_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_roles_of_unknown_permission_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/permissions/424242/roles").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_database_ok(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "ok");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/permissions").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
