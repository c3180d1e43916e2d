//! HTTP integration tests for the taxonomy resources.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: full CRUD lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn regional_crud_lifecycle(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/v1/regionals",
        json!({ "name": "North" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert!(body_bytes(response).await.is_empty());

    let response = get(build_test_app(pool.clone()), "/v1/regionals").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([{ "id": 1, "name": "North" }]));

    let response = get(build_test_app(pool.clone()), "/v1/regionals/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "id": 1, "name": "North" }));

    let response = put_json(
        build_test_app(pool.clone()),
        "/v1/regionals/1",
        json!({ "name": "Northeast" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());

    let response = get(build_test_app(pool.clone()), "/v1/regionals/1").await;
    assert_eq!(body_json(response).await["name"], "Northeast");

    let response = delete(build_test_app(pool.clone()), "/v1/regionals/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(build_test_app(pool), "/v1/regionals/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

// ---------------------------------------------------------------------------
// Test: empty and unknown
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_taxonomy_lists_as_empty_array(pool: PgPool) {
    for path in [
        "/v1/regionals",
        "/v1/segments",
        "/v1/service-types",
        "/v1/admission-criteria",
        "/v1/attendance-types",
        "/v1/reference-ways",
    ] {
        let response = get(build_test_app(pool.clone()), path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert_eq!(body_json(response).await, json!([]), "{path}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_unknown_id_returns_404(pool: PgPool) {
    let response =
        put_json(build_test_app(pool), "/v1/segments/9", json!({ "name": "Adults" })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_twice_returns_404_the_second_time(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/v1/attendance-types",
        json!({ "name": "Open door" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let first = delete(build_test_app(pool.clone()), "/v1/attendance-types/1").await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = delete(build_test_app(pool), "/v1/attendance-types/1").await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn taxonomies_are_independent(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/v1/service-types",
        json!({ "name": "CAPS" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(build_test_app(pool.clone()), "/v1/service-types/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(build_test_app(pool), "/v1/admission-criteria/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
