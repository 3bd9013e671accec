//! End-to-end checks of the assembled application: middleware stack, docs
//! and, when `PRODUCTS_TEST_DSN` points at a disposable `PostgreSQL`
//! database, the SQL-backed store.

use anyhow::Result;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        HeaderValue, Method, Request, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE, ORIGIN},
    },
};
use products::{
    api,
    db::{self, Connectivity, PoolConfig},
    store::{Direction, MemoryProductStore, Ordering, ProductValues, SortField},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const FRONTEND: &str = "http://localhost:5173";

fn app_with_frontend() -> Router {
    api::app(
        Arc::new(MemoryProductStore::new()),
        Some(HeaderValue::from_static(FRONTEND)),
    )
}

async fn json_body(response: axum::response::Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn requests_without_origin_pass() -> Result<()> {
    let response = app_with_frontend()
        .oneshot(Request::get("/api/products").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await?, json!({"data": []}));
    Ok(())
}

#[tokio::test]
async fn configured_origin_is_allowed() -> Result<()> {
    let response = app_with_frontend()
        .oneshot(
            Request::get("/api/products")
                .header(ORIGIN, FRONTEND)
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static(FRONTEND))
    );
    Ok(())
}

#[tokio::test]
async fn preflight_from_configured_origin() -> Result<()> {
    let response = app_with_frontend()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/products/1")
                .header(ORIGIN, FRONTEND)
                .header(ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
                .body(Body::empty())?,
        )
        .await?;

    assert!(response.status().is_success());
    assert_eq!(
        response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static(FRONTEND))
    );
    Ok(())
}

#[tokio::test]
async fn foreign_origin_is_rejected() -> Result<()> {
    let response = app_with_frontend()
        .oneshot(
            Request::post("/api/products")
                .header(ORIGIN, "https://evil.example.com")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Monitor","price":300}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await?, json!({"error": "Error de CORS"}));
    Ok(())
}

#[tokio::test]
async fn any_origin_is_rejected_without_frontend() -> Result<()> {
    let app = api::app(Arc::new(MemoryProductStore::new()), None);
    let response = app
        .oneshot(
            Request::get("/api/products")
                .header(ORIGIN, FRONTEND)
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn request_id_is_generated_or_propagated() -> Result<()> {
    let app = app_with_frontend();

    let response = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty())?)
        .await?;
    let generated = response
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    assert!(generated.is_some_and(|id| id.len() == 26));

    let response = app
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "req-123")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(
        response.headers().get("x-request-id"),
        Some(&HeaderValue::from_static("req-123"))
    );
    Ok(())
}

#[tokio::test]
async fn docs_serve_the_openapi_document() -> Result<()> {
    let response = app_with_frontend()
        .oneshot(Request::get("/docs/openapi.json").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response).await?;
    assert!(doc["paths"]["/api/products"]["post"].is_object());
    assert!(doc["paths"]["/api/products/{id}"]["patch"].is_object());
    assert_eq!(doc["info"]["title"], json!("products"));
    Ok(())
}

#[tokio::test]
async fn unknown_routes_answer_404() -> Result<()> {
    let response = app_with_frontend()
        .oneshot(Request::get("/api/unknown").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

/// Runs against a real database only when `PRODUCTS_TEST_DSN` is set; the
/// table is truncated, so never point it at data you care about.
#[tokio::test]
async fn postgres_store_round_trip() -> Result<()> {
    let Ok(dsn) = std::env::var("PRODUCTS_TEST_DSN") else {
        return Ok(());
    };

    let opened = db::open(&dsn, &PoolConfig::default()).await?;
    assert_eq!(opened.connectivity, Connectivity::Connected);
    let store = opened.store;
    store.reset().await?;

    let mouse = store
        .create(ProductValues::new("Mouse".to_string(), 20.0))
        .await?;
    let monitor = store
        .create(ProductValues::new("Monitor".to_string(), 300.0))
        .await?;
    assert_eq!(mouse.id, 1);
    assert_eq!(monitor.id, 2);
    assert!(monitor.availability);

    let listed = store
        .find_all(Ordering::new(SortField::Price, Direction::Desc))
        .await?;
    let names: Vec<&str> = listed.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Monitor", "Mouse"]);

    let updated = store
        .update(
            mouse.id,
            ProductValues {
                availability: false,
                ..ProductValues::from(&mouse)
            },
        )
        .await?;
    assert!(updated.is_some_and(|p| !p.availability && p.created_at == mouse.created_at));

    assert!(store.delete(mouse.id).await?);
    assert!(!store.delete(mouse.id).await?);
    assert!(store.find_by_id(mouse.id).await?.is_none());
    assert!(store.update(mouse.id, ProductValues::from(&mouse)).await?.is_none());

    store.reset().await?;
    if let Some(pool) = opened.pool {
        pool.close().await;
    }
    Ok(())
}
