mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use common::{TestApp, TEST_SECRET};
use product_api::auth::{generate_jwt, Claims};

async fn assert_unauthenticated(app: &TestApp, method: Method, uri: &str, token: Option<&str>) -> Result<()> {
    let (status, text) = app.send_with_auth(method, uri, None, token).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "{} was not rejected", uri);
    let body: Value = serde_json::from_str(&text)?;
    assert_eq!(body, json!({ "message": "Unauthenticated." }));
    Ok(())
}

#[tokio::test]
async fn missing_token_is_rejected_on_every_route() -> Result<()> {
    let (app, _) = TestApp::new();

    assert_unauthenticated(&app, Method::GET, "/api/products", None).await?;
    assert_unauthenticated(&app, Method::POST, "/api/products", None).await?;
    assert_unauthenticated(&app, Method::GET, "/api/products/1", None).await?;
    assert_unauthenticated(&app, Method::PUT, "/api/products/1", None).await?;
    assert_unauthenticated(&app, Method::DELETE, "/api/products/1", None).await?;
    assert_unauthenticated(&app, Method::GET, "/api/user", None).await?;
    Ok(())
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() -> Result<()> {
    let (app, _) = TestApp::new();
    let token = generate_jwt(&Claims::new(Uuid::new_v4(), "intruder", 1), "some-other-secret")?;

    assert_unauthenticated(&app, Method::GET, "/api/products", Some(&token)).await
}

#[tokio::test]
async fn expired_token_is_rejected() -> Result<()> {
    let (app, _) = TestApp::new();
    let mut claims = Claims::new(Uuid::new_v4(), "tester", 1);
    claims.iat = (Utc::now() - Duration::hours(3)).timestamp();
    claims.exp = (Utc::now() - Duration::hours(2)).timestamp();
    let token = generate_jwt(&claims, TEST_SECRET)?;

    assert_unauthenticated(&app, Method::GET, "/api/products", Some(&token)).await
}

#[tokio::test]
async fn garbage_token_is_rejected() -> Result<()> {
    let (app, _) = TestApp::new();

    assert_unauthenticated(&app, Method::GET, "/api/products", Some("not.a.jwt")).await
}

#[tokio::test]
async fn rejected_request_does_not_touch_the_store() -> Result<()> {
    let (app, store) = TestApp::new();

    let (status, _) = app
        .send_with_auth(
            Method::POST,
            "/api/products",
            Some(json!({ "name": "Sneaky", "price": "1.00" })),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn public_routes_need_no_token() -> Result<()> {
    let (app, _) = TestApp::new();

    let (status, text) = app.send_with_auth(Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&text)?;
    assert_eq!(body["name"], "Product API");

    let (status, _) = app.send_with_auth(Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
