mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn products_require_a_bearer_token() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/products", server.base_url);

    let res = client.get(&url).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client.get(&url).bearer_auth(common::token()).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn created_product_is_listed_over_http() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let token = common::token();

    let res = client
        .post(format!("{}/api/products", server.base_url))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "name": "Desk Lamp", "price": "24.50" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let created = res.json::<Value>().await?;
    let id = created["payload"]["id"].as_i64().expect("numeric id");

    let res = client
        .get(format!("{}/api/products/{}", server.base_url, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["name"], "Desk Lamp");
    Ok(())
}
