#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use product_api::auth::{generate_jwt, Claims};
use product_api::config::AppConfig;
use product_api::database::{MemoryProductStore, ProductStore};
use product_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn token() -> String {
    generate_jwt(&Claims::new(Uuid::new_v4(), "tester", 1), TEST_SECRET).expect("token")
}

/// In-process router over a chosen store, driven with `oneshot`
pub struct TestApp {
    router: Router,
    token: String,
}

impl TestApp {
    pub fn new() -> (Self, Arc<MemoryProductStore>) {
        let store = Arc::new(MemoryProductStore::new());
        (Self::with_store(store.clone()), store)
    }

    pub fn with_store(store: Arc<dyn ProductStore>) -> Self {
        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;
        config.security.jwt_secret = TEST_SECRET.to_string();

        let state = AppState::new(store, TEST_SECRET);
        Self {
            router: app(state, &config),
            token: token(),
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, String)> {
        self.send_with_auth(method, uri, body, Some(&self.token)).await
    }

    pub async fn send_with_auth(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<(StatusCode, String)> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, String::from_utf8(bytes.to_vec())?))
    }

    /// Like `send`, but parses the body as JSON
    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
        let (status, text) = self.send(method, uri, body).await?;
        let value = serde_json::from_str(&text).with_context(|| format!("body was not JSON: {:?}", text))?;
        Ok((status, value))
    }
}

/// The built server binary on a free port with the memory store; killed on drop
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_product-api"));
        cmd.env("APP_ENV", "development")
            .env("STORE_BACKEND", "memory")
            .env("JWT_SECRET", TEST_SECRET)
            .env("PRODUCTS_API_HOST", "127.0.0.1")
            .env("PRODUCTS_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(15)).await?;
    Ok(server)
}
