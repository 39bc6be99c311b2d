use std::io::Read;

use anyhow::Context;
use clap::{Args, Subcommand};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::cli::utils::{output_error, output_success, print_product_text};
use crate::cli::OutputFormat;

#[derive(Args, Debug)]
pub struct RemoteArgs {
    #[arg(long, env = "PRODUCTS_API_URL", default_value = "http://localhost:3000", help = "Server base URL")]
    pub server: String,

    #[arg(long, env = "PRODUCTS_API_TOKEN", help = "Bearer token (see `products token`)")]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    #[command(about = "List every product")]
    List,

    #[command(about = "Show one product")]
    Get {
        #[arg(help = "Product ID")]
        id: String,
    },

    #[command(about = "Create a product from a JSON body on stdin")]
    Create,

    #[command(about = "Update a product from a JSON body on stdin")]
    Update {
        #[arg(help = "Product ID")]
        id: String,
    },

    #[command(about = "Delete a product")]
    Delete {
        #[arg(help = "Product ID")]
        id: String,
    },
}

/// How a response from the product endpoints reads to a client
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Success { message: Option<String>, data: Option<Value> },
    Failure { status: u16, message: String },
}

/// Classify a status/body pair. A 200 whose body is an array of strings is a
/// storage fault, not a listing.
pub fn interpret(status: u16, body: Option<Value>) -> Outcome {
    let message_of = |body: &Option<Value>| {
        body.as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    match (status, body) {
        (204, _) => Outcome::Success { message: Some("Product deleted".to_string()), data: None },
        (200, Some(Value::Array(items))) if items.first().map_or(false, Value::is_string) => Outcome::Failure {
            status,
            message: items.iter().filter_map(Value::as_str).collect::<Vec<_>>().join("; "),
        },
        (200..=299, body) => {
            let message = message_of(&body);
            let data = match body {
                Some(Value::Object(mut map)) if map.contains_key("payload") => map.remove("payload"),
                other => other,
            };
            Outcome::Success { message, data }
        }
        (_, body) => Outcome::Failure {
            status,
            message: message_of(&body).unwrap_or_else(|| format!("request failed with status {}", status)),
        },
    }
}

struct ApiClient {
    base: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    fn new(remote: RemoteArgs) -> anyhow::Result<Self> {
        let base = Url::parse(&remote.server).with_context(|| format!("invalid server URL '{}'", remote.server))?;
        Ok(Self {
            base,
            token: remote.token,
            http: reqwest::Client::new(),
        })
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> anyhow::Result<(u16, Option<Value>)> {
        let url = self.base.join(path).with_context(|| format!("invalid request path '{}'", path))?;
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.context("request to Product API failed")?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text).with_context(|| format!("server returned non-JSON body: {}", text))?)
        };
        Ok((status, body))
    }
}

fn read_stdin_json() -> anyhow::Result<Value> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input).context("failed to read stdin")?;
    serde_json::from_str(&input).context("stdin must contain a JSON object")
}

fn product_path(id: &str) -> String {
    format!("api/products/{}", id.trim())
}

pub async fn handle(remote: RemoteArgs, cmd: ProductCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = ApiClient::new(remote)?;

    let (status, body) = match &cmd {
        ProductCommands::List => client.send(Method::GET, "api/products", None).await?,
        ProductCommands::Get { id } => client.send(Method::GET, &product_path(id), None).await?,
        ProductCommands::Create => client.send(Method::POST, "api/products", Some(read_stdin_json()?)).await?,
        ProductCommands::Update { id } => {
            client.send(Method::PUT, &product_path(id), Some(read_stdin_json()?)).await?
        }
        ProductCommands::Delete { id } => client.send(Method::DELETE, &product_path(id), None).await?,
    };

    match interpret(status, body) {
        Outcome::Success { message, data } => match (output_format, message) {
            (_, Some(message)) => output_success(output_format, &message, data),
            (OutputFormat::Json, None) => {
                println!("{}", serde_json::to_string_pretty(&data.unwrap_or(Value::Null))?);
                Ok(())
            }
            (OutputFormat::Text, None) => {
                if let Some(data) = data {
                    print_product_text(&data);
                }
                Ok(())
            }
        },
        Outcome::Failure { status, message } => {
            output_error(output_format, &message, Some(status))?;
            anyhow::bail!("{:?} failed: {}", cmd, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn storage_fault_array_is_a_failure() {
        let outcome = interpret(200, Some(json!(["SQLSTATE[HY000]: General error"])));
        assert_eq!(
            outcome,
            Outcome::Failure { status: 200, message: "SQLSTATE[HY000]: General error".to_string() }
        );
    }

    #[test]
    fn listing_is_a_success() {
        let body = json!([{ "id": 1, "name": "Lamp", "price": "1.00" }]);
        assert_eq!(
            interpret(200, Some(body.clone())),
            Outcome::Success { message: None, data: Some(body) }
        );
    }

    #[test]
    fn envelope_payload_is_unwrapped() {
        let body = json!({ "message": "Product created successfully.", "payload": { "id": 3 } });
        assert_eq!(
            interpret(200, Some(body)),
            Outcome::Success {
                message: Some("Product created successfully.".to_string()),
                data: Some(json!({ "id": 3 })),
            }
        );
    }

    #[test]
    fn unprocessable_reports_message() {
        let outcome = interpret(422, Some(json!({ "message": "The Product not found." })));
        assert_eq!(
            outcome,
            Outcome::Failure { status: 422, message: "The Product not found.".to_string() }
        );
    }

    #[test]
    fn no_content_is_deleted() {
        assert!(matches!(interpret(204, None), Outcome::Success { data: None, .. }));
    }
}
