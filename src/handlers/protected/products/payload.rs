use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use crate::validation::normalize_input;

/// JSON object body with strings trimmed and blank strings nulled.
///
/// An empty body, unparseable JSON and non-object JSON all read as `{}`, so
/// the field rules, not the parser, report what is missing.
#[derive(Debug)]
pub struct ProductPayload(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for ProductPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(ProductPayload(parse_body(&bytes)))
    }
}

fn parse_body(bytes: &[u8]) -> Map<String, Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Map::new();
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => normalize_input(map),
        Ok(other) => {
            tracing::debug!("Ignoring request body: expected an object, got {}", kind(&other));
            Map::new()
        }
        Err(e) => {
            tracing::debug!("Ignoring unparseable request body: {}", e);
            Map::new()
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
