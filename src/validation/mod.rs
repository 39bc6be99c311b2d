//! Request validation for the product endpoints.
//!
//! Identifier checks live in [`identifier`]; body rules in [`rules`]. Both
//! report through [`ValidationError`], which the error layer renders as 422.

pub mod identifier;
pub mod rules;

pub use identifier::ProductId;
pub use rules::{normalize_input, Mode, ProductRules};

use serde_json::{json, Map, Value};

pub const INVALID_IDENTIFIER_MESSAGE: &str = "Product ID must be an Integer.";

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidIdentifier,
    Fields(FieldErrors),
}

impl ValidationError {
    pub fn message(&self) -> String {
        match self {
            ValidationError::InvalidIdentifier => INVALID_IDENTIFIER_MESSAGE.to_string(),
            ValidationError::Fields(errors) => errors.summary(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ValidationError::InvalidIdentifier => json!({ "message": INVALID_IDENTIFIER_MESSAGE }),
            ValidationError::Fields(errors) => json!({
                "message": errors.summary(),
                "errors": errors.to_json(),
            }),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Field failures in rule-evaluation order, one message per field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: String) {
        self.entries.push((field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    /// First message, suffixed with the count of the remaining ones
    pub fn summary(&self) -> String {
        let Some((_, first)) = self.entries.first() else {
            return String::new();
        };
        match self.entries.len() - 1 {
            0 => first.clone(),
            1 => format!("{} (and 1 more error)", first),
            n => format!("{} (and {} more errors)", first, n),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (field, message) in &self.entries {
            map.insert((*field).to_string(), json!([message]));
        }
        Value::Object(map)
    }

    pub fn into_result<T>(self, value: T) -> Result<T, ValidationError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::Fields(self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_remaining_errors() {
        let mut errors = FieldErrors::default();
        errors.push("name", "The name field is required.".to_string());
        assert_eq!(errors.summary(), "The name field is required.");

        errors.push("price", "The price field is required.".to_string());
        assert_eq!(errors.summary(), "The name field is required. (and 1 more error)");

        errors.push("other", "Another.".to_string());
        assert_eq!(errors.summary(), "The name field is required. (and 2 more errors)");
    }

    #[test]
    fn field_errors_render_as_laravel_bag() {
        let mut errors = FieldErrors::default();
        errors.push("name", "The name field must be at least 3 characters.".to_string());
        let body = ValidationError::Fields(errors).to_json();

        assert_eq!(body["message"], "The name field must be at least 3 characters.");
        assert_eq!(body["errors"]["name"][0], "The name field must be at least 3 characters.");
    }

    #[test]
    fn invalid_identifier_body() {
        let body = ValidationError::InvalidIdentifier.to_json();
        assert_eq!(body, json!({ "message": "Product ID must be an Integer." }));
    }
}
