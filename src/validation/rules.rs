use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use super::identifier::is_numeric;
use super::{FieldErrors, ValidationError};
use crate::database::{NewProduct, ProductChanges};

/// Which write a body is validated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every rule applies; absent required fields fail
    Create,
    /// Absent fields are skipped; present ones get the full rule list
    Update,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Required,
    Nullable,
    String,
    Min(usize),
    Numeric,
    Decimal { min: usize, max: usize },
}

struct FieldRules {
    field: &'static str,
    rules: &'static [Rule],
}

/// The single product rule table, shared by create and update
const PRODUCT_FIELDS: &[FieldRules] = &[
    FieldRules {
        field: "name",
        rules: &[Rule::Required, Rule::String, Rule::Min(3)],
    },
    FieldRules {
        field: "description",
        rules: &[Rule::Nullable],
    },
    FieldRules {
        field: "price",
        rules: &[Rule::Required, Rule::Numeric, Rule::Decimal { min: 0, max: 2 }],
    },
];

enum Outcome {
    Next,
    Stop,
}

/// Trim every top-level string and turn the ones left empty into `null`
pub fn normalize_input(input: Map<String, Value>) -> Map<String, Value> {
    input
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        Value::Null
                    } else {
                        Value::String(trimmed.to_string())
                    }
                }
                other => other,
            };
            (key, value)
        })
        .collect()
}

pub struct ProductRules;

impl ProductRules {
    pub fn validate_create(input: &Map<String, Value>) -> Result<NewProduct, ValidationError> {
        let mut errors = Self::check(input, Mode::Create);
        if !errors.is_empty() {
            return Err(ValidationError::Fields(errors));
        }

        let price = match input.get("price").map(parse_price) {
            Some(Some(price)) => price,
            _ => {
                errors.push("price", numeric_message("price"));
                Decimal::ZERO
            }
        };

        let fields = NewProduct {
            name: input.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
            description: input.get("description").and_then(description_text),
            price,
        };
        errors.into_result(fields)
    }

    pub fn validate_update(input: &Map<String, Value>) -> Result<ProductChanges, ValidationError> {
        let mut errors = Self::check(input, Mode::Update);
        if !errors.is_empty() {
            return Err(ValidationError::Fields(errors));
        }

        let price = match input.get("price") {
            Some(value) => match parse_price(value) {
                Some(price) => Some(price),
                None => {
                    errors.push("price", numeric_message("price"));
                    None
                }
            },
            None => None,
        };

        let changes = ProductChanges {
            name: input.get("name").and_then(Value::as_str).map(str::to_string),
            description: input.get("description").map(description_text),
            price,
        };
        errors.into_result(changes)
    }

    fn check(input: &Map<String, Value>, mode: Mode) -> FieldErrors {
        let mut errors = FieldErrors::default();

        for field in PRODUCT_FIELDS {
            let value = input.get(field.field);
            if mode == Mode::Update && value.is_none() {
                continue;
            }

            for rule in field.rules {
                match apply(*rule, field.field, value) {
                    Ok(Outcome::Next) => {}
                    Ok(Outcome::Stop) => break,
                    Err(message) => {
                        errors.push(field.field, message);
                        break;
                    }
                }
            }
        }

        errors
    }
}

fn apply(rule: Rule, field: &str, value: Option<&Value>) -> Result<Outcome, String> {
    if let Rule::Required = rule {
        return match value {
            Some(v) if !is_blank(v) => Ok(Outcome::Next),
            _ => Err(format!("The {} field is required.", field)),
        };
    }

    let value = match value {
        None | Some(Value::Null) => return Ok(Outcome::Stop),
        Some(v) => v,
    };

    match rule {
        Rule::Required | Rule::Nullable => Ok(Outcome::Next),
        Rule::String => match value {
            Value::String(_) => Ok(Outcome::Next),
            _ => Err(format!("The {} field must be a string.", field)),
        },
        Rule::Min(min) => match value {
            Value::String(s) if s.chars().count() < min => {
                Err(format!("The {} field must be at least {} characters.", field, min))
            }
            _ => Ok(Outcome::Next),
        },
        Rule::Numeric => match numeric_text(value) {
            Some(text) if is_numeric(&text) => Ok(Outcome::Next),
            _ => Err(numeric_message(field)),
        },
        Rule::Decimal { min, max } => {
            let places = numeric_text(value).and_then(|text| decimal_places(&text));
            match places {
                Some(n) if n >= min && n <= max => Ok(Outcome::Next),
                _ => Err(format!("The {} field must have {}-{} decimal places.", field, min, max)),
            }
        }
    }
}

fn numeric_message(field: &str) -> String {
    format!("The {} field must be a number.", field)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn numeric_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Fraction digit count for `[+-]digits[.digits]`; `None` for any other shape
fn decimal_places(text: &str) -> Option<usize> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) || (whole.is_empty() && fraction.is_empty()) {
        return None;
    }
    Some(fraction.len())
}

/// Parse a price that already passed the decimal rule; "5." and ".5" are
/// spelled out as "5" and "0.5" first
fn parse_price(value: &Value) -> Option<Decimal> {
    let text = numeric_text(value)?;
    let text = text.trim();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    let unsigned = unsigned.strip_suffix('.').unwrap_or(unsigned);
    let canonical = if unsigned.starts_with('.') {
        format!("{}0{}", sign, unsigned)
    } else {
        format!("{}{}", sign, unsigned)
    };
    Decimal::from_str(&canonical).ok()
}

fn description_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
