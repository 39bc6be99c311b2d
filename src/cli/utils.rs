use serde_json::{json, Value};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
            if let Some(data_value) = data {
                print_product_text(&data_value);
            }
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: OutputFormat,
    message: &str,
    status: Option<u16>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = status {
                response["status"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            match status {
                Some(code) => eprintln!("Error ({}): {}", code, message),
                None => eprintln!("Error: {}", message),
            }
        }
    }
    Ok(())
}

/// Print a product (or a list of them) as aligned text rows
pub fn print_product_text(value: &Value) {
    match value {
        Value::Array(items) if items.is_empty() => println!("No products"),
        Value::Array(items) => {
            for item in items {
                print_product_text(item);
            }
        }
        Value::Object(_) => {
            let field = |name: &str| match &value[name] {
                Value::Null => "-".to_string(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            println!(
                "{:>6}  {:<32}  {:>10}  {}",
                field("id"),
                field("name"),
                field("price"),
                field("description")
            );
        }
        other => println!("{}", other),
    }
}
