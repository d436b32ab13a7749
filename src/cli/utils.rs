use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::error::PlatformError;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            match data {
                Some(Value::Object(fields)) => {
                    if let Some(object) = response.as_object_mut() {
                        object.extend(fields);
                    }
                }
                Some(other) => response["data"] = other,
                None => {}
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Turn a platform failure into the command's error. JSON mode also prints the
/// error object; text mode leaves printing to the binary.
pub fn report(output_format: &OutputFormat, error: PlatformError) -> anyhow::Error {
    if let OutputFormat::Json = output_format {
        if let Err(e) = output_error(output_format, &error.to_string(), Some(error.error_code())) {
            tracing::warn!("could not print error: {}", e);
        }
    }
    anyhow::Error::new(error)
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ collection_name: [] }))?
            );
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Print a list: JSON under `collection_name`, text one line per row
pub fn output_collection<T: Serialize>(
    output_format: &OutputFormat,
    collection_name: &str,
    items: &[T],
    line: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ collection_name: items }))?
            );
        }
        OutputFormat::Text => {
            for item in items {
                println!("{}", line(item));
            }
        }
    }
    Ok(())
}

/// Print one record: pretty JSON either way, with a heading in text mode
pub fn output_record<T: Serialize>(
    output_format: &OutputFormat,
    heading: &str,
    record: &T,
) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(record)?;
    match output_format {
        OutputFormat::Json => println!("{}", body),
        OutputFormat::Text => {
            println!("{}", heading);
            println!("{}", body);
        }
    }
    Ok(())
}

/// Flatten a weight map into `name (weight)` pairs for text output
pub fn weights_line(weights: &crate::types::WeightMap) -> String {
    weights
        .iter()
        .map(|(name, weight)| format!("{} ({})", name, weight.to_value()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Weight, WeightMap};

    #[test]
    fn weights_render_in_order() {
        let mut weights = WeightMap::new();
        weights.insert("C".into(), Weight::from(70i64));
        weights.insert("Java".into(), Weight::from("30"));
        assert_eq!(weights_line(&weights), r#"C (70), Java ("30")"#);
    }
}
