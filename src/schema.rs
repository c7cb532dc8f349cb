//! JSON Schema generation and validation for figure description files

use std::sync::LazyLock;

use schemars::schema_for;
use serde_json::Value;

use crate::script::Figure;

/// Cached JSON Schema for Figure.
static SCHEMA: LazyLock<schemars::Schema> = LazyLock::new(|| schema_for!(Figure));

/// Returns the JSON Schema as a pretty-printed JSON string.
pub fn schema_json_pretty() -> Result<String, String> {
    serde_json::to_string_pretty(&*SCHEMA)
        .map_err(|e| format!("Failed to serialize schema: {}", e))
}

/// Validate a JSON value against the Figure schema.
///
/// Returns `Ok(())` if valid, or `Err` with a description of all validation errors.
pub fn validate(value: &Value) -> Result<(), String> {
    let schema_val = serde_json::to_value(&*SCHEMA)
        .map_err(|e| format!("Failed to serialize schema: {}", e))?;
    let validator = jsonschema::validator_for(&schema_val)
        .map_err(|e| format!("Failed to compile schema: {}", e))?;

    let errors: Vec<String> = validator
        .iter_errors(value)
        .map(|e| format!("  - {}: {}", e.instance_path, e))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Figure JSON failed schema validation ({} errors):\n{}",
            errors.len(),
            errors.join("\n")
        ))
    }
}

/// Parse a figure description, validating it against the schema first.
pub fn parse_figure(text: &str) -> anyhow::Result<Figure> {
    let value: Value = serde_json::from_str(text)?;
    validate(&value).map_err(anyhow::Error::msg)?;
    Ok(serde_json::from_value(value)?)
}
