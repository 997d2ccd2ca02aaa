/*!
 * Extraction of translated texts from a service response.
 */

use serde_json::Value;

use crate::errors::ProviderError;

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Walk a dot-separated `path` through a JSON object body to an array of strings
///
/// The array must hold exactly `expected` strings.
pub fn extract_translations(
    body: &str,
    path: &str,
    expected: usize,
) -> Result<Vec<String>, ProviderError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("Response is not valid JSON: {}", e)))?;
    if !root.is_object() {
        return Err(ProviderError::ParseError(format!(
            "Expected a JSON object response, got {}",
            kind_of(&root)
        )));
    }

    let fail = |reason: String| ProviderError::ExtractionFailed {
        path: path.to_string(),
        reason,
    };

    let mut current = &root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map
                .get(segment)
                .ok_or_else(|| fail(format!("key '{}' not found", segment)))?,
            other => {
                return Err(fail(format!(
                    "cannot look up '{}' in {}",
                    segment,
                    kind_of(other)
                )));
            }
        };
    }

    let values = current
        .as_array()
        .ok_or_else(|| fail(format!("expected an array, found {}", kind_of(current))))?;

    if values.len() != expected {
        return Err(ProviderError::SizeMismatch {
            expected,
            actual: values.len(),
        });
    }

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            value.as_str().map(str::to_string).ok_or_else(|| {
                ProviderError::ParseError(format!("Element {} is {}, not a string", i, kind_of(value)))
            })
        })
        .collect()
}
