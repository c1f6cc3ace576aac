use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("no JSON object found in model output")]
    NoObject,

    #[error("model output is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Best-effort recovery of a JSON object from raw model output.
///
/// Strips a surrounding code fence if present; otherwise slices from the
/// first `{` to the last `}` and parses the substring. Models asked for
/// JSON still wrap it in fences or prose often enough that this path is the
/// common case, not the exception.
pub fn extract_json_object(raw: &str) -> Result<serde_json::Value, ExtractError> {
    let trimmed = raw.trim();
    let candidate = strip_code_fence(trimmed).unwrap_or(trimmed);

    let start = candidate.find('{').ok_or(ExtractError::NoObject)?;
    let end = candidate.rfind('}').ok_or(ExtractError::NoObject)?;
    if end < start {
        return Err(ExtractError::NoObject);
    }

    serde_json::from_str(&candidate[start..=end])
        .map_err(|e| ExtractError::InvalidJson(e.to_string()))
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    let end = rest.rfind("```")?;
    Some(rest[..end].trim())
}
