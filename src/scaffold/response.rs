use super::types::{FileEntry, ScaffoldResult};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// The model reply could not be read as a `{plan, files}` object
#[derive(Debug, Clone, Error)]
#[error("Could not parse scaffold JSON: {message} (reply starts with: {excerpt:?})")]
pub struct PlanParseError {
    pub message: String,
    pub excerpt: String,
}

impl PlanParseError {
    fn new(message: impl Into<String>, reply: &str) -> Self {
        Self {
            message: message.into(),
            excerpt: reply.chars().take(120).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawScaffold {
    #[serde(default)]
    plan: Value,
    #[serde(default)]
    files: Vec<FileEntry>,
}

/// Parses a model reply into a [`ScaffoldResult`]
///
/// Missing `plan` or `files` keys default to empty. A `plan` given as a list is joined
/// line by line.
pub fn parse_scaffold(reply: &str) -> Result<ScaffoldResult, PlanParseError> {
    debug!("Parsing scaffold reply ({} chars)", reply.len());

    let json_str = extract_json_from_response(reply)?;
    let raw: RawScaffold = serde_json::from_str(&json_str).map_err(|e| {
        warn!("Scaffold JSON parse error: {}", e);
        PlanParseError::new(e.to_string(), &json_str)
    })?;

    Ok(ScaffoldResult::new(plan_text(raw.plan), raw.files))
}

fn plan_text(plan: Value) -> String {
    match plan {
        Value::Null => String::new(),
        Value::String(text) => text,
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => text,
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

/// Removes surrounding whitespace and markdown code-fence markers
pub fn strip_code_fences(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string (```json) up to the first newline
        text = match rest.find('\n') {
            Some(idx) if rest[..idx].chars().all(|c| c.is_ascii_alphanumeric()) => &rest[idx + 1..],
            _ => rest,
        };
    }
    text.trim().trim_matches('`').trim()
}

/// Finds the JSON object inside a reply that may be wrapped in fences or prose
pub fn extract_json_from_response(reply: &str) -> Result<String, PlanParseError> {
    let trimmed = strip_code_fences(reply);

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Ok(trimmed.to_string());
    }

    if trimmed.contains("```") {
        if let Some(block) = extract_from_markdown_block(trimmed) {
            return Ok(block);
        }
    }

    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if start < end {
                return Ok(trimmed[start..=end].to_string());
            }
        }
    }

    Err(PlanParseError::new("no JSON object found in reply", reply))
}

fn extract_from_markdown_block(text: &str) -> Option<String> {
    let re = Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?```").ok()?;
    let json = re.captures(text)?.get(1)?.as_str().trim();
    if json.starts_with('{') && json.ends_with('}') {
        Some(json.to_string())
    } else {
        None
    }
}
