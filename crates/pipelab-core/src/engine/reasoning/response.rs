use crate::core::catalog::registry::ModuleCatalog;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AiModule {
    pub id: String,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// A pipeline proposal that passed the parse-or-fail boundary: well-formed JSON
/// naming at least one module, every one of which exists in the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AiComposition {
    #[serde(default)]
    pub workflow_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub modules: Vec<AiModule>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub clarifying_question: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("No JSON object found in response")]
    NoJson,

    #[error("Response is not valid pipeline JSON: {0}")]
    InvalidJson(String),

    #[error("Response names no modules")]
    EmptyModules,

    #[error("Response references unknown modules: {}", .0.join(", "))]
    UnknownModules(Vec<String>),
}

/// The only place a reasoning reply is interpreted. Any `Err` means the caller
/// must fall back to the heuristic path.
pub fn parse_response(text: &str, catalog: &ModuleCatalog) -> Result<AiComposition, ResponseError> {
    let json = extract_json(text)?;
    let composition: AiComposition =
        serde_json::from_str(json).map_err(|e| ResponseError::InvalidJson(e.to_string()))?;

    if composition.modules.is_empty() {
        return Err(ResponseError::EmptyModules);
    }
    let unknown: Vec<String> = composition
        .modules
        .iter()
        .filter(|m| !catalog.contains(m.id.trim()))
        .map(|m| m.id.clone())
        .collect();
    if !unknown.is_empty() {
        return Err(ResponseError::UnknownModules(unknown));
    }
    Ok(composition)
}

/// Extracts the JSON payload. A `json`-tagged fenced block wins, then any other
/// fenced block holding an object, then the outermost braces of the whole text.
fn extract_json(text: &str) -> Result<&str, ResponseError> {
    let blocks = fenced_blocks(text);
    let ordered = blocks
        .iter()
        .filter(|(tag, _)| tag.eq_ignore_ascii_case("json"))
        .chain(blocks.iter().filter(|(tag, _)| !tag.eq_ignore_ascii_case("json")));
    for &(_, body) in ordered {
        if let Ok(json) = outermost_object(body) {
            return Ok(json);
        }
    }
    outermost_object(text)
}

/// Every closed ``` block as (language tag, body), in order of appearance.
fn fenced_blocks(text: &str) -> Vec<(&str, &str)> {
    let mut blocks = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find("```") {
        let after_fence = &rest[open + 3..];
        let Some(line_end) = after_fence.find('\n') else {
            break;
        };
        let tag = after_fence[..line_end].trim();
        let body = &after_fence[line_end + 1..];
        let Some(close) = body.find("```") else {
            break;
        };
        blocks.push((tag, &body[..close]));
        rest = &body[close + 3..];
    }
    blocks
}

fn outermost_object(text: &str) -> Result<&str, ResponseError> {
    let start = text.find('{').ok_or(ResponseError::NoJson)?;
    let end = text.rfind('}').ok_or(ResponseError::NoJson)?;
    if end < start {
        return Err(ResponseError::NoJson);
    }
    Ok(&text[start..=end])
}
