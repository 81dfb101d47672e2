//! Defensive parsing of generation output.
//!
//! Even in JSON mode, models wrap answers in markdown fences or prose.
//! These helpers extract a usable JSON document before handing it to
//! serde, so a stage only falls back when the text truly contains no
//! parseable artifact.

use crate::error::Result;
use crate::PlanError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extract JSON content from markdown fenced code blocks.
///
/// Recognizes `` ```json ``, `` ```JSON ``, and plain `` ``` `` fences.
pub fn extract_json_block(text: &str) -> Option<String> {
    let markers = ["```json", "```JSON", "```"];
    for marker in markers {
        if let Some(start) = text.find(marker) {
            let content_start = start + marker.len();
            if let Some(end) = text[content_start..].find("```") {
                return Some(text[content_start..content_start + end].trim().to_string());
            }
        }
    }
    None
}

/// Try to locate and extract a JSON object or array from text that may
/// contain surrounding prose.
///
/// Tries, in order:
/// 1. Markdown code block extraction
/// 2. First `{` or `[` with matching closer
pub fn extract_json_candidate(text: &str) -> Option<String> {
    let trimmed = text.trim();

    if let Some(block) = extract_json_block(trimmed) {
        return Some(block);
    }

    if let Some(idx) = trimmed.find('{').or_else(|| trimmed.find('[')) {
        let candidate = &trimmed[idx..];
        if serde_json::from_str::<Value>(candidate).is_ok() {
            return Some(candidate.to_string());
        }
        let open = candidate.as_bytes()[0];
        let close = if open == b'{' { b'}' } else { b']' };
        if let Some(end) = candidate.rfind(close as char) {
            let substr = &candidate[..=end];
            if serde_json::from_str::<Value>(substr).is_ok() {
                return Some(substr.to_string());
            }
        }
    }

    None
}

/// Parse generation text into a typed `T` with defensive JSON extraction.
///
/// Tries direct parse, markdown block extraction, and embedded JSON
/// detection before giving up.
pub fn parse_as<T: DeserializeOwned>(text: &str) -> Result<T> {
    let trimmed = text.trim();

    if let Ok(val) = serde_json::from_str::<T>(trimmed) {
        return Ok(val);
    }

    if let Some(json_str) = extract_json_block(trimmed) {
        if let Ok(val) = serde_json::from_str::<T>(&json_str) {
            return Ok(val);
        }
    }

    if let Some(idx) = trimmed.find('{').or_else(|| trimmed.find('[')) {
        let candidate = &trimmed[idx..];
        if let Ok(val) = serde_json::from_str::<T>(candidate) {
            return Ok(val);
        }
        let open = candidate.as_bytes()[0];
        let close = if open == b'{' { b'}' } else { b']' };
        if let Some(end) = candidate.rfind(close as char) {
            let substr = &candidate[..=end];
            if let Ok(val) = serde_json::from_str::<T>(substr) {
                return Ok(val);
            }
        }
    }

    Err(PlanError::Other(format!(
        "No parseable artifact in generation output. Raw text (truncated): {}",
        &trimmed[..trimmed.len().min(200)]
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GapAssessment;

    #[test]
    fn test_extract_json_block() {
        let text = "text\n```json\n{\"a\":1}\n```\nmore";
        assert_eq!(extract_json_block(text), Some("{\"a\":1}".to_string()));
    }

    #[test]
    fn test_extract_json_block_none() {
        assert_eq!(extract_json_block("no code block"), None);
    }

    #[test]
    fn test_extract_json_candidate_embedded() {
        let text = "Here is the result: {\"name\": \"test\"} done.";
        let candidate = extract_json_candidate(text).unwrap();
        let val: Value = serde_json::from_str(&candidate).unwrap();
        assert_eq!(val["name"], "test");
    }

    #[test]
    fn test_parse_as_direct() {
        let gap: GapAssessment = parse_as(
            r#"{"identified_gaps": ["g1"], "current_level": "a", "target_level": "b", "gap_analysis": "c"}"#,
        )
        .unwrap();
        assert_eq!(gap.gaps, vec!["g1"]);
    }

    #[test]
    fn test_parse_as_markdown_block() {
        let text = "Sure, here is the analysis:\n```json\n{\"identified_gaps\": [], \"current_level\": \"a\", \"target_level\": \"b\", \"gap_analysis\": \"c\"}\n```\nHope that helps.";
        let gap: GapAssessment = parse_as(text).unwrap();
        assert_eq!(gap.current_level, "a");
    }

    #[test]
    fn test_parse_as_embedded() {
        #[derive(Debug, serde::Deserialize)]
        struct T {
            name: String,
        }
        let text = "The answer: {\"name\": \"test\"} as requested.";
        let result: T = parse_as(text).unwrap();
        assert_eq!(result.name, "test");
    }

    #[test]
    fn test_parse_as_wrong_shape_fails() {
        // Valid JSON, wrong fields — must not silently coerce.
        let result = parse_as::<GapAssessment>(r#"{"totally": "unrelated"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_as_prose_fails() {
        let result = parse_as::<GapAssessment>("I could not produce JSON, sorry.");
        assert!(result.is_err());
    }
}
