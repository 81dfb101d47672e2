//! Prompt construction helpers.
//!
//! Stage prompts are templates with `{key}` placeholders filled from a
//! [`PromptVars`] map. Templates embed literal JSON shape examples, so
//! `{{` and `}}` escape to literal braces.

use std::collections::HashMap;

/// Sentinel that should never appear in real templates.
const ESCAPE_SENTINEL: &str = "\x00LBRACE\x00";
/// Sentinel for escaped closing brace.
const ESCAPE_SENTINEL_CLOSE: &str = "\x00RBRACE\x00";

/// Named values substituted into prompt `{key}` placeholders.
#[derive(Debug, Clone, Default)]
pub struct PromptVars {
    data: HashMap<String, String>,
}

impl PromptVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|s| s.as_str())
    }
}

/// Build a prompt string with variable substitution.
///
/// Replaces `{key}` placeholders in the template with values from `vars`.
/// Use `{{` to insert a literal `{` and `}}` to insert a literal `}`.
///
/// # Example
///
/// ```
/// use learnpath::prompt::{render, PromptVars};
///
/// let vars = PromptVars::new().set("topic", "Rust");
/// let result = render("Teach {topic}. Respond as {{\"plan\": \"...\"}}", &vars);
/// assert_eq!(result, r#"Teach Rust. Respond as {"plan": "..."}"#);
/// ```
pub fn render(template: &str, vars: &PromptVars) -> String {
    // Pass 1: protect escaped braces
    let mut rendered = template.replace("{{", ESCAPE_SENTINEL);
    rendered = rendered.replace("}}", ESCAPE_SENTINEL_CLOSE);

    // Pass 2: substitute placeholders
    for (key, value) in &vars.data {
        let placeholder = format!("{{{}}}", key);
        rendered = rendered.replace(&placeholder, value);
    }

    // Pass 3: restore escaped braces
    rendered = rendered.replace(ESCAPE_SENTINEL, "{");
    rendered = rendered.replace(ESCAPE_SENTINEL_CLOSE, "}");
    rendered
}

/// Create a numbered list from items (1-indexed).
pub fn numbered_list(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap text in a labeled section for structured prompts.
pub fn section(label: &str, content: &str) -> String {
    format!("## {}\n{}", label, content)
}
