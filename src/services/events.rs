// src/services/events.rs
//
// The agent runtime answers one turn with an ordered list of events. Each
// event may carry model text, a tool invocation result, or something we do
// not recognize. Everything here decodes defensively: unknown shapes become
// `Part::Other` and count as "no match".

use serde::Deserialize;
use serde_json::Value;

use crate::message::Gem;

/// Reply used when no event yields usable text.
pub const FALLBACK_REPLY: &str = "I couldn't generate a response";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AgentEvent {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    FunctionResponse {
        function_response: FunctionResponse,
    },
    Other(Value),
}

#[derive(Clone, Debug, Deserialize)]
pub struct FunctionResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub response: Value,
}

/// Pick the best human-readable reply out of one turn's events.
///
/// Scans newest to oldest. For the first event carrying content, non-empty
/// text parts win; failing that, a function response's nested `result` field
/// is used. Events that match neither are skipped.
pub fn extract_reply(events: &[AgentEvent]) -> String {
    for event in events.iter().rev() {
        let Some(content) = &event.content else {
            continue;
        };

        let text: String = content
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } if !text.is_empty() => Some(text.as_str()),
                _ => None,
            })
            .collect();
        if !text.is_empty() {
            return text;
        }

        for part in &content.parts {
            if let Part::FunctionResponse { function_response } = part {
                match function_response.response.get("result") {
                    Some(Value::String(s)) => {
                        if !s.is_empty() {
                            return s.clone();
                        }
                    }
                    Some(Value::Null) | None => {}
                    Some(other) => return other.to_string(),
                }
            }
        }
    }

    FALLBACK_REPLY.to_string()
}

/// Find the most recent `gems` payload in one turn's events.
///
/// Tool results are checked first on each event, then model text (the
/// recommendation step sometimes echoes the JSON inside a code fence).
/// Returns `None` when no event carries a `gems` array; malformed JSON is
/// logged and treated the same way.
pub fn extract_gems(events: &[AgentEvent]) -> Option<Vec<Gem>> {
    for event in events.iter().rev() {
        let Some(content) = &event.content else {
            continue;
        };
        for part in &content.parts {
            let found = match part {
                Part::FunctionResponse { function_response } => {
                    gems_from_value(&function_response.response).or_else(|| {
                        match function_response.response.get("result") {
                            Some(Value::String(s)) => gems_from_text(s),
                            _ => None,
                        }
                    })
                }
                Part::Text { text } => gems_from_text(text),
                Part::Other(_) => None,
            };
            if let Some(gems) = found {
                return Some(gems);
            }
        }
    }
    None
}

/// Interpret advice text: JSON object if it parses (code fences stripped),
/// plain string otherwise.
pub fn parse_advice(text: &str) -> Value {
    let inner = strip_code_fences(text).trim();
    if inner.starts_with('{') {
        if let Ok(value) = serde_json::from_str::<Value>(inner) {
            return value;
        }
    }
    Value::String(text.to_string())
}

fn gems_from_text(text: &str) -> Option<Vec<Gem>> {
    let inner = strip_code_fences(text).trim();
    let start = inner.find('{')?;
    let end = inner.rfind('}')?;
    if end < start {
        return None;
    }
    let value: Value = match serde_json::from_str(&inner[start..=end]) {
        Ok(v) => v,
        Err(err) => {
            tracing::debug!(%err, "candidate gems payload was not valid JSON");
            return None;
        }
    };
    gems_from_value(&value)
}

fn gems_from_value(value: &Value) -> Option<Vec<Gem>> {
    let items = value.get("gems")?.as_array()?;
    let gems = items
        .iter()
        .filter_map(|item| match serde_json::from_value::<Gem>(item.clone()) {
            Ok(gem) => Some(gem),
            Err(err) => {
                tracing::warn!(%err, "skipping malformed gem record");
                None
            }
        })
        .collect();
    Some(gems)
}

fn strip_code_fences(text: &str) -> &str {
    let Some(start) = text.find("```") else {
        return text;
    };
    let after = &text[start + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    match after.find("```") {
        Some(end) => &after[..end],
        None => after,
    }
}
