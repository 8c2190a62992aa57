use serde_json::{Map, Value};
use tracing::warn;

/// The model's verdict on whether the documentation is stale.
///
/// Every field is optional: a response missing a key, or carrying one with
/// an unusable type, still renders, with a placeholder in its place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocAnalysis {
    /// Whether the documentation needs to change
    pub is_doc_change_needed: Option<bool>,
    /// Components touched by the change (e.g. "auth-service")
    pub affected_components: Option<Vec<String>>,
    /// Why a change is or is not needed
    pub reasoning: Option<String>,
    /// Proposed replacement documentation section, in AsciiDoc
    pub proposed_ascii_changes: Option<String>,
}

impl DocAnalysis {
    /// Decode a model response.
    ///
    /// Only text that is not a JSON object is an error. Fields are read
    /// leniently: a quoted boolean or a bare component string is accepted,
    /// and any other type mismatch drops the field with a warning.
    pub fn from_json(raw: &str) -> Result<DocAnalysis, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_str(raw)?;
        Ok(Self::from_fields(&fields))
    }

    fn from_fields(fields: &Map<String, Value>) -> DocAnalysis {
        DocAnalysis {
            is_doc_change_needed: fields
                .get("is_doc_change_needed")
                .and_then(|v| verdict("is_doc_change_needed", v)),
            affected_components: fields
                .get("affected_components")
                .and_then(|v| components("affected_components", v)),
            reasoning: fields.get("reasoning").and_then(|v| text("reasoning", v)),
            proposed_ascii_changes: fields
                .get("proposed_ascii_changes")
                .and_then(|v| text("proposed_ascii_changes", v)),
        }
    }

    /// A missing verdict counts as "no change needed".
    pub fn change_needed(&self) -> bool {
        self.is_doc_change_needed.unwrap_or(false)
    }
}

/// Truthiness, with the usual spellings of a quoted boolean understood.
fn verdict(key: &str, value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" | "0" | "" => Some(false),
            other => {
                warn!(key, value = other, "unrecognised verdict string, treating as true");
                Some(true)
            }
        },
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::Array(a) => Some(!a.is_empty()),
        Value::Object(o) => Some(!o.is_empty()),
    }
}

fn components(key: &str, value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(_) | Value::Bool(_) => Some(item.to_string()),
                    _ => {
                        warn!(key, "skipping non-scalar component entry");
                        None
                    }
                })
                .collect(),
        ),
        _ => {
            warn!(key, "expected a list of strings, ignoring field");
            None
        }
    }
}

fn text(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        _ => {
            warn!(key, "expected a string, ignoring field");
            None
        }
    }
}
