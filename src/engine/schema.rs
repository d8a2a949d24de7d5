use chrono::{DateTime, NaiveDate};
use serde_json::Value;

fn is_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(_)))
}

fn is_object(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Object(_)))
}

fn is_array(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Array(_)))
}

fn optional_string(value: Option<&Value>) -> bool {
    value.is_none() || is_string(value)
}

/// Date-bearing fields must be strings and, when present, parse as
/// RFC 3339 or `YYYY-MM-DD`. Anything else earns a warning but is
/// still indexed.
fn optional_date(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::String(raw)) => parses_as_date(raw),
        Some(_) => false,
    }
}

fn parses_as_date(raw: &str) -> bool {
    let trimmed = raw.trim();
    DateTime::parse_from_rfc3339(trimmed).is_ok()
        || NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok()
}

/// Collect the names of missing or wrongly typed manifest fields.
pub(crate) fn validate_manifest(doc: &Value) -> Vec<&'static str> {
    let mut errors = Vec::new();
    if !is_string(doc.get("country")) {
        errors.push("country");
    }
    if !is_string(doc.get("candidate")) {
        errors.push("candidate");
    }
    if !optional_string(doc.get("source_manifesto_url")) {
        errors.push("source_manifesto_url");
    }
    if !optional_date(doc.get("retrieved_at")) {
        errors.push("retrieved_at");
    }
    if !is_array(doc.get("policies")) {
        errors.push("policies");
    }
    errors
}

/// Collect the names of missing or wrongly typed policy fields.
pub(crate) fn validate_policy(policy: &Value) -> Vec<&'static str> {
    let mut errors = Vec::new();
    if !is_string(policy.get("id")) {
        errors.push("id");
    }
    if !is_string(policy.get("title")) {
        errors.push("title");
    }
    if !is_string(policy.get("description")) {
        errors.push("description");
    }
    if !is_string(policy.get("source_url")) {
        errors.push("source_url");
    }
    if !optional_date(policy.get("effective_date")) {
        errors.push("effective_date");
    }
    if !is_object(policy.get("eligibility")) {
        errors.push("eligibility");
    }
    if !is_object(policy.get("compute")) {
        errors.push("compute");
    }
    let compute = policy.get("compute");
    if !is_string(compute.and_then(|value| value.get("type"))) {
        errors.push("compute.type");
    }
    if !is_object(compute.and_then(|value| value.get("params"))) {
        errors.push("compute.params");
    }
    errors
}
