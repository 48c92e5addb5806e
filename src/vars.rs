//! Typed variables and `{{name}}` template substitution
//!
//! Environment variables are stored as text with a declared type; [`cast`]
//! computes the typed interpretation on demand. [`substitute`] resolves
//! `{{name}}` placeholders against an environment with two modes:
//!
//! - **Whole-value**: an input that is exactly one placeholder resolves to
//!   the variable's typed value (number, boolean, JSON object/array). This
//!   is what lets a JSON body be built from a single variable.
//! - **Inline**: any other input stays a string; each placeholder is
//!   replaced by the string form of its variable's value.
//!
//! Both paths are total: unknown placeholders stay verbatim, malformed
//! values fall back to raw text, and nothing here ever returns an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::{Environment, Variable, VariableType};

// Cached patterns; placeholder names are restricted to [A-Za-z0-9_]
static WHOLE_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{\{\s*([A-Za-z0-9_]+)\s*\}\}$").unwrap());
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*[A-Za-z0-9_]+\s*\}\}").unwrap());

/// Cast a variable's stored text to its typed value
///
/// Pure function of `(value, kind)`; casting failures fall back to the raw
/// text rather than erroring.
pub fn cast(variable: &Variable) -> Value {
    let text = variable.value.as_str();
    match variable.kind {
        VariableType::String => Value::String(text.to_string()),
        VariableType::Number => {
            number_value(text).unwrap_or_else(|| Value::String(text.to_string()))
        }
        VariableType::Boolean => {
            if text.eq_ignore_ascii_case("true") {
                Value::Bool(true)
            } else if text.eq_ignore_ascii_case("false") {
                Value::Bool(false)
            } else {
                Value::Bool(!text.is_empty())
            }
        }
        VariableType::Json => {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        }
        VariableType::Auto => {
            if text.eq_ignore_ascii_case("true") {
                return Value::Bool(true);
            }
            if text.eq_ignore_ascii_case("false") {
                return Value::Bool(false);
            }
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                if let Some(num) = number_value(text) {
                    return num;
                }
            }
            // Only attempt JSON when the text looks like an object or array;
            // bare words must stay strings.
            if (trimmed.starts_with('{') && trimmed.ends_with('}'))
                || (trimmed.starts_with('[') && trimmed.ends_with(']'))
            {
                if let Ok(parsed) = serde_json::from_str(trimmed) {
                    return parsed;
                }
            }
            Value::String(text.to_string())
        }
    }
}

/// Numeric interpretation of stored text
///
/// Empty input counts as zero. Integral values become JSON integers so
/// their string form has no trailing `.0`; non-finite parses are rejected.
fn number_value(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(Value::from(0));
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Value::from(int));
    }
    let float: f64 = trimmed.parse().ok()?;
    if !float.is_finite() {
        return None;
    }
    // 2^53 bounds the integers exactly representable in an f64
    if float.fract() == 0.0 && float.abs() < 9_007_199_254_740_992.0 {
        Some(Value::from(float as i64))
    } else {
        Some(Value::from(float))
    }
}

/// Resolve `{{name}}` placeholders in `input` against an environment
///
/// Only enabled variables with a non-empty key participate. An input that
/// is exactly one placeholder (modulo surrounding whitespace) resolves to
/// the variable's typed value; anything else is inline-interpolated and
/// stays a string. Unknown placeholders are left verbatim.
pub fn substitute(input: &str, environment: &Environment) -> Value {
    let enabled: Vec<&Variable> = environment
        .iter()
        .filter(|v| v.enabled && !v.key.is_empty())
        .collect();

    if let Some(caps) = WHOLE_VALUE_RE.captures(input.trim()) {
        let name = &caps[1];
        if let Some(var) = enabled.iter().find(|v| v.key == name) {
            return cast(var);
        }
    }

    let mut substituted = input.to_string();
    for var in &enabled {
        let Ok(pattern) = Regex::new(&format!(
            r"\{{\{{\s*{}\s*\}}\}}",
            regex::escape(&var.key)
        )) else {
            continue;
        };
        if !pattern.is_match(&substituted) {
            continue;
        }
        let replacement = display_string(&cast(var));
        // NoExpand: a replacement containing `$` must be inserted literally
        substituted = pattern
            .replace_all(&substituted, regex::NoExpand(&replacement))
            .into_owned();
    }
    Value::String(substituted)
}

/// [`substitute`], coerced to a string
///
/// Objects and arrays render as JSON text, primitives as their natural
/// display form. This is the form the exporter and materializer insert
/// into URLs, headers and bodies.
pub fn substitute_str(input: &str, environment: &Environment) -> String {
    display_string(&substitute(input, environment))
}

/// Check whether a string contains any `{{name}}` placeholder
pub fn has_placeholders(s: &str) -> bool {
    PLACEHOLDER_RE.is_match(s)
}

fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => serde_json::to_string(value).unwrap_or_default(),
        other => other.to_string(),
    }
}
