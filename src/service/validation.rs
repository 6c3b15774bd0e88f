//! Submission validation and coercion from field definitions.

use crate::error::{FieldErrorKind, FieldErrors};
use crate::model::{ContentModel, FieldDef, FieldKind};
use crate::status;
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

/// Compiled field patterns keyed by their source.
static PATTERNS: LazyLock<RwLock<HashMap<String, Regex>>> = LazyLock::new(Default::default);

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a full submission: every required field must be present and non-blank.
    /// Returns the body reduced to model fields, with values coerced to their column types.
    pub fn validate(
        model: &ContentModel,
        body: &HashMap<String, Value>,
    ) -> Result<HashMap<String, Value>, FieldErrors> {
        check(model, body, true)
    }

    /// Validate only the fields present in body (for PATCH). Required is enforced only
    /// for present fields that are blank.
    pub fn validate_partial(
        model: &ContentModel,
        body: &HashMap<String, Value>,
    ) -> Result<HashMap<String, Value>, FieldErrors> {
        check(model, body, false)
    }
}

fn check(
    model: &ContentModel,
    body: &HashMap<String, Value>,
    full: bool,
) -> Result<HashMap<String, Value>, FieldErrors> {
    let mut errors = FieldErrors::default();
    let mut out = HashMap::new();
    for field in &model.fields {
        let Some(raw) = body.get(&field.name) else {
            if full && field.required {
                errors.push(&field.name, FieldErrorKind::Required);
            }
            continue;
        };
        match coerce(field, raw) {
            Ok(v) => {
                if field.required && is_blank(&v) {
                    errors.push(&field.name, FieldErrorKind::Required);
                } else {
                    out.insert(field.name.clone(), v);
                }
            }
            Err(kind) => errors.push(&field.name, kind),
        }
    }
    if errors.is_empty() {
        Ok(out)
    } else {
        Err(errors)
    }
}

pub(crate) fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Coerce one submitted value to the field's storage shape.
pub(crate) fn coerce(field: &FieldDef, raw: &Value) -> Result<Value, FieldErrorKind> {
    if raw.is_null() {
        return Ok(Value::Null);
    }
    match &field.kind {
        FieldKind::Text | FieldKind::Textarea | FieldKind::RichText => {
            let s = raw.as_str().ok_or(FieldErrorKind::WrongType)?;
            if let Some(max) = field.max_length {
                if s.chars().count() > max as usize {
                    return Err(FieldErrorKind::TooLong);
                }
            }
            if let Some(pattern) = &field.pattern {
                if !s.is_empty() {
                    if !pattern_matches(pattern, s).map_err(|_| FieldErrorKind::PatternMismatch)? {
                        return Err(FieldErrorKind::PatternMismatch);
                    }
                }
            }
            Ok(raw.clone())
        }
        FieldKind::Number => match raw {
            Value::Number(_) => Ok(raw.clone()),
            Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
            Value::String(s) => parse_number(s).ok_or(FieldErrorKind::InvalidNumber),
            _ => Err(FieldErrorKind::InvalidNumber),
        },
        FieldKind::Date => match raw {
            Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
            Value::String(s) => parse_date(s)
                .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
                .ok_or(FieldErrorKind::InvalidDate),
            _ => Err(FieldErrorKind::InvalidDate),
        },
        FieldKind::Boolean => parse_bool(raw).map(Value::Bool).ok_or(FieldErrorKind::InvalidBoolean),
        FieldKind::Select { options } => match raw {
            Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
            Value::String(s) => status::normalize(options, s)
                .map(|v| Value::String(v.to_string()))
                .ok_or(FieldErrorKind::NotAnOption),
            _ => Err(FieldErrorKind::NotAnOption),
        },
    }
}

fn pattern_matches(pattern: &str, s: &str) -> Result<bool, regex::Error> {
    if let Ok(cache) = PATTERNS.read() {
        if let Some(re) = cache.get(pattern) {
            return Ok(re.is_match(s));
        }
    }
    let re = Regex::new(pattern)?;
    let matched = re.is_match(s);
    if let Ok(mut cache) = PATTERNS.write() {
        cache.insert(pattern.to_string(), re);
    }
    Ok(matched)
}

/// Accepts `1500000`, `1 500 000`, `12,5` and `12.5`.
fn parse_number(s: &str) -> Option<Value> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{202f}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if let Ok(i) = cleaned.parse::<i64>() {
        return Some(Value::Number(i.into()));
    }
    let f = cleaned.parse::<f64>().ok()?;
    Number::from_f64(f).map(Value::Number)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
}

fn parse_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "1" | "yes" | "oui" => Some(true),
            "false" | "off" | "0" | "no" | "non" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
