//! Declarative field tables and payload validation.
//!
//! Each document type lists its fields with a [`FieldKind`] and whether the
//! field is required. Incoming JSON is checked against that table before it
//! is deserialized, so that every offending field is reported at once and
//! nothing invalid reaches storage.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::models::timestamp;

/// The shape a field's JSON value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    /// Integer >= 0.
    Count,
    Boolean,
    Timestamp,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    TextList,
    /// Object whose values are strings, numbers or booleans.
    ScalarMap,
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false }
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Check `object` against `fields`, collecting every violation.
pub fn validate(fields: &[FieldSpec], object: &Map<String, Value>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for spec in fields {
        match object.get(spec.name) {
            None | Some(Value::Null) if spec.required => {
                errors.push(FieldError::new(spec.name, "field required"));
            }
            None | Some(Value::Null) => {}
            Some(value) => {
                if let Err(message) = check_kind(spec.kind, value) {
                    errors.push(FieldError::new(spec.name, message));
                }
            }
        }
    }

    errors
}

fn check_kind(kind: FieldKind, value: &Value) -> Result<(), String> {
    match kind {
        FieldKind::Text => value
            .as_str()
            .map(|_| ())
            .ok_or_else(|| "expected a string".to_string()),
        FieldKind::Integer => match value.as_i64() {
            Some(n) if i32::try_from(n).is_ok() => Ok(()),
            Some(_) => Err("expected a 32-bit integer".to_string()),
            None if value.is_u64() => Err("expected a 32-bit integer".to_string()),
            None => Err("expected an integer".to_string()),
        },
        FieldKind::Count => match value.as_u64() {
            Some(n) if n <= u32::MAX as u64 => Ok(()),
            _ => Err("expected a non-negative integer".to_string()),
        },
        FieldKind::Boolean => value
            .as_bool()
            .map(|_| ())
            .ok_or_else(|| "expected a boolean".to_string()),
        FieldKind::Timestamp => match value.as_str().and_then(timestamp::parse) {
            Some(_) => Ok(()),
            None => Err("expected an ISO 8601 date-time".to_string()),
        },
        FieldKind::Date => match value.as_str() {
            Some(raw) if chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() => Ok(()),
            _ => Err("expected a date (YYYY-MM-DD)".to_string()),
        },
        FieldKind::TextList => match value.as_array() {
            Some(items) if items.iter().all(Value::is_string) => Ok(()),
            _ => Err("expected a list of strings".to_string()),
        },
        FieldKind::ScalarMap => match value.as_object() {
            Some(map) => match map.iter().find(|(_, v)| !is_scalar(v)) {
                Some((key, _)) => Err(format!(
                    "value for key '{key}' must be a string, number or boolean"
                )),
                None => Ok(()),
            },
            None => Err("expected an object".to_string()),
        },
        FieldKind::OneOf(allowed) => match value.as_str() {
            Some(raw) if allowed.contains(&raw) => Ok(()),
            _ => Err(format!("value must be one of: {}", allowed.join(", "))),
        },
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Validate a raw JSON payload against `fields` and deserialize it.
///
/// Defaults declared on `T` (identifiers, timestamps, flags) are applied by
/// deserialization, after validation has passed.
pub fn parse<T: DeserializeOwned>(fields: &[FieldSpec], payload: Value) -> Result<T, Vec<FieldError>> {
    let Value::Object(object) = payload else {
        return Err(vec![FieldError::new("body", "expected a JSON object")]);
    };

    let errors = validate(fields, &object);
    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(Value::Object(object))
        .map_err(|err| vec![FieldError::new("body", err.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("sport", FieldKind::OneOf(&["football", "hockey"])),
        FieldSpec::optional("jersey_number", FieldKind::Count),
        FieldSpec::optional("tags", FieldKind::TextList),
        FieldSpec::optional("stats", FieldKind::ScalarMap),
        FieldSpec::optional("kickoff", FieldKind::Timestamp),
        FieldSpec::optional("joined", FieldKind::Date),
        FieldSpec::optional("founded", FieldKind::Integer),
    ];

    fn errors_for(value: Value) -> Vec<FieldError> {
        validate(FIELDS, value.as_object().unwrap())
    }

    #[test]
    fn accepts_minimal_payload() {
        assert!(errors_for(json!({"name": "Falcons", "sport": "hockey"})).is_empty());
    }

    #[test]
    fn reports_every_missing_required_field() {
        let errors = errors_for(json!({"jersey_number": 9}));
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "sport"]);
        assert!(errors.iter().all(|e| e.message == "field required"));
    }

    #[test]
    fn null_counts_as_missing_only_for_required_fields() {
        let errors = errors_for(json!({"name": null, "sport": "football", "tags": null}));
        assert_eq!(errors, vec![FieldError::new("name", "field required")]);
    }

    #[test]
    fn rejects_value_outside_enum() {
        let errors = errors_for(json!({"name": "Falcons", "sport": "cricket"}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "sport");
        assert!(errors[0].message.contains("football, hockey"));
    }

    #[test]
    fn rejects_wrong_shapes() {
        let errors = errors_for(json!({
            "name": 12,
            "sport": "hockey",
            "jersey_number": -4,
            "tags": ["a", 1],
            "stats": {"goals": 3, "nested": {"x": 1}},
            "kickoff": "soon",
            "joined": "2026-13-40",
        }));
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "jersey_number", "tags", "stats", "kickoff", "joined"]);
        assert!(errors[3].message.contains("nested"));
    }

    #[test]
    fn integers_must_fit_in_32_bits() {
        let ok = errors_for(json!({"name": "Falcons", "sport": "hockey", "founded": -1902}));
        assert!(ok.is_empty());

        for founded in [json!(5_000_000_000i64), json!(u64::MAX), json!(1902.5)] {
            let errors = errors_for(json!({"name": "Falcons", "sport": "hockey", "founded": founded}));
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "founded");
        }
    }

    #[test]
    fn stats_map_accepts_mixed_scalars() {
        let errors = errors_for(json!({
            "name": "Falcons",
            "sport": "hockey",
            "stats": {"goals": 12, "avg": 0.4, "captain": true, "hand": "left"},
        }));
        assert!(errors.is_empty());
    }

    #[test]
    fn parse_rejects_non_object_body() {
        let err = parse::<Value>(FIELDS, json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(err, vec![FieldError::new("body", "expected a JSON object")]);
    }
}
