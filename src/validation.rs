use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

/// First failing field of a payload, reported back to the client as-is.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub type FieldResult<T> = Result<T, FieldError>;

pub fn is_valid_mail(mail: &str) -> bool {
    lazy_static! {
        static ref MAIL_RE: Regex =
            Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)+$").unwrap();
    }
    MAIL_RE.is_match(mail)
}

pub fn payload_object(payload: &Value) -> FieldResult<&Map<String, Value>> {
    payload
        .as_object()
        .ok_or_else(|| FieldError::new("body", "must be a JSON object"))
}

/// Absent and null both count as "not provided"; empty strings never pass.
pub fn optional_string(obj: &Map<String, Value>, field: &'static str) -> FieldResult<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Err(FieldError::new(field, "must not be empty")),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(FieldError::new(field, "must be a string")),
    }
}

pub fn required_string(obj: &Map<String, Value>, field: &'static str) -> FieldResult<String> {
    optional_string(obj, field)?.ok_or_else(|| FieldError::new(field, "is required"))
}

pub fn optional_mail(obj: &Map<String, Value>, field: &'static str) -> FieldResult<Option<String>> {
    match optional_string(obj, field)? {
        Some(mail) if !is_valid_mail(&mail) => Err(FieldError::new(field, "incorrect format")),
        other => Ok(other),
    }
}

pub fn required_mail(obj: &Map<String, Value>, field: &'static str) -> FieldResult<String> {
    optional_mail(obj, field)?.ok_or_else(|| FieldError::new(field, "is required"))
}

/// Ids arrive as JSON integers, but some clients send them as decimal
/// strings, so both are accepted.
pub fn required_id(obj: &Map<String, Value>, field: &'static str) -> FieldResult<i64> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(FieldError::new(field, "is required")),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| FieldError::new(field, "must be an integer")),
        Some(Value::String(s)) => s
            .parse::<i64>()
            .map_err(|_| FieldError::new(field, "must be an integer")),
        Some(_) => Err(FieldError::new(field, "must be an integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn mail_pattern_accepts_plain_addresses() {
        assert!(is_valid_mail("a@b.com"));
        assert!(is_valid_mail("jon.79555@gmail.com"));
        assert!(is_valid_mail("user_name+tag@mail.example.co"));
    }

    #[test]
    fn mail_pattern_rejects_missing_at_or_domain_dot() {
        assert!(!is_valid_mail("plainaddress"));
        assert!(!is_valid_mail("a@b"));
        assert!(!is_valid_mail("a@.com"));
        assert!(!is_valid_mail("@example.com"));
        assert!(!is_valid_mail("a b@example.com"));
    }

    #[test]
    fn required_string_reports_missing_and_empty() {
        let payload = obj(json!({ "name": "" }));
        let err = required_string(&payload, "name").unwrap_err();
        assert_eq!(err.message, "must not be empty");

        let err = required_string(&payload, "second_name").unwrap_err();
        assert_eq!(err.message, "is required");
    }

    #[test]
    fn optional_string_passes_through_absent_fields() {
        let payload = obj(json!({ "name": "user_1", "mail": null }));
        assert_eq!(
            optional_string(&payload, "name").unwrap(),
            Some("user_1".to_string())
        );
        assert_eq!(optional_string(&payload, "mail").unwrap(), None);
        assert_eq!(optional_string(&payload, "password").unwrap(), None);
    }

    #[test]
    fn optional_string_rejects_non_string_values() {
        let payload = obj(json!({ "name": 5 }));
        let err = optional_string(&payload, "name").unwrap_err();
        assert_eq!(err.message, "must be a string");
    }

    #[test]
    fn required_id_coerces_numeric_strings() {
        let payload = obj(json!({ "user_id": "17" }));
        assert_eq!(required_id(&payload, "user_id").unwrap(), 17);

        let payload = obj(json!({ "user_id": 3 }));
        assert_eq!(required_id(&payload, "user_id").unwrap(), 3);
    }

    #[test]
    fn required_id_rejects_garbage() {
        let payload = obj(json!({ "user_id": "seventeen" }));
        assert!(required_id(&payload, "user_id").is_err());

        let payload = obj(json!({ "user_id": 1.5 }));
        assert!(required_id(&payload, "user_id").is_err());

        let payload = obj(json!({}));
        let err = required_id(&payload, "user_id").unwrap_err();
        assert_eq!(err.message, "is required");
    }

    #[test]
    fn payload_must_be_an_object() {
        assert!(payload_object(&json!([1, 2])).is_err());
        assert!(payload_object(&json!({})).is_ok());
    }
}
