//! Field-level validation error map.

use std::collections::BTreeMap;

use serde::Serialize;

/// Validation messages keyed by field name.
///
/// Collects every violation found during validation, not just the first.
/// Serializes as a plain JSON object: `{"email": ["can't be blank"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to a field's list.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for a field (empty when none).
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no field carries a message.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Names of fields that carry at least one message.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(field, _)| field.as_str())
    }

    /// Merge the output of a `validator` derive into this map.
    pub fn extend_from(&mut self, errors: &validator::ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                self.add(field.to_string(), message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_every_message() {
        let mut errors = FieldErrors::new();
        errors.add("username", "can't be blank");
        errors.add("username", "is already taken");

        assert_eq!(errors.get("username"), ["can't be blank", "is already taken"]);
        assert!(errors.get("email").is_empty());
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_serializes_as_object() {
        let mut errors = FieldErrors::new();
        errors.add("email", "is already taken");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "email": ["is already taken"] }));
    }
}
