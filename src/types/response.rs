use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{FieldErrors, UserResponse};

/// Uniform response wrapper: `{message?, data?: {total?, users?, user?, errors?}}`.
///
/// Absent members are omitted from the serialized JSON.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<EnvelopeData>,
}

/// Payload section of the envelope
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct EnvelopeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
}

impl Envelope {
    /// Message-only envelope
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data: None,
        }
    }

    /// Envelope carrying a single user
    pub fn user(user: impl Into<UserResponse>) -> Self {
        Self {
            message: None,
            data: Some(EnvelopeData {
                user: Some(user.into()),
                ..Default::default()
            }),
        }
    }

    /// Envelope carrying one page of users and the overall total
    pub fn users(users: Vec<UserResponse>, total: u64) -> Self {
        Self {
            message: None,
            data: Some(EnvelopeData {
                total: Some(total),
                users: Some(users),
                ..Default::default()
            }),
        }
    }

    /// Attach a message to an existing envelope
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach validation errors
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.data.get_or_insert_with(EnvelopeData::default).errors = Some(errors);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only() {
        let json = serde_json::to_value(Envelope::message("User deleted successfully.")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "User deleted successfully." })
        );
    }

    #[test]
    fn test_empty_listing_keeps_total_and_users() {
        let json = serde_json::to_value(Envelope::users(vec![], 0)).unwrap();
        assert_eq!(json, serde_json::json!({ "data": { "total": 0, "users": [] } }));
    }

    #[test]
    fn test_errors_create_data_section() {
        let mut errors = FieldErrors::new();
        errors.add("name", "can't be blank");

        let json = serde_json::to_value(Envelope::message("failed").with_errors(errors)).unwrap();
        assert_eq!(json["data"]["errors"]["name"][0], "can't be blank");
        assert!(json["data"].get("user").is_none());
    }
}
