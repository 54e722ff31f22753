use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    ConfirmationRequired,
    Conflict,
    Internal,
}

/// Per-field validation messages, keyed by the form field name.
pub type FieldMessages = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: FieldMessages,
    /// Where the caller should navigate next, e.g. back to a list view after
    /// an edit form was opened for a missing record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            fields: BTreeMap::new(),
            redirect: None,
        }
    }

    pub fn validation(fields: FieldMessages) -> Self {
        Self {
            fields,
            ..Self::new(ErrorCode::Validation, "please correct the highlighted fields")
        }
    }

    pub fn not_found(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            redirect: Some(redirect.into()),
            ..Self::new(ErrorCode::NotFound, message)
        }
    }

    pub fn confirmation_required(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfirmationRequired, message)
    }
}
