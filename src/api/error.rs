use std::fmt;

use thiserror::Error;

/// What the client was trying to do when a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    FetchContacts,
    FetchContact,
    SaveContact,
    UpdateContact,
    UpdateImage,
    DeleteContact,
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ApiAction::FetchContacts => "fetch contacts",
            ApiAction::FetchContact => "fetch contact",
            ApiAction::SaveContact => "save contact",
            ApiAction::UpdateContact => "update contact",
            ApiAction::UpdateImage => "update image",
            ApiAction::DeleteContact => "delete contact",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// a request failed in transport or the backend answered with a non-success status
    #[error("Failed to {action}: {message}{}", status_suffix(.status))]
    Request {
        action: ApiAction,
        message: String,
        status: Option<u16>,
    },

    #[error("Invalid API url {0}: {1}")]
    InvalidBaseUrl(String, String),
}

impl ApiError {
    pub fn request(action: ApiAction, message: impl Into<String>, status: Option<u16>) -> Self {
        ApiError::Request {
            action,
            message: message.into(),
            status,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => *status,
            ApiError::InvalidBaseUrl(..) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (Status: {code})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_includes_status_when_known() {
        let err = ApiError::request(ApiAction::FetchContacts, "Not Found", Some(404));
        assert_eq!(err.to_string(), "Failed to fetch contacts: Not Found (Status: 404)");
        assert!(err.is_not_found());
    }

    #[test]
    fn message_without_status() {
        let err = ApiError::request(ApiAction::DeleteContact, "connection refused", None);
        assert_eq!(err.to_string(), "Failed to delete contact: connection refused");
    }
}
