//! Client-side Validation
//!
//! Checks that run before any request; failures never reach the backend.

use crate::error::ValidationError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// The backend rejects longer chat messages
pub const MAX_CHAT_MESSAGE_LEN: usize = 2000;

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Same order as the form reports them: missing, too short, mismatch
pub fn validate_signup(email: &str, password: &str, confirm_password: &str) -> Result<(), ValidationError> {
    validate_login(email, password)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Trimmed chat message ready to send
pub fn validate_chat_message(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    if trimmed.chars().count() > MAX_CHAT_MESSAGE_LEN {
        return Err(ValidationError::MessageTooLong);
    }
    Ok(trimmed)
}

/// Title and description of a task as typed into a form, normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
}

impl TaskDraft {
    /// Trim both fields; a blank description becomes `None`
    pub fn new(title: &str, description: &str) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let description = description.trim();
        Ok(Self {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}
