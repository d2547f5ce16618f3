//! Wire types for the todo procedures and the input constraints shared by the
//! server router and the client pre-check.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{clock::Timestamp, db::entities::todo};

/// Length rule for a free-text field, measured in characters after trimming.
#[derive(Debug, Clone, Copy)]
pub struct TextConstraint {
    pub field: &'static str,
    pub min_chars: usize,
    pub max_chars: usize,
    pub empty_message: &'static str,
    pub too_long_message: &'static str,
}

pub const TODO_TEXT: TextConstraint = TextConstraint {
    field: "text",
    min_chars: 1,
    max_chars: 500,
    empty_message: "Todo text cannot be empty",
    too_long_message: "Todo text too long",
};

impl TextConstraint {
    /// Returns the trimmed value when it satisfies the constraint.
    pub fn check<'a>(&self, raw: &'a str) -> Result<&'a str, ValidationError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len < self.min_chars {
            return Err(ValidationError::new(self.field, self.empty_message));
        }
        if len > self.max_chars {
            return Err(ValidationError::new(self.field, self.too_long_message));
        }
        Ok(trimmed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Todo text that already passed [`TODO_TEXT`]. Deserializing checks it too,
/// so a request body holding an invalid text never decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoText(String);

impl TodoText {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        TODO_TEXT.check(raw).map(|text| Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TodoText {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TodoText> for String {
    fn from(value: TodoText) -> Self {
        value.0
    }
}

impl fmt::Display for TodoText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoInput {
    pub text: TodoText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodoTextInput {
    pub id: i32,
    pub text: TodoText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleTodoCompletionInput {
    pub id: i32,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTodoInput {
    pub id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i32,
    pub text: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: Timestamp,
}

impl From<todo::Model> for Todo {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            completed: model.completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
