use serde::Deserialize;
use serde::Serialize;

use super::Failure;
use super::Validate;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub task_id: String,
    pub account_id: String,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Comments are scoped by both the owning account and the owning task.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommentScope {
    pub account_id: String,
    pub task_id: String,
}

impl CommentScope {
    pub fn new(account_id: &str, task_id: &str) -> CommentScope {
        return CommentScope {
            account_id: account_id.to_string(),
            task_id: task_id.to_string(),
        };
    }

    pub fn path(&self) -> String {
        return format!(
            "/accounts/{}/tasks/{}/comments",
            self.account_id, self.task_id
        );
    }
}

impl Validate for CommentScope {
    fn validate(&self) -> Result<(), Failure> {
        if self.account_id.trim().is_empty() {
            return Err(Failure::validation_gap("account_id"));
        }
        if self.task_id.trim().is_empty() {
            return Err(Failure::validation_gap("task_id"));
        }

        return Ok(());
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommentParams {
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCommentParams {
    pub content: String,
}

impl Validate for CreateCommentParams {
    fn validate(&self) -> Result<(), Failure> {
        if self.content.trim().is_empty() {
            return Err(Failure::validation_gap("content"));
        }

        return Ok(());
    }
}

impl Validate for UpdateCommentParams {
    fn validate(&self) -> Result<(), Failure> {
        if self.content.trim().is_empty() {
            return Err(Failure::validation_gap("content"));
        }

        return Ok(());
    }
}
