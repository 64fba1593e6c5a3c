use serde::Deserialize;
use serde::Serialize;

use super::Failure;
use super::Validate;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub account_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskScope {
    pub account_id: String,
}

impl TaskScope {
    pub fn new(account_id: &str) -> TaskScope {
        return TaskScope {
            account_id: account_id.to_string(),
        };
    }

    pub fn path(&self) -> String {
        return format!("/accounts/{}/tasks", self.account_id);
    }
}

impl Validate for TaskScope {
    fn validate(&self) -> Result<(), Failure> {
        if self.account_id.trim().is_empty() {
            return Err(Failure::validation_gap("account_id"));
        }

        return Ok(());
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskParams {
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskParams {
    pub title: String,
    pub description: String,
}

fn validate_title_and_description(title: &str, description: &str) -> Result<(), Failure> {
    if title.trim().is_empty() {
        return Err(Failure::validation_gap("title"));
    }
    if description.trim().is_empty() {
        return Err(Failure::validation_gap("description"));
    }

    return Ok(());
}

impl Validate for CreateTaskParams {
    fn validate(&self) -> Result<(), Failure> {
        return validate_title_and_description(&self.title, &self.description);
    }
}

impl Validate for UpdateTaskParams {
    fn validate(&self) -> Result<(), Failure> {
        return validate_title_and_description(&self.title, &self.description);
    }
}
