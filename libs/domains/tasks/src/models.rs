use chrono::{Local, NaiveDateTime};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Lifecycle status of a task, stored as its string name
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Task not started yet
    #[default]
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Task finished
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

/// Task entity - a persisted unit of work
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Store-generated identifier, immutable once assigned
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Set once at construction, never modified afterwards
    pub created_at: NaiveDateTime,
}

impl Task {
    /// Apply an update request: title and description only.
    /// Status and creation timestamp are untouched.
    pub fn apply_request(&mut self, request: TaskRequest) {
        self.title = request.title;
        self.description = request.description;
    }
}

/// A task that has not been persisted yet (no id assigned)
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: NaiveDateTime,
}

impl NewTask {
    /// Build a task from a create request.
    ///
    /// The status is always `Pending` no matter what the caller sent, and the
    /// creation timestamp is stamped here.
    pub fn from_request(request: TaskRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            status: TaskStatus::Pending,
            created_at: Local::now().naive_local(),
        }
    }
}

fn validate_title_not_blank(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("Title must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// DTO for create/update request bodies
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct TaskRequest {
    /// Task title, 3 to 75 characters
    #[validate(
        custom(function = "validate_title_not_blank"),
        length(min = 3, max = 75, message = "Title must be between 3 and 75 characters")
    )]
    pub title: String,
    /// Optional task description, at most 300 characters
    #[validate(length(max = 300, message = "Description cannot be longer than 300 characters"))]
    pub description: Option<String>,
}

/// DTO for task responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub task_status: TaskStatus,
    pub created_at: NaiveDateTime,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            task_status: task.status,
            created_at: task.created_at,
        }
    }
}

/// Query parameters for the status-update endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    /// New status for the task (PENDING or COMPLETED)
    pub task_status: String,
}
