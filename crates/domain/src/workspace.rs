//! Projects, tasks and notes served by the REST layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_core::{AppError, AppResult, NonEmptyString};

const TITLE_MAX_LENGTH: usize = 200;

fn validated_title(field: &str, value: impl Into<String>) -> AppResult<String> {
    let value = NonEmptyString::new(value)
        .map_err(|_| AppError::Validation(format!("{field} is required")))?;
    let value = value.as_str().trim();

    if value.chars().count() > TITLE_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "{field} must not exceed {TITLE_MAX_LENGTH} characters"
        )));
    }

    Ok(value.to_owned())
}

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work is ongoing.
    #[default]
    Active,
    /// Temporarily paused.
    OnHold,
    /// Delivered.
    Completed,
    /// Hidden from default listings.
    Archived,
}

/// Project read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Server-assigned identifier.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Lifecycle state.
    #[serde(default)]
    pub status: ProjectStatus,
    /// Owner user id.
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Target completion date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create payload for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    /// Project name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target completion date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl NewProject {
    /// Validates a project name.
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            name: validated_title("project name", name)?,
            description: None,
            due_date: None,
        })
    }
}

/// Partial update for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New lifecycle state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    /// New due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Task workflow state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Waiting for review.
    Review,
    /// Finished.
    Done,
}

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal.
    #[default]
    Medium,
    /// Should be picked next.
    High,
    /// Drop everything.
    Urgent,
}

/// Task read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier.
    pub id: String,
    /// Owning project.
    pub project_id: String,
    /// Task title.
    pub title: String,
    /// Optional body.
    #[serde(default)]
    pub description: Option<String>,
    /// Workflow state.
    #[serde(default)]
    pub status: TaskStatus,
    /// Urgency.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Assigned user id.
    #[serde(default)]
    pub assignee_id: Option<String>,
    /// Due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Create payload for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Owning project.
    pub project_id: String,
    /// Task title.
    pub title: String,
    /// Urgency.
    pub priority: TaskPriority,
    /// Optional body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Assigned user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// Validates the project reference and title.
    pub fn new(project_id: impl Into<String>, title: impl Into<String>) -> AppResult<Self> {
        let project_id = NonEmptyString::new(project_id)
            .map_err(|_| AppError::Validation("task project is required".to_owned()))?;

        Ok(Self {
            project_id: project_id.into(),
            title: validated_title("task title", title)?,
            priority: TaskPriority::default(),
            description: None,
            assignee_id: None,
            due_date: None,
        })
    }
}

/// Partial update for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New workflow state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New urgency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// New assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// New due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Note read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Server-assigned identifier.
    pub id: String,
    /// Note title.
    pub title: String,
    /// Markdown body.
    #[serde(default)]
    pub content: String,
    /// Optional project link.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Pinned notes sort first.
    #[serde(default)]
    pub is_pinned: bool,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create payload for a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    /// Note title.
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Optional project link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl NewNote {
    /// Validates the title; the body may be empty.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            title: validated_title("note title", title)?,
            content: content.into(),
            project_id: None,
        })
    }
}

/// Partial update for a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Pin state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}
