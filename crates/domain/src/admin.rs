//! Read models backing the admin dashboard.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Headline counters on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    /// Registered users.
    pub total_users: u64,
    /// Users active in the last 30 days.
    pub active_users: u64,
    /// Projects not archived.
    pub total_projects: u64,
    /// Tasks not done.
    pub open_tasks: u64,
    /// Tasks done.
    pub completed_tasks: u64,
    /// Notes across all projects.
    pub total_notes: u64,
}

/// Key/value system settings as stored by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemSettings(pub BTreeMap<String, Value>);

impl SystemSettings {
    /// Returns a setting value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a boolean setting, if present and boolean.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }
}

/// One row of the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    /// Entry identifier.
    pub id: String,
    /// Acting user id, absent for system actions.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Stable action key, e.g. `role.created`.
    pub action: String,
    /// Affected resource type.
    #[serde(default)]
    pub resource_type: Option<String>,
    /// Affected resource id.
    #[serde(default)]
    pub resource_id: Option<String>,
    /// Human detail.
    #[serde(default)]
    pub details: Option<String>,
    /// Event time.
    pub created_at: DateTime<Utc>,
}

/// Service health state reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    /// Everything responds.
    Healthy,
    /// Some dependency is slow or failing.
    Degraded,
    /// The API cannot serve requests.
    Down,
}

/// Health check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Overall state.
    pub status: HealthState,
    /// Per-dependency states, e.g. `database`.
    #[serde(default)]
    pub checks: BTreeMap<String, HealthState>,
    /// Server uptime.
    #[serde(default)]
    pub uptime_seconds: Option<u64>,
    /// Server version string.
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    /// Returns whether the API reports itself fully healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == HealthState::Healthy
    }
}

/// Aggregated numbers for the reports screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSummary {
    /// Tasks completed in the reporting window.
    pub tasks_completed: u64,
    /// Tasks created in the reporting window.
    pub tasks_created: u64,
    /// Tasks past due.
    pub overdue_tasks: u64,
    /// Completion ratio between 0 and 1.
    pub completion_rate: f64,
    /// Completed task count per project id.
    pub completed_by_project: BTreeMap<String, u64>,
}
