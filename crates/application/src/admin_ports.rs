use async_trait::async_trait;

use taskdeck_core::AppResult;
use taskdeck_domain::{ActivityLogEntry, DashboardStats, HealthStatus, SystemSettings, UserSummary};

/// Remote port for the admin screens.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Loads headline counters.
    async fn fetch_dashboard_stats(&self) -> AppResult<DashboardStats>;

    /// Loads system settings.
    async fn fetch_settings(&self) -> AppResult<SystemSettings>;

    /// Loads the most recent activity log entries.
    async fn fetch_activity_logs(&self, limit: usize) -> AppResult<Vec<ActivityLogEntry>>;

    /// Lists users for the admin user table.
    async fn list_users(&self) -> AppResult<Vec<UserSummary>>;

    /// Checks API health.
    async fn fetch_health(&self) -> AppResult<HealthStatus>;
}
