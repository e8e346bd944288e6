use std::sync::Arc;

use taskdeck_core::{AppError, AppResult};
use taskdeck_domain::{
    ActivityLogEntry, DashboardStats, RoleDefinition, SystemSettings, UserSummary,
};
use tracing::{info, warn};

use crate::{AdminRepository, Notifier, RoleStore, Toast};

/// Independently loaded parts of the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardSection {
    /// Headline counters.
    Stats,
    /// Role definitions.
    Roles,
    /// System settings.
    Settings,
    /// Recent activity.
    ActivityLogs,
    /// User table.
    Users,
}

impl DashboardSection {
    /// Returns a stable name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Roles => "roles",
            Self::Settings => "settings",
            Self::ActivityLogs => "activity_logs",
            Self::Users => "users",
        }
    }
}

/// A section that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFailure {
    /// Section that failed.
    pub section: DashboardSection,
    /// Failure cause.
    pub error: AppError,
}

/// Whatever resolved from one dashboard load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminDashboardSnapshot {
    /// Headline counters.
    pub stats: Option<DashboardStats>,
    /// Listable roles.
    pub roles: Option<Vec<RoleDefinition>>,
    /// System settings.
    pub settings: Option<SystemSettings>,
    /// Recent activity.
    pub activity_logs: Option<Vec<ActivityLogEntry>>,
    /// User table.
    pub users: Option<Vec<UserSummary>>,
    /// Sections that failed.
    pub failures: Vec<SectionFailure>,
}

impl AdminDashboardSnapshot {
    /// Returns whether every section loaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Loads the admin dashboard with all sections in flight together.
#[derive(Clone)]
pub struct AdminDashboardLoader {
    admin_repository: Arc<dyn AdminRepository>,
    role_store: RoleStore,
    notifier: Arc<dyn Notifier>,
    activity_log_limit: usize,
}

impl AdminDashboardLoader {
    /// Creates a loader.
    #[must_use]
    pub fn new(
        admin_repository: Arc<dyn AdminRepository>,
        role_store: RoleStore,
        notifier: Arc<dyn Notifier>,
        activity_log_limit: usize,
    ) -> Self {
        Self {
            admin_repository,
            role_store,
            notifier,
            activity_log_limit: activity_log_limit.max(1),
        }
    }

    /// Issues every fetch at once and waits for all of them.
    ///
    /// A failing section is recorded and toasted; the others still fill in.
    pub async fn load(&self) -> AdminDashboardSnapshot {
        let (stats, roles, settings, activity_logs, users) = tokio::join!(
            self.admin_repository.fetch_dashboard_stats(),
            self.load_roles(),
            self.admin_repository.fetch_settings(),
            self.admin_repository
                .fetch_activity_logs(self.activity_log_limit),
            self.admin_repository.list_users(),
        );

        let mut failures = Vec::new();
        let snapshot = AdminDashboardSnapshot {
            stats: self.capture(DashboardSection::Stats, stats, &mut failures),
            roles: self.capture(DashboardSection::Roles, roles, &mut failures),
            settings: self.capture(DashboardSection::Settings, settings, &mut failures),
            activity_logs: self.capture(
                DashboardSection::ActivityLogs,
                activity_logs,
                &mut failures,
            ),
            users: self.capture(DashboardSection::Users, users, &mut failures),
            failures,
        };

        info!(
            failed_sections = snapshot.failures.len(),
            "admin dashboard loaded"
        );

        snapshot
    }

    async fn load_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        self.role_store.fetch_roles().await?;
        Ok(self.role_store.valid_roles().await)
    }

    fn capture<T>(
        &self,
        section: DashboardSection,
        result: AppResult<T>,
        failures: &mut Vec<SectionFailure>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(section = section.as_str(), error = %error, "dashboard section failed");
                self.notifier.notify(Toast::from_error(&error));
                failures.push(SectionFailure { section, error });
                None
            }
        }
    }
}
