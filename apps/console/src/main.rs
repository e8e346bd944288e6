//! Taskdeck headless admin console.

#![forbid(unsafe_code)]

mod config;

use std::sync::Arc;

use taskdeck_application::{
    AdminDashboardLoader, AdminDashboardSnapshot, AdminRepository, HealthMonitor, HealthReading,
    Notifier, RoleRepository, RoleStore, SessionContext, Toast,
};
use taskdeck_core::{AppError, AppResult};
use taskdeck_domain::permission_groups;
use taskdeck_infrastructure::{
    HttpAdminRepository, HttpApiClient, HttpRoleRepository, HttpSessionService,
    InMemoryRoleRepository, TracingNotifier,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ConsoleConfig;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ConsoleConfig::load()?;

    let session = SessionContext::new();
    let client = HttpApiClient::new(&config.api, session.clone())?;
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier::new());
    let admin_repository: Arc<dyn AdminRepository> =
        Arc::new(HttpAdminRepository::new(client.clone()));
    let role_repository: Arc<dyn RoleRepository> = if config.offline_roles {
        Arc::new(InMemoryRoleRepository::with_system_roles())
    } else {
        Arc::new(HttpRoleRepository::new(client.clone()))
    };
    let role_store = RoleStore::new(role_repository);

    info!(
        api_base_url = %config.api.base_url(),
        offline_roles = config.offline_roles,
        health_poll_interval_ms =
            u64::try_from(config.health_poll_interval.as_millis()).unwrap_or(u64::MAX),
        "taskdeck-console started"
    );

    if let Some(access_token) = config.access_token.clone()
        && let Err(error) = HttpSessionService::new(client.clone())
            .establish(access_token)
            .await
    {
        notifier.notify(Toast::from_error(&error));
    }

    let loader = AdminDashboardLoader::new(
        admin_repository.clone(),
        role_store.clone(),
        notifier,
        config.activity_log_limit,
    );
    let snapshot = loader.load().await;
    report_dashboard(&snapshot);
    report_access(&session, &role_store).await;

    run_health_monitor(admin_repository, &config).await
}

fn report_dashboard(snapshot: &AdminDashboardSnapshot) {
    if let Some(stats) = &snapshot.stats {
        info!(
            total_users = stats.total_users,
            total_projects = stats.total_projects,
            open_tasks = stats.open_tasks,
            "dashboard stats"
        );
    }

    if let Some(roles) = &snapshot.roles {
        for role in roles {
            info!(
                role = %role.name,
                label = %role.display_name(),
                color = role.badge_color(),
                permissions = role.permissions.len(),
                system = role.is_system,
                "role"
            );
        }
    }

    if let Some(users) = &snapshot.users {
        info!(count = users.len(), "users loaded");
    }

    if let Some(activity_logs) = &snapshot.activity_logs {
        info!(count = activity_logs.len(), "activity loaded");
    }

    for failure in &snapshot.failures {
        warn!(
            section = failure.section.as_str(),
            error = %failure.error,
            "dashboard section unavailable"
        );
    }
}

async fn report_access(session: &SessionContext, role_store: &RoleStore) {
    let user = session.current_user().await;
    let evaluator = role_store.evaluator_for(user.as_ref()).await;

    let Some(user) = evaluator.user() else {
        info!("no session; every permission check is denied");
        return;
    };

    info!(
        user_id = %user.user_id(),
        roles = ?user.role_names(),
        is_admin = evaluator.is_admin(),
        is_super_admin = evaluator.is_super_admin(),
        "session access"
    );

    for group in permission_groups() {
        let granted: Vec<&str> = group
            .permissions
            .iter()
            .filter(|permission| evaluator.can(**permission))
            .map(|permission| permission.as_str())
            .collect();
        info!(group = group.label, granted = ?granted, "permission group");
    }
}

async fn run_health_monitor(
    admin_repository: Arc<dyn AdminRepository>,
    config: &ConsoleConfig,
) -> AppResult<()> {
    let monitor = HealthMonitor::spawn(admin_repository, config.health_poll_interval)?;
    let mut readings = monitor.subscribe();

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(error) = signal {
                    warn!(error = %error, "failed to listen for shutdown signal");
                }
                break;
            }
            changed = readings.changed() => {
                if changed.is_err() {
                    break;
                }

                let reading = readings.borrow_and_update().clone();
                match reading {
                    HealthReading::Pending => {}
                    HealthReading::Reported(status) => info!(
                        healthy = status.is_healthy(),
                        version = status.version.as_deref().unwrap_or("unknown"),
                        "api health"
                    ),
                    HealthReading::Unreachable(message) => {
                        warn!(message = %message, "api unreachable");
                    }
                }
            }
        }
    }

    monitor.shutdown().await;
    info!("taskdeck-console stopped");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
