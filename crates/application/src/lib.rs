//! Application services and ports.

#![forbid(unsafe_code)]

mod admin_dashboard;
mod admin_ports;
mod health_monitor;
mod notification_ports;
mod permission_evaluator;
mod role_actions;
mod role_ports;
mod role_store;
mod session_context;

pub use admin_dashboard::{
    AdminDashboardLoader, AdminDashboardSnapshot, DashboardSection, SectionFailure,
};
pub use admin_ports::AdminRepository;
pub use health_monitor::{HealthMonitor, HealthReading};
pub use notification_ports::{Notifier, Toast, ToastLevel};
pub use permission_evaluator::PermissionEvaluator;
pub use role_actions::{ActionOutcome, DialogOutcome, RoleActions};
pub use role_ports::{CreateRoleInput, NewRole, RolePatch, RoleRepository};
pub use role_store::RoleStore;
pub use session_context::SessionContext;
