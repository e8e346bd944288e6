//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod admin;
mod role;
mod security;
mod user;
mod workspace;

pub use admin::{
    ActivityLogEntry, DashboardStats, HealthState, HealthStatus, ReportSummary, SystemSettings,
};
pub use role::{
    ADMIN_ROLE, DEFAULT_ROLE_COLOR, MEMBER_ROLE, RoleColor, RoleDefinition, RoleId, RoleName,
    SUPER_ADMIN_ROLE, UNKNOWN_ROLE_LABEL, role_display_name,
};
pub use security::{
    Permission, PermissionCategory, PermissionGroup, PermissionSet, permission_groups,
};
pub use user::{EmailAddress, NewUserInput, UserId, UserSummary};
pub use workspace::{
    NewNote, NewProject, NewTask, Note, NotePatch, Project, ProjectPatch, ProjectStatus, Task,
    TaskPatch, TaskPriority, TaskStatus,
};
