//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod dto;
mod http_admin_repository;
mod http_api_client;
mod http_note_service;
mod http_project_service;
mod http_report_service;
mod http_role_repository;
mod http_session_service;
mod http_task_service;
mod http_user_service;
mod in_memory_role_repository;
mod tracing_notifier;

#[cfg(test)]
mod test_support;

pub use dto::{
    CreateRoleRequest, CreateUserRequest, ErrorResponse, RoleResponse, SessionUserResponse,
    UpdateRoleRequest, UpdateUserRolesRequest,
};
pub use http_admin_repository::HttpAdminRepository;
pub use http_api_client::{ApiClientConfig, HttpApiClient, normalize_error_response};
pub use http_note_service::HttpNoteService;
pub use http_project_service::HttpProjectService;
pub use http_report_service::HttpReportService;
pub use http_role_repository::HttpRoleRepository;
pub use http_session_service::HttpSessionService;
pub use http_task_service::{HttpTaskService, TaskListFilter};
pub use http_user_service::HttpUserService;
pub use in_memory_role_repository::InMemoryRoleRepository;
pub use tracing_notifier::TracingNotifier;
