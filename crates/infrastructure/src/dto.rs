//! Wire types for the REST API.
//!
//! Each type derives `TS` so the web client imports the same shapes.

mod common;
mod roles;
mod session;
mod users;

pub use common::ErrorResponse;
pub use roles::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
pub use session::SessionUserResponse;
pub use users::{CreateUserRequest, UpdateUserRolesRequest};
