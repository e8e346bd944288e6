use serde::Serialize;
use taskdeck_domain::NewUserInput;
use ts_rs::TS;

/// Request body sent to `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "api/create-user-request.ts")]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Role names assigned at creation.
    pub roles: Vec<String>,
}

impl From<NewUserInput> for CreateUserRequest {
    fn from(value: NewUserInput) -> Self {
        Self {
            name: value.name.into(),
            email: value.email.into(),
            roles: value.roles,
        }
    }
}

/// Request body sent to `PATCH /users/:id` to replace role names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "api/update-user-roles-request.ts")]
pub struct UpdateUserRolesRequest {
    /// Complete list of role names.
    pub roles: Vec<String>,
}
