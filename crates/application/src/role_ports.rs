use async_trait::async_trait;

use taskdeck_core::AppResult;
use taskdeck_domain::{PermissionSet, RoleDefinition, RoleId};

/// Raw form values for creating a role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Machine key.
    pub name: String,
    /// Human label.
    pub display_name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional hex badge color.
    pub color: Option<String>,
    /// Requested grants.
    pub permissions: PermissionSet,
}

/// Validated create request sent to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    /// Validated machine key.
    pub name: String,
    /// Trimmed human label.
    pub display_name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Normalized hex badge color.
    pub color: String,
    /// Deduplicated grants.
    pub permissions: PermissionSet,
}

/// Partial role update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePatch {
    /// New machine key.
    pub name: Option<String>,
    /// New human label.
    pub display_name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New badge color.
    pub color: Option<String>,
    /// Replacement grant set.
    pub permissions: Option<PermissionSet>,
}

impl RolePatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.display_name.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.permissions.is_none()
    }

    /// Drops the fields a system role may not change.
    #[must_use]
    pub fn without_identity_fields(self) -> Self {
        Self {
            name: None,
            display_name: None,
            ..self
        }
    }
}

/// Remote port for role definitions.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Lists every role definition.
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>>;

    /// Creates a role; the server assigns its id.
    async fn create_role(&self, role: NewRole) -> AppResult<RoleDefinition>;

    /// Applies a partial update and returns the stored role.
    async fn update_role(&self, role_id: &RoleId, patch: RolePatch) -> AppResult<RoleDefinition>;

    /// Deletes a role.
    async fn delete_role(&self, role_id: &RoleId) -> AppResult<()>;
}
