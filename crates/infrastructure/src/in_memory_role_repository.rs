use async_trait::async_trait;
use taskdeck_application::{NewRole, RolePatch, RoleRepository};
use taskdeck_core::{AppError, AppResult};
use taskdeck_domain::{
    ADMIN_ROLE, MEMBER_ROLE, Permission, PermissionSet, RoleDefinition, RoleId, SUPER_ADMIN_ROLE,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// In-memory role catalog used for offline runs.
///
/// Mirrors the API rules: names are unique, system roles cannot be renamed
/// or deleted, and ids are assigned on create.
pub struct InMemoryRoleRepository {
    roles: RwLock<Vec<RoleDefinition>>,
}

impl InMemoryRoleRepository {
    /// Creates a catalog holding only the given roles.
    #[must_use]
    pub fn new(roles: Vec<RoleDefinition>) -> Self {
        Self {
            roles: RwLock::new(roles),
        }
    }

    /// Creates a catalog seeded with the built-in system roles.
    #[must_use]
    pub fn with_system_roles() -> Self {
        Self::new(system_roles())
    }
}

impl Default for InMemoryRoleRepository {
    fn default() -> Self {
        Self::with_system_roles()
    }
}

fn system_roles() -> Vec<RoleDefinition> {
    let admin_permissions: PermissionSet = Permission::all()
        .iter()
        .copied()
        .filter(|permission| *permission != Permission::RolesManage)
        .collect();
    let member_permissions: PermissionSet = [
        Permission::ProjectsView,
        Permission::TasksView,
        Permission::TasksCreate,
        Permission::TasksEdit,
        Permission::NotesView,
        Permission::NotesCreate,
        Permission::NotesEdit,
        Permission::NotesDelete,
        Permission::ChatView,
        Permission::ChatSend,
        Permission::ReportsView,
    ]
    .into_iter()
    .collect();

    vec![
        system_role(SUPER_ADMIN_ROLE, "Super Admin", "#dc2626", PermissionSet::all()),
        system_role(ADMIN_ROLE, "Admin", "#2563eb", admin_permissions),
        system_role(MEMBER_ROLE, "Member", "#6b7280", member_permissions),
    ]
}

fn system_role(
    name: &str,
    display_name: &str,
    color: &str,
    permissions: PermissionSet,
) -> RoleDefinition {
    RoleDefinition {
        id: RoleId::new(name),
        name: name.to_owned(),
        display_name: Some(display_name.to_owned()),
        description: None,
        color: Some(color.to_owned()),
        permissions,
        is_system: true,
    }
}

fn not_found(role_id: &RoleId) -> AppError {
    AppError::NotFound(format!("role '{}' does not exist", role_id.as_str()))
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        Ok(self.roles.read().await.clone())
    }

    async fn create_role(&self, role: NewRole) -> AppResult<RoleDefinition> {
        let mut roles = self.roles.write().await;
        if roles.iter().any(|existing| existing.name == role.name) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                role.name
            )));
        }

        let created = RoleDefinition {
            id: RoleId::new(Uuid::new_v4().to_string()),
            name: role.name,
            display_name: Some(role.display_name),
            description: role.description,
            color: Some(role.color),
            permissions: role.permissions,
            is_system: false,
        };
        roles.push(created.clone());

        Ok(created)
    }

    async fn update_role(&self, role_id: &RoleId, patch: RolePatch) -> AppResult<RoleDefinition> {
        let mut roles = self.roles.write().await;

        if let Some(name) = patch.name.as_deref()
            && roles
                .iter()
                .any(|existing| existing.name == name && &existing.id != role_id)
        {
            return Err(AppError::Conflict(format!("role '{name}' already exists")));
        }

        let role = roles
            .iter_mut()
            .find(|existing| &existing.id == role_id)
            .ok_or_else(|| not_found(role_id))?;

        if role.is_system && (patch.name.is_some() || patch.display_name.is_some()) {
            return Err(AppError::Forbidden(
                "system roles cannot be renamed".to_owned(),
            ));
        }

        if let Some(name) = patch.name {
            role.name = name;
        }
        if let Some(display_name) = patch.display_name {
            role.display_name = Some(display_name);
        }
        if let Some(description) = patch.description {
            role.description = Some(description);
        }
        if let Some(color) = patch.color {
            role.color = Some(color);
        }
        if let Some(permissions) = patch.permissions {
            role.permissions = permissions;
        }

        Ok(role.clone())
    }

    async fn delete_role(&self, role_id: &RoleId) -> AppResult<()> {
        let mut roles = self.roles.write().await;
        let position = roles
            .iter()
            .position(|existing| &existing.id == role_id)
            .ok_or_else(|| not_found(role_id))?;

        if roles[position].is_system {
            return Err(AppError::Forbidden(
                "system roles cannot be deleted".to_owned(),
            ));
        }

        roles.remove(position);
        Ok(())
    }
}
