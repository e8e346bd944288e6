use taskdeck_core::NonEmptyString;
use taskdeck_domain::{RoleColor, RoleName};

use super::*;

use crate::{CreateRoleInput, NewRole, RolePatch};

impl RoleStore {
    /// Validates and creates a role, then adds it to the cache.
    pub async fn create_role(&self, input: CreateRoleInput) -> AppResult<RoleDefinition> {
        let new_role = self.validate_new_role(input).await?;
        let role_name = new_role.name.clone();

        let role = self
            .repository
            .create_role(new_role)
            .await
            .inspect_err(|error| {
                warn!(role_name = %role_name, error = %error, "role create rejected");
            })?;

        info!(role_id = %role.id, role_name = %role.name, "role created");
        self.cache.write().await.upsert(role.clone());

        Ok(role)
    }

    /// Applies a partial update and replaces the cached entry.
    ///
    /// For a system role the name and display name are removed from the
    /// patch before it is sent, even if nothing else remains.
    pub async fn update_role(
        &self,
        role_id: &RoleId,
        patch: RolePatch,
    ) -> AppResult<RoleDefinition> {
        let cached = self.require_cached_role(role_id).await?;

        // A system role update is sent even when stripping empties it.
        let (patch, allow_empty) = match &cached {
            Some(role) if role.is_system => (restrict_system_patch(role, patch), true),
            _ => (patch, false),
        };
        let patch = validate_patch(patch, allow_empty)?;

        let role = self
            .repository
            .update_role(role_id, patch)
            .await
            .inspect_err(|error| {
                warn!(role_id = %role_id, error = %error, "role update rejected");
            })?;

        info!(role_id = %role.id, "role updated");
        self.cache.write().await.upsert(role.clone());

        Ok(role)
    }

    /// Deletes a non-system role and removes it from the cache.
    ///
    /// System roles are rejected without contacting the API. Users that
    /// still reference the role keep the dangling name.
    pub async fn delete_role(&self, role_id: &RoleId) -> AppResult<()> {
        if let Some(role) = self.require_cached_role(role_id).await?
            && role.is_system
        {
            return Err(AppError::Validation(format!(
                "system role '{}' cannot be deleted",
                role.display_name()
            )));
        }

        self.repository
            .delete_role(role_id)
            .await
            .inspect_err(|error| {
                warn!(role_id = %role_id, error = %error, "role delete rejected");
            })?;

        info!(role_id = %role_id, "role deleted");
        self.cache
            .write()
            .await
            .roles
            .retain(|role| &role.id != role_id);

        Ok(())
    }

    async fn validate_new_role(&self, input: CreateRoleInput) -> AppResult<NewRole> {
        let name = RoleName::new(input.name)?;
        let display_name = NonEmptyString::new(input.display_name)
            .map_err(|_| AppError::Validation("role display name is required".to_owned()))?;
        let color = match input.color.filter(|value| !value.trim().is_empty()) {
            Some(color) => RoleColor::new(color)?,
            None => RoleColor::default_badge(),
        };

        let name_taken = self
            .cache
            .read()
            .await
            .roles
            .iter()
            .any(|role| role.name == name.as_str());
        if name_taken {
            return Err(AppError::Validation(format!(
                "a role named '{}' already exists",
                name.as_str()
            )));
        }

        Ok(NewRole {
            name: name.into(),
            display_name: display_name.as_str().trim().to_owned(),
            description: normalize_description(input.description),
            color: color.into(),
            permissions: input.permissions,
        })
    }
}

fn restrict_system_patch(role: &RoleDefinition, patch: RolePatch) -> RolePatch {
    if patch.name.is_none() && patch.display_name.is_none() {
        return patch;
    }

    info!(role_id = %role.id, "dropping identity fields from system role update");
    patch.without_identity_fields()
}

fn validate_patch(patch: RolePatch, allow_empty: bool) -> AppResult<RolePatch> {
    if patch.is_empty() && !allow_empty {
        return Err(AppError::Validation("nothing to update".to_owned()));
    }

    let name = patch.name.map(RoleName::new).transpose()?.map(String::from);
    let display_name = patch
        .display_name
        .map(|value| {
            NonEmptyString::new(value)
                .map(|value| value.as_str().trim().to_owned())
                .map_err(|_| {
                    AppError::Validation("role display name must not be empty".to_owned())
                })
        })
        .transpose()?;
    let color = patch.color.map(RoleColor::new).transpose()?.map(String::from);

    Ok(RolePatch {
        name,
        display_name,
        description: patch.description,
        color,
        permissions: patch.permissions,
    })
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
