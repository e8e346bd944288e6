use std::collections::BTreeSet;
use std::str::FromStr;

use taskdeck_core::SessionUser;
use taskdeck_domain::{ADMIN_ROLE, Permission, PermissionSet, RoleDefinition, SUPER_ADMIN_ROLE};

/// Resolves what the current user may see and press.
///
/// This only hides or disables controls. The API re-checks every
/// mutating request and remains the authority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionEvaluator {
    user: Option<SessionUser>,
    role_names: BTreeSet<String>,
    granted: PermissionSet,
    unrestricted: bool,
}

impl PermissionEvaluator {
    /// Builds an evaluator from the session user and the role catalog.
    ///
    /// Held roles are matched against catalog entries by name or id.
    #[must_use]
    pub fn new(user: Option<&SessionUser>, roles: &[RoleDefinition]) -> Self {
        let Some(user) = user else {
            return Self::anonymous();
        };

        // Held values may be names or ids; resolve both to catalog names.
        let mut role_names: BTreeSet<String> = user.role_names().iter().cloned().collect();
        let mut granted = PermissionSet::new();
        for role in roles.iter().filter(|role| holds_role(user, role)) {
            granted.extend_from(&role.permissions);
            if !role.name.is_empty() {
                role_names.insert(role.name.clone());
            }
        }

        let unrestricted =
            role_names.contains(SUPER_ADMIN_ROLE) || user.is_flagged_super_admin();

        Self {
            user: Some(user.clone()),
            role_names,
            granted,
            unrestricted,
        }
    }

    /// Returns an evaluator that denies everything.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns the user the evaluator was built for.
    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Returns whether the user may perform the action.
    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        if self.user.is_none() {
            return false;
        }

        self.unrestricted || self.granted.contains(permission)
    }

    /// Checks a transport value. Unknown values are denied.
    #[must_use]
    pub fn can_str(&self, value: &str) -> bool {
        Permission::from_str(value)
            .map(|permission| self.can(permission))
            .unwrap_or(false)
    }

    /// Returns whether any of the permissions is granted.
    #[must_use]
    pub fn can_any(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|permission| self.can(*permission))
    }

    /// Returns whether every permission is granted. An empty list requires a user.
    #[must_use]
    pub fn can_all(&self, permissions: &[Permission]) -> bool {
        self.user.is_some() && permissions.iter().all(|permission| self.can(*permission))
    }

    /// Returns whether the user holds `admin` or `super_admin`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.is_some()
            && [ADMIN_ROLE, SUPER_ADMIN_ROLE]
                .iter()
                .any(|name| self.role_names.contains(*name))
    }

    /// Returns whether the user holds the reserved `super_admin` role.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.user.is_some() && self.role_names.contains(SUPER_ADMIN_ROLE)
    }

    /// Returns every permission the user effectively holds.
    #[must_use]
    pub fn effective_permissions(&self) -> PermissionSet {
        match self.user {
            None => PermissionSet::new(),
            Some(_) if self.unrestricted => PermissionSet::all(),
            Some(_) => self.granted.clone(),
        }
    }
}

fn holds_role(user: &SessionUser, role: &RoleDefinition) -> bool {
    (!role.name.is_empty() && user.has_role(role.name.as_str()))
        || (!role.id.as_str().is_empty() && user.has_role(role.id.as_str()))
}
