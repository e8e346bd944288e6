//! Role definitions and role display rules.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use taskdeck_core::{AppError, AppResult};

use crate::{Permission, PermissionSet};

/// Reserved role that implicitly holds every permission.
pub const SUPER_ADMIN_ROLE: &str = "super_admin";

/// Reserved administrator role.
pub const ADMIN_ROLE: &str = "admin";

/// Reserved default member role.
pub const MEMBER_ROLE: &str = "member";

/// Label used when a role carries neither a display name nor a name.
pub const UNKNOWN_ROLE_LABEL: &str = "Unknown Role";

/// Badge color applied when a role does not specify one.
pub const DEFAULT_ROLE_COLOR: &str = "#6b7280";

const ROLE_NAME_MAX_LENGTH: usize = 64;

/// Server-assigned role identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    /// Wraps a server-assigned identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Validated role machine key: lowercase letters, digits and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleName(String);

impl RoleName {
    /// Validates a role machine key.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let value = value.trim();

        if value.is_empty() {
            return Err(AppError::Validation("role name is required".to_owned()));
        }

        if value.len() > ROLE_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "role name must not exceed {ROLE_NAME_MAX_LENGTH} characters"
            )));
        }

        let starts_with_letter = value
            .chars()
            .next()
            .is_some_and(|first| first.is_ascii_lowercase());
        let well_formed = value.chars().all(|character| {
            character.is_ascii_lowercase() || character.is_ascii_digit() || character == '_'
        });

        if !starts_with_letter || !well_formed {
            return Err(AppError::Validation(format!(
                "role name '{value}' must start with a lowercase letter and contain only lowercase letters, digits and underscores"
            )));
        }

        Ok(Self(value.to_owned()))
    }

    /// Returns the machine key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

/// Validated hex badge color, normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleColor(String);

impl RoleColor {
    /// Validates `#RGB` or `#RRGGBB`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or("");

        let well_formed = digits.chars().all(|digit| digit.is_ascii_hexdigit());
        if !matches!(digits.len(), 3 | 6) || !well_formed {
            return Err(AppError::Validation(format!(
                "role color '{trimmed}' must be a hex color such as #3b82f6"
            )));
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the default badge color.
    #[must_use]
    pub fn default_badge() -> Self {
        Self(DEFAULT_ROLE_COLOR.to_owned())
    }

    /// Returns the normalized color.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<RoleColor> for String {
    fn from(value: RoleColor) -> Self {
        value.0
    }
}

/// Role definition as held in the client cache.
///
/// `name` and `display_name` are kept as received; a role missing both is
/// still cached but never listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinition {
    /// Server-assigned identifier.
    #[serde(default)]
    pub id: RoleId,
    /// Machine key, unique across roles.
    #[serde(default)]
    pub name: String,
    /// Human label.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Free text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Badge color.
    #[serde(default)]
    pub color: Option<String>,
    /// Granted permissions.
    #[serde(default)]
    pub permissions: PermissionSet,
    /// Protected from deletion and renaming.
    #[serde(default)]
    pub is_system: bool,
}

impl RoleDefinition {
    /// Returns the label to render for this role.
    #[must_use]
    pub fn display_name(&self) -> String {
        role_display_name(self.display_name.as_deref(), self.name.as_str())
    }

    /// Returns whether the role can be shown in a listing.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        let has_display_name = self
            .display_name
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty());

        has_display_name || !self.name.trim().is_empty()
    }

    /// Returns whether this is the reserved super admin role.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.name == SUPER_ADMIN_ROLE
    }

    /// Returns whether the role grants the permission.
    #[must_use]
    pub fn grants(&self, permission: Permission) -> bool {
        self.is_super_admin() || self.permissions.contains(permission)
    }

    /// Returns the badge color, falling back to the default.
    #[must_use]
    pub fn badge_color(&self) -> &str {
        self.color
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(DEFAULT_ROLE_COLOR)
    }
}

/// Resolves the human label for a role.
///
/// A non-empty display name wins. Otherwise the machine key is split on
/// `_` and each token title-cased. Roles with neither resolve to
/// [`UNKNOWN_ROLE_LABEL`].
///
/// Whitespace-only values count as empty, and empty `_` tokens are
/// skipped, so the result never renders blank.
#[must_use]
pub fn role_display_name(display_name: Option<&str>, name: &str) -> String {
    if let Some(display_name) = display_name.filter(|value| !value.trim().is_empty()) {
        return display_name.to_owned();
    }

    let title_cased = name
        .trim()
        .split('_')
        .filter(|token| !token.trim().is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");

    if title_cased.is_empty() {
        UNKNOWN_ROLE_LABEL.to_owned()
    } else {
        title_cased
    }
}

fn title_case(token: &str) -> String {
    let mut characters = token.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().chain(characters).collect(),
        None => String::new(),
    }
}
