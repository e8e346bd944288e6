use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use taskdeck_core::AppError;

/// Permissions gating client-side controls.
///
/// The transport form is `<category>.<action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    /// Allows listing and opening projects.
    ProjectsView,
    /// Allows creating projects.
    ProjectsCreate,
    /// Allows editing project details.
    ProjectsEdit,
    /// Allows deleting projects.
    ProjectsDelete,
    /// Allows listing and opening tasks.
    TasksView,
    /// Allows creating tasks.
    TasksCreate,
    /// Allows editing tasks.
    TasksEdit,
    /// Allows deleting tasks.
    TasksDelete,
    /// Allows assigning tasks to other users.
    TasksAssign,
    /// Allows reading notes.
    NotesView,
    /// Allows creating notes.
    NotesCreate,
    /// Allows editing notes.
    NotesEdit,
    /// Allows deleting notes.
    NotesDelete,
    /// Allows reading team chat.
    ChatView,
    /// Allows posting to team chat.
    ChatSend,
    /// Allows removing other users' chat messages.
    ChatModerate,
    /// Allows opening reports.
    ReportsView,
    /// Allows exporting reports.
    ReportsExport,
    /// Allows listing users.
    UsersView,
    /// Allows creating, editing and deactivating users.
    UsersManage,
    /// Allows listing role definitions.
    RolesView,
    /// Allows creating, editing and deleting role definitions.
    RolesManage,
    /// Allows reading system settings.
    SettingsView,
    /// Allows changing system settings.
    SettingsManage,
    /// Allows reading the activity log.
    LogsView,
}

impl Permission {
    /// Returns the stable transport value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectsView => "projects.view",
            Self::ProjectsCreate => "projects.create",
            Self::ProjectsEdit => "projects.edit",
            Self::ProjectsDelete => "projects.delete",
            Self::TasksView => "tasks.view",
            Self::TasksCreate => "tasks.create",
            Self::TasksEdit => "tasks.edit",
            Self::TasksDelete => "tasks.delete",
            Self::TasksAssign => "tasks.assign",
            Self::NotesView => "notes.view",
            Self::NotesCreate => "notes.create",
            Self::NotesEdit => "notes.edit",
            Self::NotesDelete => "notes.delete",
            Self::ChatView => "chat.view",
            Self::ChatSend => "chat.send",
            Self::ChatModerate => "chat.moderate",
            Self::ReportsView => "reports.view",
            Self::ReportsExport => "reports.export",
            Self::UsersView => "users.view",
            Self::UsersManage => "users.manage",
            Self::RolesView => "roles.view",
            Self::RolesManage => "roles.manage",
            Self::SettingsView => "settings.view",
            Self::SettingsManage => "settings.manage",
            Self::LogsView => "logs.view",
        }
    }

    /// Returns all known permissions in catalog order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ProjectsView,
            Permission::ProjectsCreate,
            Permission::ProjectsEdit,
            Permission::ProjectsDelete,
            Permission::TasksView,
            Permission::TasksCreate,
            Permission::TasksEdit,
            Permission::TasksDelete,
            Permission::TasksAssign,
            Permission::NotesView,
            Permission::NotesCreate,
            Permission::NotesEdit,
            Permission::NotesDelete,
            Permission::ChatView,
            Permission::ChatSend,
            Permission::ChatModerate,
            Permission::ReportsView,
            Permission::ReportsExport,
            Permission::UsersView,
            Permission::UsersManage,
            Permission::RolesView,
            Permission::RolesManage,
            Permission::SettingsView,
            Permission::SettingsManage,
            Permission::LogsView,
        ];

        ALL
    }

    /// Returns the category this permission is grouped under.
    #[must_use]
    pub fn category(&self) -> PermissionCategory {
        match self {
            Self::ProjectsView
            | Self::ProjectsCreate
            | Self::ProjectsEdit
            | Self::ProjectsDelete => PermissionCategory::Projects,
            Self::TasksView
            | Self::TasksCreate
            | Self::TasksEdit
            | Self::TasksDelete
            | Self::TasksAssign => PermissionCategory::Tasks,
            Self::NotesView | Self::NotesCreate | Self::NotesEdit | Self::NotesDelete => {
                PermissionCategory::Notes
            }
            Self::ChatView | Self::ChatSend | Self::ChatModerate => PermissionCategory::Chat,
            Self::ReportsView | Self::ReportsExport => PermissionCategory::Reports,
            Self::UsersView | Self::UsersManage => PermissionCategory::Users,
            Self::RolesView | Self::RolesManage => PermissionCategory::Roles,
            Self::SettingsView | Self::SettingsManage => PermissionCategory::Settings,
            Self::LogsView => PermissionCategory::Logs,
        }
    }

    /// Parses a transport value into a permission.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::from_str(value.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Permission categories, one per transport prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
    /// Project permissions.
    Projects,
    /// Task permissions.
    Tasks,
    /// Note permissions.
    Notes,
    /// Team chat permissions.
    Chat,
    /// Reporting permissions.
    Reports,
    /// User administration permissions.
    Users,
    /// Role administration permissions.
    Roles,
    /// System settings permissions.
    Settings,
    /// Activity log permissions.
    Logs,
}

impl PermissionCategory {
    /// Returns all categories in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Projects,
            Self::Tasks,
            Self::Notes,
            Self::Chat,
            Self::Reports,
            Self::Users,
            Self::Roles,
            Self::Settings,
            Self::Logs,
        ]
    }

    /// Returns the transport prefix of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::Notes => "notes",
            Self::Chat => "chat",
            Self::Reports => "reports",
            Self::Users => "users",
            Self::Roles => "roles",
            Self::Settings => "settings",
            Self::Logs => "logs",
        }
    }

    /// Returns the human label shown above the group.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Tasks => "Tasks",
            Self::Notes => "Notes",
            Self::Chat => "Team Chat",
            Self::Reports => "Reports",
            Self::Users => "User Management",
            Self::Roles => "Role Management",
            Self::Settings => "System Settings",
            Self::Logs => "Activity Logs",
        }
    }
}

/// Permissions of one category, grouped for role editors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionGroup {
    /// Category shared by every permission in the group.
    pub category: PermissionCategory,
    /// Human-readable group label.
    pub label: &'static str,
    /// Permissions in catalog order.
    pub permissions: Vec<Permission>,
}

/// Returns the permission catalog grouped by category.
#[must_use]
pub fn permission_groups() -> Vec<PermissionGroup> {
    PermissionCategory::all()
        .iter()
        .map(|category| PermissionGroup {
            category: *category,
            label: category.label(),
            permissions: Permission::all()
                .iter()
                .copied()
                .filter(|permission| permission.category() == *category)
                .collect(),
        })
        .collect()
}

/// Unordered set of permissions with duplicates collapsed.
///
/// Serializes as an array of transport strings. Deserialization drops
/// values the client does not know so a newer server cannot widen grants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a set containing the full catalog.
    #[must_use]
    pub fn all() -> Self {
        Permission::all().iter().copied().collect()
    }

    /// Parses transport values, rejecting unknown ones.
    pub fn from_transport<I, S>(values: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .map(|value| Permission::from_transport(value.as_ref()))
            .collect()
    }

    /// Adds a permission; returns false when it was already present.
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    /// Returns whether the set contains the permission.
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// Adds every permission of another set.
    pub fn extend_from(&mut self, other: &Self) {
        self.0.extend(other.0.iter().copied());
    }

    /// Returns the number of distinct permissions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates permissions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }

    /// Returns transport values in catalog order.
    #[must_use]
    pub fn to_transport(&self) -> Vec<String> {
        self.iter()
            .map(|permission| permission.as_str().to_owned())
            .collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for permission in &self.0 {
            seq.serialize_element(permission.as_str())?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LenientVisitor;

        impl<'de> Visitor<'de> for LenientVisitor {
            type Value = PermissionSet;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("an array of permission strings")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut set = PermissionSet::new();
                while let Some(value) = seq.next_element::<String>()? {
                    if let Ok(permission) = Permission::from_str(value.as_str()) {
                        set.insert(permission);
                    }
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(LenientVisitor)
    }
}
