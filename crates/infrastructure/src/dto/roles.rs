use serde::{Deserialize, Serialize};
use taskdeck_application::{NewRole, RolePatch};
use taskdeck_domain::{Permission, PermissionSet, RoleDefinition, RoleId};
use tracing::warn;
use ts_rs::TS;

/// API representation of a role definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "api/role-response.ts")]
pub struct RoleResponse {
    /// Server-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Document id sent by older deployments instead of `id`.
    #[serde(default, rename = "_id", skip_serializing)]
    #[ts(skip)]
    pub legacy_id: Option<String>,
    /// Machine key.
    #[serde(default)]
    pub name: String,
    /// Human label.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Free text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Hex badge color.
    #[serde(default)]
    pub color: Option<String>,
    /// Granted permissions as transport strings.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Protected from deletion and renaming.
    #[serde(default)]
    pub is_system: bool,
}

impl RoleResponse {
    /// Returns `id`, falling back to the legacy document id.
    #[must_use]
    pub fn resolved_id(&self) -> &str {
        match self.legacy_id.as_deref() {
            Some(legacy_id) if self.id.is_empty() => legacy_id,
            _ => self.id.as_str(),
        }
    }
}

impl From<RoleResponse> for RoleDefinition {
    fn from(value: RoleResponse) -> Self {
        let id = RoleId::new(value.resolved_id());
        let mut permissions = PermissionSet::new();
        for raw in &value.permissions {
            match Permission::from_transport(raw.as_str()) {
                Ok(permission) => {
                    permissions.insert(permission);
                }
                Err(_) => {
                    warn!(role_id = %id, permission = %raw, "ignoring unknown permission");
                }
            }
        }

        Self {
            id,
            name: value.name,
            display_name: value.display_name,
            description: value.description,
            color: value.color,
            permissions,
            is_system: value.is_system,
        }
    }
}

/// Request body sent to `POST /roles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "api/create-role-request.ts")]
pub struct CreateRoleRequest {
    /// Machine key.
    pub name: String,
    /// Human label.
    pub display_name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hex badge color.
    pub color: String,
    /// Requested permissions as transport strings.
    pub permissions: Vec<String>,
}

impl From<NewRole> for CreateRoleRequest {
    fn from(value: NewRole) -> Self {
        Self {
            name: value.name,
            display_name: value.display_name,
            description: value.description,
            color: value.color,
            permissions: value.permissions.to_transport(),
        }
    }
}

/// Request body sent to `PATCH /roles/:id`. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "api/update-role-request.ts")]
pub struct UpdateRoleRequest {
    /// New machine key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New human label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New hex badge color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Replacement permission set as transport strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl From<RolePatch> for UpdateRoleRequest {
    fn from(value: RolePatch) -> Self {
        Self {
            name: value.name,
            display_name: value.display_name,
            description: value.description,
            color: value.color,
            permissions: value.permissions.map(|permissions| permissions.to_transport()),
        }
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_application::RolePatch;
    use taskdeck_domain::{Permission, RoleDefinition};

    use super::{RoleResponse, UpdateRoleRequest};

    #[test]
    fn role_response_drops_unknown_permissions() {
        let response = serde_json::from_str::<RoleResponse>(
            r#"{"id":"r1","name":"qa","permissions":["tasks.view","billing.refund","tasks.view"]}"#,
        )
        .unwrap_or_default();

        let role = RoleDefinition::from(response);
        assert_eq!(role.permissions.len(), 1);
        assert!(role.permissions.contains(Permission::TasksView));
    }

    #[test]
    fn update_request_omits_absent_fields() {
        let request = UpdateRoleRequest::from(RolePatch {
            description: Some("Reviews releases".to_owned()),
            ..RolePatch::default()
        });

        let encoded = serde_json::to_value(&request).unwrap_or_default();
        assert_eq!(
            encoded,
            serde_json::json!({"description": "Reviews releases"})
        );
    }

    #[test]
    fn role_response_accepts_mongo_style_id() {
        let response =
            serde_json::from_str::<RoleResponse>(r#"{"_id":"abc","displayName":"QA"}"#)
                .unwrap_or_default();
        assert_eq!(response.resolved_id(), "abc");
        assert_eq!(response.display_name.as_deref(), Some("QA"));

        let role = RoleDefinition::from(response);
        assert_eq!(role.id.as_str(), "abc");
    }
}
