use serde::{Deserialize, Serialize};
use taskdeck_core::SessionUser;
use ts_rs::TS;

/// API representation of the signed-in user.
///
/// Some deployments still send a single `role` next to `roles`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "api/session-user-response.ts")]
pub struct SessionUserResponse {
    /// User identifier.
    #[serde(default)]
    pub id: String,
    /// Document id sent by older deployments instead of `id`.
    #[serde(default, rename = "_id", skip_serializing)]
    #[ts(skip)]
    pub legacy_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Single role name sent by older deployments.
    #[serde(default)]
    pub role: Option<String>,
    /// Held role names or ids.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Admin-equivalent flag.
    #[serde(default)]
    pub is_super_admin: bool,
}

impl From<SessionUserResponse> for SessionUser {
    fn from(value: SessionUserResponse) -> Self {
        let mut role_names = value.roles;
        if let Some(role) = value.role.filter(|role| !role.trim().is_empty())
            && !role_names.contains(&role)
        {
            role_names.insert(0, role);
        }

        let user_id = match value.legacy_id {
            Some(legacy_id) if value.id.is_empty() => legacy_id,
            _ => value.id,
        };

        SessionUser::new(user_id, value.name, value.email, role_names)
            .with_super_admin_flag(value.is_super_admin)
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_core::SessionUser;

    use super::SessionUserResponse;

    #[test]
    fn legacy_single_role_is_merged() {
        let response = serde_json::from_str::<SessionUserResponse>(
            r#"{"id":"u1","name":"Ada","role":"admin","roles":["member"]}"#,
        )
        .unwrap_or_default();

        let user = SessionUser::from(response);
        assert_eq!(user.role_names(), ["admin".to_owned(), "member".to_owned()]);
    }

    #[test]
    fn legacy_document_id_is_used_when_id_is_missing() {
        let response =
            serde_json::from_str::<SessionUserResponse>(r#"{"_id":"u9","name":"Lin"}"#)
                .unwrap_or_default();

        let user = SessionUser::from(response);
        assert_eq!(user.user_id(), "u9");
    }
}
