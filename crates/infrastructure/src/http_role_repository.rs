use async_trait::async_trait;
use taskdeck_application::{NewRole, RolePatch, RoleRepository};
use taskdeck_core::AppResult;
use taskdeck_domain::{RoleDefinition, RoleId};

use crate::HttpApiClient;
use crate::dto::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};

/// Role definitions served by `/roles`.
#[derive(Debug, Clone)]
pub struct HttpRoleRepository {
    client: HttpApiClient,
}

impl HttpRoleRepository {
    /// Creates a repository over a shared client.
    #[must_use]
    pub fn new(client: HttpApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleRepository for HttpRoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        let url = self.client.endpoint(&["roles"])?;
        let roles = self.client.get_json::<Vec<RoleResponse>>(url).await?;
        Ok(roles.into_iter().map(RoleDefinition::from).collect())
    }

    async fn create_role(&self, role: NewRole) -> AppResult<RoleDefinition> {
        let url = self.client.endpoint(&["roles"])?;
        let created = self
            .client
            .post_json::<_, RoleResponse>(url, &CreateRoleRequest::from(role))
            .await?;
        Ok(RoleDefinition::from(created))
    }

    async fn update_role(&self, role_id: &RoleId, patch: RolePatch) -> AppResult<RoleDefinition> {
        let url = self.client.endpoint(&["roles", role_id.as_str()])?;
        let updated = self
            .client
            .patch_json::<_, RoleResponse>(url, &UpdateRoleRequest::from(patch))
            .await?;
        Ok(RoleDefinition::from(updated))
    }

    async fn delete_role(&self, role_id: &RoleId) -> AppResult<()> {
        let url = self.client.endpoint(&["roles", role_id.as_str()])?;
        self.client.delete(url).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use taskdeck_application::{RolePatch, RoleStore, SessionContext};
    use taskdeck_domain::RoleId;

    use crate::test_support::StubServer;

    use super::HttpRoleRepository;

    const ROLES: &str = r#"[
        {"id":"r1","name":"admin","displayName":"Administrator","isSystem":true,"permissions":["users.manage"]},
        {"_id":"r2","name":"qa","permissions":["tasks.view"]}
    ]"#;
    const UPDATED_ADMIN: &str = r##"{"id":"r1","name":"admin","displayName":"Administrator","color":"#ff0000","isSystem":true}"##;

    #[tokio::test]
    async fn system_role_rules_hold_on_the_wire() {
        let server =
            StubServer::start(vec![(200, ROLES), (200, UPDATED_ADMIN), (200, "{}")]).await;
        let repository = HttpRoleRepository::new(server.client(SessionContext::new()));
        let store = RoleStore::new(Arc::new(repository));

        let roles = store.fetch_roles().await.unwrap_or_default();
        assert_eq!(roles.len(), 2);
        assert_eq!(
            roles.get(1).map(|role| role.id.as_str()),
            Some("r2")
        );

        let updated = store
            .update_role(
                &RoleId::new("r1"),
                RolePatch {
                    name: Some("owner".to_owned()),
                    display_name: Some("Owner".to_owned()),
                    color: Some("#FF0000".to_owned()),
                    ..RolePatch::default()
                },
            )
            .await;
        assert!(updated.is_ok());

        assert!(store.delete_role(&RoleId::new("r1")).await.is_err());
        assert!(store.delete_role(&RoleId::new("r2")).await.is_ok());

        let requests = server.requests().await;
        let routes: Vec<(&str, &str)> = requests
            .iter()
            .map(|request| (request.method.as_str(), request.target.as_str()))
            .collect();
        assert_eq!(
            routes,
            vec![
                ("GET", "/api/roles"),
                ("PATCH", "/api/roles/r1"),
                ("DELETE", "/api/roles/r2"),
            ]
        );
        assert_eq!(
            requests.get(1).map(|request| request.json_body()),
            Some(serde_json::json!({"color": "#ff0000"}))
        );
    }
}
