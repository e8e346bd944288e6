use taskdeck_core::AppResult;
use taskdeck_domain::{NewUserInput, UserId, UserSummary};

use crate::HttpApiClient;
use crate::dto::{CreateUserRequest, UpdateUserRolesRequest};

/// User administration served by `/users`.
///
/// Role names are sent as given; the API decides whether they exist.
#[derive(Debug, Clone)]
pub struct HttpUserService {
    client: HttpApiClient,
}

impl HttpUserService {
    /// Creates a service over a shared client.
    #[must_use]
    pub fn new(client: HttpApiClient) -> Self {
        Self { client }
    }

    /// Invites a user.
    pub async fn create(&self, input: NewUserInput) -> AppResult<UserSummary> {
        let url = self.client.endpoint(&["users"])?;
        self.client
            .post_json(url, &CreateUserRequest::from(input))
            .await
    }

    /// Replaces the role names held by a user.
    pub async fn set_roles(&self, user_id: &UserId, roles: Vec<String>) -> AppResult<UserSummary> {
        let url = self.client.endpoint(&["users", user_id.as_str()])?;
        self.client
            .patch_json(url, &UpdateUserRolesRequest { roles })
            .await
    }

    /// Deletes a user.
    pub async fn delete(&self, user_id: &UserId) -> AppResult<()> {
        let url = self.client.endpoint(&["users", user_id.as_str()])?;
        self.client.delete(url).await
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_application::SessionContext;
    use taskdeck_domain::{NewUserInput, UserId};

    use crate::test_support::StubServer;

    use super::HttpUserService;

    const USER: &str = r#"{"id":"u1","name":"Ada","email":"ada@example.com","roles":["member"]}"#;

    #[tokio::test]
    async fn user_calls_send_role_names() {
        let server = StubServer::start(vec![(201, USER), (200, USER), (200, "{}")]).await;
        let service = HttpUserService::new(server.client(SessionContext::new()));

        let Ok(input) = NewUserInput::new("Ada", "ada@example.com", vec!["member".to_owned()])
        else {
            panic!("user input should be valid");
        };
        assert!(service.create(input).await.is_ok_and(|user| user.name == "Ada"));

        let user_id = UserId::new("u1");
        let updated = service
            .set_roles(&user_id, vec!["admin".to_owned(), "member".to_owned()])
            .await;
        assert!(updated.is_ok());
        assert!(service.delete(&user_id).await.is_ok());

        let requests = server.requests().await;
        let routes: Vec<(&str, &str)> = requests
            .iter()
            .map(|request| (request.method.as_str(), request.target.as_str()))
            .collect();
        assert_eq!(
            routes,
            vec![
                ("POST", "/api/users"),
                ("PATCH", "/api/users/u1"),
                ("DELETE", "/api/users/u1"),
            ]
        );
        assert_eq!(
            requests.first().map(|request| request.json_body()),
            Some(serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "roles": ["member"]
            }))
        );
        assert_eq!(
            requests.get(1).map(|request| request.json_body()),
            Some(serde_json::json!({"roles": ["admin", "member"]}))
        );
    }
}
