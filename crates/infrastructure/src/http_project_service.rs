use taskdeck_core::AppResult;
use taskdeck_domain::{NewProject, Project, ProjectPatch};

use crate::HttpApiClient;

/// Projects served by `/projects`.
#[derive(Debug, Clone)]
pub struct HttpProjectService {
    client: HttpApiClient,
}

impl HttpProjectService {
    /// Creates a service over a shared client.
    #[must_use]
    pub fn new(client: HttpApiClient) -> Self {
        Self { client }
    }

    /// Lists projects visible to the session.
    pub async fn list(&self) -> AppResult<Vec<Project>> {
        let url = self.client.endpoint(&["projects"])?;
        self.client.get_json(url).await
    }

    /// Loads one project.
    pub async fn get(&self, project_id: &str) -> AppResult<Project> {
        let url = self.client.endpoint(&["projects", project_id])?;
        self.client.get_json(url).await
    }

    /// Creates a project.
    pub async fn create(&self, project: &NewProject) -> AppResult<Project> {
        let url = self.client.endpoint(&["projects"])?;
        self.client.post_json(url, project).await
    }

    /// Applies a partial update.
    pub async fn update(&self, project_id: &str, patch: &ProjectPatch) -> AppResult<Project> {
        let url = self.client.endpoint(&["projects", project_id])?;
        self.client.patch_json(url, patch).await
    }

    /// Deletes a project.
    pub async fn delete(&self, project_id: &str) -> AppResult<()> {
        let url = self.client.endpoint(&["projects", project_id])?;
        self.client.delete(url).await
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_application::SessionContext;
    use taskdeck_domain::{NewProject, ProjectPatch, ProjectStatus};

    use crate::test_support::StubServer;

    use super::HttpProjectService;

    const PROJECT: &str = r#"{"id":"p1","name":"Launch","status":"active"}"#;

    #[tokio::test]
    async fn crud_calls_hit_project_routes() {
        let server = StubServer::start(vec![
            (200, "[]"),
            (200, PROJECT),
            (201, PROJECT),
            (200, PROJECT),
            (200, "{}"),
        ])
        .await;
        let service = HttpProjectService::new(server.client(SessionContext::new()));

        assert!(service.list().await.is_ok_and(|projects| projects.is_empty()));
        assert!(service.get("p1").await.is_ok_and(|project| project.name == "Launch"));

        let Ok(new_project) = NewProject::new("Launch") else {
            panic!("project name should be valid");
        };
        assert!(service.create(&new_project).await.is_ok());

        let patch = ProjectPatch {
            status: Some(ProjectStatus::Archived),
            ..ProjectPatch::default()
        };
        assert!(service.update("p1", &patch).await.is_ok());
        assert!(service.delete("p1").await.is_ok());

        let requests = server.requests().await;
        let routes: Vec<(&str, &str)> = requests
            .iter()
            .map(|request| (request.method.as_str(), request.target.as_str()))
            .collect();
        assert_eq!(
            routes,
            vec![
                ("GET", "/api/projects"),
                ("GET", "/api/projects/p1"),
                ("POST", "/api/projects"),
                ("PATCH", "/api/projects/p1"),
                ("DELETE", "/api/projects/p1"),
            ]
        );
        assert_eq!(
            requests.get(2).map(|request| request.json_body()),
            Some(serde_json::json!({"name": "Launch"}))
        );
        assert_eq!(
            requests.get(3).map(|request| request.json_body()),
            Some(serde_json::json!({"status": "archived"}))
        );
    }
}
