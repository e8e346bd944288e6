use taskdeck_core::AppResult;
use taskdeck_domain::{NewTask, Task, TaskPatch, TaskStatus};

use crate::HttpApiClient;

/// Optional filters for task listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListFilter {
    /// Restrict to one project.
    pub project_id: Option<String>,
    /// Restrict to one assignee.
    pub assignee_id: Option<String>,
    /// Restrict to one workflow state.
    pub status: Option<TaskStatus>,
}

impl TaskListFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(project_id) = &self.project_id {
            pairs.push(("projectId", project_id.clone()));
        }
        if let Some(assignee_id) = &self.assignee_id {
            pairs.push(("assigneeId", assignee_id.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status_value(status).to_owned()));
        }
        pairs
    }
}

fn status_value(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "todo",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Review => "review",
        TaskStatus::Done => "done",
    }
}

/// Tasks served by `/tasks`.
#[derive(Debug, Clone)]
pub struct HttpTaskService {
    client: HttpApiClient,
}

impl HttpTaskService {
    /// Creates a service over a shared client.
    #[must_use]
    pub fn new(client: HttpApiClient) -> Self {
        Self { client }
    }

    /// Lists tasks matching the filter.
    pub async fn list(&self, filter: &TaskListFilter) -> AppResult<Vec<Task>> {
        let url = self
            .client
            .endpoint_with_query(&["tasks"], &filter.query_pairs())?;
        self.client.get_json(url).await
    }

    /// Loads one task.
    pub async fn get(&self, task_id: &str) -> AppResult<Task> {
        let url = self.client.endpoint(&["tasks", task_id])?;
        self.client.get_json(url).await
    }

    /// Creates a task.
    pub async fn create(&self, task: &NewTask) -> AppResult<Task> {
        let url = self.client.endpoint(&["tasks"])?;
        self.client.post_json(url, task).await
    }

    /// Applies a partial update.
    pub async fn update(&self, task_id: &str, patch: &TaskPatch) -> AppResult<Task> {
        let url = self.client.endpoint(&["tasks", task_id])?;
        self.client.patch_json(url, patch).await
    }

    /// Deletes a task.
    pub async fn delete(&self, task_id: &str) -> AppResult<()> {
        let url = self.client.endpoint(&["tasks", task_id])?;
        self.client.delete(url).await
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_application::SessionContext;
    use taskdeck_domain::{NewTask, TaskPatch, TaskStatus};

    use crate::test_support::StubServer;

    use super::{HttpTaskService, TaskListFilter};

    const TASK: &str = r#"{"id":"t1","projectId":"p1","title":"Ship"}"#;

    #[test]
    fn filter_only_emits_set_fields() {
        let filter = TaskListFilter {
            project_id: Some("p1".to_owned()),
            status: Some(TaskStatus::InProgress),
            ..TaskListFilter::default()
        };

        assert_eq!(
            filter.query_pairs(),
            vec![
                ("projectId", "p1".to_owned()),
                ("status", "in_progress".to_owned())
            ]
        );
        assert!(TaskListFilter::default().query_pairs().is_empty());
    }

    #[tokio::test]
    async fn crud_calls_hit_task_routes() {
        let server = StubServer::start(vec![
            (200, "[]"),
            (200, TASK),
            (201, TASK),
            (200, TASK),
            (200, "{}"),
        ])
        .await;
        let service = HttpTaskService::new(server.client(SessionContext::new()));

        let filter = TaskListFilter {
            project_id: Some("p1".to_owned()),
            ..TaskListFilter::default()
        };
        assert!(service.list(&filter).await.is_ok());
        assert!(service.get("t1").await.is_ok_and(|task| task.project_id == "p1"));

        let Ok(new_task) = NewTask::new("p1", "Ship") else {
            panic!("task should be valid");
        };
        assert!(service.create(&new_task).await.is_ok());

        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            ..TaskPatch::default()
        };
        assert!(service.update("t1", &patch).await.is_ok());
        assert!(service.delete("t1").await.is_ok());

        let requests = server.requests().await;
        let routes: Vec<(&str, &str)> = requests
            .iter()
            .map(|request| (request.method.as_str(), request.target.as_str()))
            .collect();
        assert_eq!(
            routes,
            vec![
                ("GET", "/api/tasks?projectId=p1"),
                ("GET", "/api/tasks/t1"),
                ("POST", "/api/tasks"),
                ("PATCH", "/api/tasks/t1"),
                ("DELETE", "/api/tasks/t1"),
            ]
        );

        let created = requests.get(2).map(|request| request.json_body());
        assert_eq!(
            created.as_ref().and_then(|body| body.get("projectId")),
            Some(&serde_json::json!("p1"))
        );
        assert_eq!(
            requests.get(3).map(|request| request.json_body()),
            Some(serde_json::json!({"status": "done"}))
        );
    }
}
