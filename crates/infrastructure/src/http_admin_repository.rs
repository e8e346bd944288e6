use async_trait::async_trait;
use taskdeck_application::AdminRepository;
use taskdeck_core::AppResult;
use taskdeck_domain::{
    ActivityLogEntry, DashboardStats, HealthStatus, SystemSettings, UserSummary,
};

use crate::HttpApiClient;

/// Admin dashboard endpoints.
#[derive(Debug, Clone)]
pub struct HttpAdminRepository {
    client: HttpApiClient,
}

impl HttpAdminRepository {
    /// Creates a repository over a shared client.
    #[must_use]
    pub fn new(client: HttpApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminRepository for HttpAdminRepository {
    async fn fetch_dashboard_stats(&self) -> AppResult<DashboardStats> {
        let url = self.client.endpoint(&["admin", "stats"])?;
        self.client.get_json(url).await
    }

    async fn fetch_settings(&self) -> AppResult<SystemSettings> {
        let url = self.client.endpoint(&["admin", "settings"])?;
        self.client.get_json(url).await
    }

    async fn fetch_activity_logs(&self, limit: usize) -> AppResult<Vec<ActivityLogEntry>> {
        let url = self
            .client
            .endpoint_with_query(&["admin", "logs"], &[("limit", limit.to_string())])?;
        self.client.get_json(url).await
    }

    async fn list_users(&self) -> AppResult<Vec<UserSummary>> {
        let url = self.client.endpoint(&["users"])?;
        self.client.get_json(url).await
    }

    async fn fetch_health(&self) -> AppResult<HealthStatus> {
        let url = self.client.endpoint(&["health"])?;
        self.client.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_application::{AdminRepository, SessionContext};

    use crate::test_support::StubServer;

    use super::HttpAdminRepository;

    #[tokio::test]
    async fn admin_reads_hit_dashboard_routes() {
        let server = StubServer::start(vec![
            (200, r#"{"totalUsers":3}"#),
            (200, r#"{"maintenanceMode":false}"#),
            (200, "[]"),
            (200, "[]"),
            (200, r#"{"status":"healthy"}"#),
        ])
        .await;
        let repository = HttpAdminRepository::new(server.client(SessionContext::new()));

        assert!(repository
            .fetch_dashboard_stats()
            .await
            .is_ok_and(|stats| stats.total_users == 3));
        assert!(repository.fetch_settings().await.is_ok());
        assert!(repository.fetch_activity_logs(25).await.is_ok());
        assert!(repository.list_users().await.is_ok());
        assert!(repository.fetch_health().await.is_ok_and(|health| health.is_healthy()));

        let targets: Vec<String> = server
            .requests()
            .await
            .into_iter()
            .map(|request| request.target)
            .collect();
        assert_eq!(
            targets,
            vec![
                "/api/admin/stats".to_owned(),
                "/api/admin/settings".to_owned(),
                "/api/admin/logs?limit=25".to_owned(),
                "/api/users".to_owned(),
                "/api/health".to_owned(),
            ]
        );
    }
}
