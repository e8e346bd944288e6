use taskdeck_core::AppResult;
use taskdeck_domain::ReportSummary;

use crate::HttpApiClient;

/// Reporting endpoints.
#[derive(Debug, Clone)]
pub struct HttpReportService {
    client: HttpApiClient,
}

impl HttpReportService {
    /// Creates a service over a shared client.
    #[must_use]
    pub fn new(client: HttpApiClient) -> Self {
        Self { client }
    }

    /// Loads the summary for the trailing `days` window.
    pub async fn summary(&self, days: u32) -> AppResult<ReportSummary> {
        let url = self.client.endpoint_with_query(
            &["reports", "summary"],
            &[("days", days.max(1).to_string())],
        )?;
        self.client.get_json(url).await
    }
}
