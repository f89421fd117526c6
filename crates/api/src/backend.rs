//! The four calls the dashboard makes against the backend.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use stackwatch_types::{ApiErrorBody, HealthReport, NewRecord, OverviewMetrics, Record, RecordList};

use crate::{ClientError, StackwatchClient, read_json};

/// Backend operations used by the dashboard refresh cycle and record form.
///
/// Read calls decode the body whatever the HTTP status, because the backend
/// reports degraded health as `503` with a complete payload and signals list
/// failures through the `success` flag.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> Result<HealthReport, ClientError>;

    /// `GET {api}/system/overview`
    async fn overview(&self) -> Result<OverviewMetrics, ClientError>;

    /// `GET {api}/test`
    async fn list_records(&self) -> Result<RecordList, ClientError>;

    /// `POST {api}/test`. Exactly one request; `201` is the only success.
    async fn create_record(&self, record: &NewRecord) -> Result<Record, ClientError>;
}

#[async_trait]
impl DashboardBackend for StackwatchClient {
    async fn health(&self) -> Result<HealthReport, ClientError> {
        let (_, report) = self.get_json("/health").await?;
        Ok(report)
    }

    async fn overview(&self) -> Result<OverviewMetrics, ClientError> {
        let (_, overview) = self.get_json(&self.api_path("/system/overview")).await?;
        Ok(overview)
    }

    async fn list_records(&self) -> Result<RecordList, ClientError> {
        let (_, list) = self.get_json(&self.api_path("/test")).await?;
        Ok(list)
    }

    async fn create_record(&self, record: &NewRecord) -> Result<Record, ClientError> {
        let path = self.api_path("/test");
        let builder = self.request(Method::POST, &path).json(record);
        let response = self.send(Method::POST, &path, builder).await?;

        match response.status() {
            StatusCode::CREATED => {
                let (_, created) = read_json::<Record>(response, &path).await?;
                Ok(created)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ClientError::RateLimited),
            status => {
                let (_, body) = read_json::<ApiErrorBody>(response, &path).await?;
                Err(ClientError::server(status, body.error))
            }
        }
    }
}
