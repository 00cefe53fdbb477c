//! Network boundary: the reporting API as seen by a session.
//!
//! [`ReportApi`] is the seam a session is built over; [`HttpApi`] talks to the
//! real backend, tests substitute their own implementation.

use crate::error::Result;
use crate::report::{HealthStatus, Metadata, ReportSnapshot};

/// Operations the reporting backend offers.
pub trait ReportApi {
    /// `GET /api/health`
    fn health(&self) -> impl Future<Output = Result<HealthStatus>> + Send;

    /// `GET /api/metadata`
    fn metadata(&self) -> impl Future<Output = Result<Metadata>> + Send;

    /// `POST /api/generate-report` for a non-empty list of questions.
    fn generate_report(
        &self,
        selected_questions: &[String],
    ) -> impl Future<Output = Result<ReportSnapshot>> + Send;
}

#[cfg(feature = "web")]
pub use http::HttpApi;

#[cfg(feature = "web")]
mod http {
    use log::{debug, warn};
    use reqwest::{Client, Response};

    use super::ReportApi;
    use crate::config::ClientConfig;
    use crate::error::{ReportError, Result};
    use crate::report::{ErrorBody, HealthStatus, Metadata, ReportRequest, ReportSnapshot};

    /// [`ReportApi`] over HTTP with `reqwest`.
    #[derive(Clone, Debug)]
    pub struct HttpApi {
        client: Client,
        base_url: String,
    }

    impl HttpApi {
        pub fn new(config: &ClientConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(config.request_timeout())
                .build()?;

            Ok(Self {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
            })
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }

        /// Turn a non-success response into a `Status` error with no detail.
        fn check_status(response: Response) -> Result<Response> {
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            warn!("request failed with HTTP {}", status.as_u16());
            Err(ReportError::Status {
                status: status.as_u16(),
                detail: None,
            })
        }

        /// Turn a non-success response into a `Status` error carrying the
        /// server's `detail` when the body has one.
        async fn check(response: Response) -> Result<Response> {
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            let detail = match response.text().await {
                Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.detail),
                Err(_) => None,
            };
            warn!("request failed with HTTP {}: {:?}", status.as_u16(), detail);
            Err(ReportError::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }

    impl ReportApi for HttpApi {
        async fn health(&self) -> Result<HealthStatus> {
            // An unhealthy backend answers 503 with a normal body
            let response = self.client.get(self.url("/api/health")).send().await?;
            debug!("health check answered HTTP {}", response.status().as_u16());
            Ok(response.json::<HealthStatus>().await?)
        }

        async fn metadata(&self) -> Result<Metadata> {
            // Metadata failures report the status only
            let response = self.client.get(self.url("/api/metadata")).send().await?;
            let response = Self::check_status(response)?;
            Ok(response.json::<Metadata>().await?)
        }

        async fn generate_report(&self, selected_questions: &[String]) -> Result<ReportSnapshot> {
            let body = ReportRequest {
                selected_questions: selected_questions.to_vec(),
            };
            let response = self
                .client
                .post(self.url("/api/generate-report"))
                .json(&body)
                .send()
                .await?;
            let response = Self::check(response).await?;
            Ok(response.json::<ReportSnapshot>().await?)
        }
    }
}
