use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use shared::{
    error::{ClassifiedError, ErrorBody},
    protocol::{AnalysisRequest, AnalysisResult, HealthStatus},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub mod deadline;
mod orchestrator;
pub mod submit;

pub use deadline::Deadline;
pub use orchestrator::{Orchestrator, SubmitError};
pub use submit::{StatusMessage, SubmitGuard, SubmitLock, SubmitSurface};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP boundary to the analysis backend.
#[derive(Clone)]
pub struct AnalysisClient {
    http: Client,
    server_url: String,
    timeout: Duration,
}

impl AnalysisClient {
    pub fn new(server_url: impl Into<String>, timeout: Duration) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            server_url,
            timeout,
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends one analysis request. The call is aborted when the configured
    /// deadline expires or `cancel` fires, whichever comes first.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult, ClassifiedError> {
        let deadline = Deadline::arm(cancel, self.timeout);
        info!(
            event_url = request.event_url(),
            company_name = request.company_name(),
            timeout = ?deadline.timeout(),
            "analysis: submitting request"
        );

        let outcome = tokio::select! {
            biased;
            _ = deadline.token().cancelled() => None,
            outcome = self.exchange(request) => Some(outcome),
        };

        match outcome {
            Some(outcome) => outcome,
            None if deadline.expired() => {
                warn!(
                    timeout = ?deadline.timeout(),
                    "analysis: deadline expired, request cancelled"
                );
                Err(ClassifiedError::Timeout {
                    after: deadline.timeout(),
                })
            }
            None => {
                info!("analysis: request aborted by caller");
                Err(ClassifiedError::NetworkError("request aborted".to_string()))
            }
        }
    }

    async fn exchange(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClassifiedError> {
        let response = self
            .http
            .post(format!("{}/api/analyze", self.server_url))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "analysis: response received");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.error);
            warn!(status = status.as_u16(), error = ?message, "analysis: server reported failure");
            return Err(ClassifiedError::api(message));
        }

        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| ClassifiedError::malformed(format!("response is not JSON: {e}")))?;
        AnalysisResult::from_value(value)
            .ok_or_else(|| ClassifiedError::malformed("response is not a JSON object"))
    }

    /// Advisory readiness probe; callers log the outcome and carry on.
    pub async fn check_health(&self) -> Result<HealthStatus, ClassifiedError> {
        let response = self
            .http
            .get(format!("{}/api/health", self.server_url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClassifiedError::api(Some(format!(
                "health check returned status {}",
                status.as_u16()
            ))));
        }
        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| ClassifiedError::malformed(format!("invalid health payload: {e}")))
    }
}

fn transport_error(err: reqwest::Error) -> ClassifiedError {
    ClassifiedError::NetworkError(err.to_string())
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
