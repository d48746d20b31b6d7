use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Instant;

use crate::config::ClientConfig;
use crate::file::{SelectedFile, PDF_MIME};
use crate::upload::{PredictError, PredictTransport, Prediction};

pub const PREDICT_PATH: &str = "/api/predict";
pub const HEALTH_PATH: &str = "/api/health";
pub const METRICS_PATH: &str = "/api/metrics";

const HEALTH_FALLBACK: &str = "Health check failed";
const METRICS_FALLBACK: &str = "Could not fetch metrics";

/// Multipart field the service reads the upload from.
pub const FILE_FIELD: &str = "file";

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// HTTP client for the prediction service.
#[derive(Debug, Clone)]
pub struct PredictClient {
    client: Client,
    config: ClientConfig,
}

impl PredictClient {
    /// Builds a client, applying the configured timeout if there is one.
    pub fn new(config: ClientConfig) -> Result<Self, PredictError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config))
    }

    /// Wraps an existing `reqwest::Client`, e.g. one shared with other code.
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Uploads a file to `/api/predict` and interprets the response.
    ///
    /// The body is parsed as JSON before the status is looked at, so a
    /// failed response that isn't JSON surfaces as a parse error.
    pub async fn classify(&self, file: &SelectedFile) -> Result<Prediction, PredictError> {
        let url = self.config.endpoint(PREDICT_PATH);
        log::info!("Posting {} to {}", file.name(), url);

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(PDF_MIME)?;
        let form = Form::new().part(FILE_FIELD, part);

        let start = Instant::now();
        let response = self.client.post(&url).multipart(form).send().await?;
        log::info!(
            "Prediction response status: {} ({}ms)",
            response.status(),
            start.elapsed().as_millis()
        );

        let (status, body) = read_json(response).await?;
        if !status.is_success() {
            return Err(PredictError::from_failure_body(status.as_u16(), &body));
        }
        Ok(serde_json::from_value(body)?)
    }

    /// Asks the service whether it is up.
    pub async fn health(&self) -> Result<HealthStatus, PredictError> {
        let url = self.config.endpoint(HEALTH_PATH);
        log::info!("Checking service health at {}", url);

        let (status, body) = read_json(self.client.get(&url).send().await?).await?;
        if !status.is_success() {
            return Err(PredictError::from_failure_body_or(status.as_u16(), &body, HEALTH_FALLBACK));
        }
        Ok(serde_json::from_value(body)?)
    }

    /// Fetches the metrics saved when the model was trained.
    ///
    /// Returns `Ok(None)` when the service has none yet (404).
    pub async fn metrics(&self) -> Result<Option<serde_json::Value>, PredictError> {
        let url = self.config.endpoint(METRICS_PATH);
        log::info!("Fetching training metrics from {}", url);

        let (status, body) = read_json(self.client.get(&url).send().await?).await?;
        if status == StatusCode::NOT_FOUND {
            log::info!(
                "No metrics available: {}",
                body.get("message").and_then(|m| m.as_str()).unwrap_or("not found")
            );
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PredictError::from_failure_body_or(status.as_u16(), &body, METRICS_FALLBACK));
        }
        Ok(Some(body))
    }
}

impl PredictTransport for PredictClient {
    async fn predict(&self, file: &SelectedFile) -> Result<Prediction, PredictError> {
        self.classify(file).await
    }
}

async fn read_json(response: Response) -> Result<(StatusCode, serde_json::Value), PredictError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    log::debug!("Read {} byte response body", bytes.len());
    let body = serde_json::from_slice(&bytes)?;
    Ok((status, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_uses_configured_base() {
        let config = ClientConfig::default()
            .with_api_base("http://classifier.internal:5002")
            .with_timeout(Some(Duration::from_secs(5)));
        let client = PredictClient::new(config).unwrap();
        assert_eq!(
            client.config().endpoint(PREDICT_PATH),
            "http://classifier.internal:5002/api/predict"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = ClientConfig::default().with_api_base(format!("http://127.0.0.1:{}", port));
        let client = PredictClient::new(config).unwrap();
        let file = SelectedFile::new("a.pdf", b"%PDF-1.4".to_vec());

        let err = client.classify(&file).await.unwrap_err();
        assert!(matches!(err, PredictError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }
}
