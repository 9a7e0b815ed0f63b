//! HTTP sample source for the remote monitoring endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use gaitwatch_types::{PatientId, Reading};

use super::{wire, SampleSource, SourceError};

/// Monitoring endpoint of the reference deployment.
pub const DEFAULT_ENDPOINT: &str = "http://tesla.iem.pw.edu.pl:9080/v2/monitor";

/// Fetches readings with `GET {endpoint}/{patient_id}`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    endpoint: String,
    description: String,
}

impl HttpSource {
    /// Create a new builder for configuring the source.
    pub fn builder() -> HttpSourceBuilder {
        HttpSourceBuilder::default()
    }

    fn url(&self, id: PatientId) -> String {
        format!("{}/{}", self.endpoint, id)
    }
}

#[async_trait]
impl SampleSource for HttpSource {
    async fn fetch(&self, id: PatientId) -> Result<Reading, SourceError> {
        let response = self.client.get(self.url(id)).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        wire::decode(&body)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for HttpSource.
#[derive(Debug, Default)]
pub struct HttpSourceBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    no_proxy: bool,
}

impl HttpSourceBuilder {
    /// Set the monitor endpoint (e.g., "http://localhost:9080/v2/monitor").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 5 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ignore proxy settings from the environment.
    pub fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Build the source.
    pub fn build(self) -> Result<HttpSource, SourceError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(5));
        let mut client = Client::builder().timeout(timeout);
        if self.no_proxy {
            client = client.no_proxy();
        }
        let client = client.build()?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();
        let description = format!("http: {}", endpoint);

        Ok(HttpSource {
            client,
            endpoint,
            description,
        })
    }
}
