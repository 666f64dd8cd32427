//! Thin JSON client over `reqwest` for the HR admin REST API.

use std::time::Duration;

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::usecase::ports::source::SourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8080/api`
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl RestClient {
    pub fn new(config: ApiConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| SourceError::Transport(format!("failed to build client: {err}")))?;
        Ok(Self { http, config })
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    #[instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let response = self.execute(Method::GET, path, None::<&()>).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| SourceError::Decode(err.to_string()))
    }

    #[instrument(skip(self, body))]
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), SourceError> {
        self.execute(method, path, body).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), SourceError> {
        self.send_json(Method::DELETE, path, None::<&()>).await
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, SourceError> {
        let url = self.url(path);
        debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| SourceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                code: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}
