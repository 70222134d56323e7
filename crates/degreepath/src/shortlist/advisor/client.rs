use async_trait::async_trait;
use tracing::warn;

use super::parse::{truncate_detail, ResponsesPayload};
use super::prompt::ResponsesRequest;
use super::AdvisorError;
use crate::config::AdvisorConfig;

/// Transport for the language-model call so the advisor can run against a fake.
#[async_trait]
pub trait ResponsesClient: Send + Sync {
    async fn create_response(
        &self,
        request: &ResponsesRequest,
    ) -> Result<ResponsesPayload, AdvisorError>;
}

/// `reqwest`-backed client for OpenAI-compatible Responses endpoints.
pub struct OpenAiResponsesClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl OpenAiResponsesClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>, base_url: &str) -> Self {
        Self {
            http,
            api_key,
            endpoint: format!("{}/responses", base_url.trim_end_matches('/')),
        }
    }

    pub fn from_config(config: &AdvisorConfig) -> Self {
        Self::new(
            reqwest::Client::new(),
            config.api_key.clone(),
            &config.base_url,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for OpenAiResponsesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiResponsesClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ResponsesClient for OpenAiResponsesClient {
    async fn create_response(
        &self,
        request: &ResponsesRequest,
    ) -> Result<ResponsesPayload, AdvisorError> {
        // Checked per call so the server still starts without a key.
        let api_key = self.api_key.as_deref().ok_or(AdvisorError::MissingApiKey)?;

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|err| AdvisorError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "responses API request failed");
            return Err(AdvisorError::Upstream {
                status: status.as_u16(),
                detail: truncate_detail(&body),
            });
        }

        response
            .json::<ResponsesPayload>()
            .await
            .map_err(|err| AdvisorError::Transport(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};

    #[test]
    fn endpoint_joins_base_url_once() {
        let client = OpenAiResponsesClient::new(reqwest::Client::new(), None, "https://llm.local/v1/");
        assert_eq!(client.endpoint(), "https://llm.local/v1/responses");
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let config = AdvisorConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        };
        let client = OpenAiResponsesClient::from_config(&config);
        let request = super::super::prompt::build_request(
            DEFAULT_MODEL,
            &Default::default(),
            crate::i18n::Lang::Zh,
        );

        let err = client
            .create_response(&request)
            .await
            .expect_err("missing key rejected");
        assert!(matches!(err, AdvisorError::MissingApiKey));
        assert_eq!(err.status(), 500);
    }
}
