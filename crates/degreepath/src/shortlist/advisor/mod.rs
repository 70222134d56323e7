//! AI-backed program recommendations.
//!
//! The advisor asks a Responses-style language-model endpoint for DAAD-listed programs,
//! then filters and cleans whatever comes back before it reaches a visitor.

mod client;
mod parse;
mod polish;
mod prompt;

pub use client::{OpenAiResponsesClient, ResponsesClient};
pub use parse::{OutputContent, OutputItem, Recommendation, ResponsesPayload};
pub use polish::{ReasonPolisher, DEFAULT_BANNED_PHRASES};
pub use prompt::{InputMessage, InputText, ResponsesRequest, Tool};

use std::sync::Arc;

use tracing::{debug, info};

use super::answers::ShortlistAnswers;
use crate::i18n::Lang;

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("Missing OPENAI_API_KEY")]
    MissingApiKey,
    #[error("OpenAI request failed")]
    Upstream { status: u16, detail: String },
    #[error("OpenAI request could not be completed: {0}")]
    Transport(String),
    #[error("OpenAI returned empty content")]
    EmptyContent,
    #[error("Invalid JSON from OpenAI")]
    InvalidJson { detail: String },
    #[error("No recommendations returned by OpenAI")]
    NoRecommendations,
    #[error("No DAAD-domain recommendations after filtering")]
    NoSourcedRecommendations,
}

impl AdvisorError {
    /// HTTP status surfaced to the caller; upstream statuses pass through.
    pub fn status(&self) -> u16 {
        match self {
            AdvisorError::MissingApiKey => 500,
            AdvisorError::Upstream { status, .. } => *status,
            AdvisorError::Transport(_)
            | AdvisorError::EmptyContent
            | AdvisorError::InvalidJson { .. }
            | AdvisorError::NoRecommendations
            | AdvisorError::NoSourcedRecommendations => 502,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AdvisorError::Upstream { detail, .. } | AdvisorError::InvalidJson { detail } => {
                detail.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Visitor-facing message for a failed shortlist request.
pub fn public_error_message(status: u16, lang: Lang) -> &'static str {
    if lang == Lang::Zh {
        return "暂时无法生成基于 DAAD 官网的推荐。";
    }
    match status {
        401 => "OpenAI key is invalid.",
        403 => "OpenAI access is forbidden for this model/tool.",
        429 => "OpenAI quota/rate limit exceeded.",
        status if status >= 500 => "Unable to generate DAAD-based recommendations right now.",
        _ => "Failed to generate shortlist.",
    }
}

/// Builds the prompt, calls the model, and post-processes the reply.
pub struct ProgramAdvisor {
    client: Arc<dyn ResponsesClient>,
    model: String,
    polisher: ReasonPolisher,
}

impl ProgramAdvisor {
    pub fn new(client: Arc<dyn ResponsesClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            polisher: ReasonPolisher::default(),
        }
    }

    pub fn with_polisher(mut self, polisher: ReasonPolisher) -> Self {
        self.polisher = polisher;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn recommend(
        &self,
        answers: &ShortlistAnswers,
        lang: Lang,
    ) -> Result<Vec<Recommendation>, AdvisorError> {
        let request = prompt::build_request(&self.model, answers, lang);
        let payload = self.client.create_response(&request).await?;

        let raw = parse::extract_text(&payload)
            .filter(|text| !text.is_empty())
            .ok_or(AdvisorError::EmptyContent)?;
        debug!(chars = raw.chars().count(), "advisor reply received");

        let mut recommendations = parse::parse_recommendations(raw)?;
        for recommendation in &mut recommendations {
            self.polisher.polish(recommendation, lang);
        }

        info!(
            model = %self.model,
            %lang,
            count = recommendations.len(),
            "advisor recommendations ready"
        );
        Ok(recommendations)
    }
}

impl std::fmt::Debug for ProgramAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramAdvisor")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedClient {
        reply: Mutex<Option<Result<ResponsesPayload, AdvisorError>>>,
        seen_models: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn replying(reply: Result<ResponsesPayload, AdvisorError>) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(reply)),
                seen_models: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ResponsesClient for ScriptedClient {
        async fn create_response(
            &self,
            request: &ResponsesRequest,
        ) -> Result<ResponsesPayload, AdvisorError> {
            self.seen_models
                .lock()
                .expect("models mutex")
                .push(request.model.clone());
            self.reply
                .lock()
                .expect("reply mutex")
                .take()
                .expect("single scripted reply")
        }
    }

    fn text_payload(text: &str) -> ResponsesPayload {
        ResponsesPayload {
            output_text: Some(text.to_string()),
            output: None,
        }
    }

    #[tokio::test]
    async fn recommend_filters_and_polishes() {
        let client = ScriptedClient::replying(Ok(text_payload(
            "```json\n{\"items\":[{\"programName\":\"Photonics\",\"university\":\"FSU Jena\",\"city\":\"Jena\",\"degree\":\"MSc\",\"reason\":\"保证录取\",\"sourceUrl\":\"https://www.daad.de/x\"}]}\n```",
        )));
        let advisor = ProgramAdvisor::new(client.clone(), "gpt-5-mini");

        let results = advisor
            .recommend(&ShortlistAnswers::new(), Lang::Zh)
            .await
            .expect("recommendations");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "daad-1");
        assert_eq!(results[0].reason, "Photonics（FSU Jena，Jena）");
        assert_eq!(
            client.seen_models.lock().expect("models").as_slice(),
            ["gpt-5-mini".to_string()]
        );
    }

    #[tokio::test]
    async fn empty_reply_is_bad_gateway() {
        let advisor = ProgramAdvisor::new(
            ScriptedClient::replying(Ok(ResponsesPayload::default())),
            "gpt-5-mini",
        );
        let err = advisor
            .recommend(&ShortlistAnswers::new(), Lang::En)
            .await
            .expect_err("empty content");
        assert!(matches!(err, AdvisorError::EmptyContent));
        assert_eq!(err.status(), 502);
    }

    #[tokio::test]
    async fn upstream_status_passes_through() {
        let advisor = ProgramAdvisor::new(
            ScriptedClient::replying(Err(AdvisorError::Upstream {
                status: 429,
                detail: "rate limited".to_string(),
            })),
            "gpt-5-mini",
        );
        let err = advisor
            .recommend(&ShortlistAnswers::new(), Lang::En)
            .await
            .expect_err("upstream error");
        assert_eq!(err.status(), 429);
        assert_eq!(err.detail(), "rate limited");
    }

    #[test]
    fn public_messages_follow_status_and_language() {
        assert_eq!(public_error_message(401, Lang::En), "OpenAI key is invalid.");
        assert_eq!(
            public_error_message(503, Lang::En),
            "Unable to generate DAAD-based recommendations right now."
        );
        assert_eq!(public_error_message(400, Lang::En), "Failed to generate shortlist.");
        assert_eq!(
            public_error_message(429, Lang::Zh),
            "暂时无法生成基于 DAAD 官网的推荐。"
        );
    }
}
