use degreepath::config::{AppConfig, AppEnvironment};
use degreepath::content::PostLibrary;
use degreepath::error::AppError;
use degreepath::shortlist::{
    OpenAiResponsesClient, ProgramAdvisor, ProgramPool, Questionnaire, ShortlistService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) environment: AppEnvironment,
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) posts: PostLibrary,
    pub(crate) shortlist: Arc<ShortlistService>,
}

/// Loads the questionnaire and program pool and wires the advisor client from config.
pub(crate) fn build_shortlist_service(config: &AppConfig) -> Result<ShortlistService, AppError> {
    let questionnaire = Questionnaire::from_path(config.content.questionnaire_path())?;
    let pool = ProgramPool::from_path(config.content.programs_path())?;

    if config.advisor.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; advisor requests will fail");
    }
    let client = OpenAiResponsesClient::from_config(&config.advisor);
    let advisor = ProgramAdvisor::new(Arc::new(client), config.advisor.model.clone());

    info!(
        sections = questionnaire.sections.len(),
        questions = questionnaire.question_count(),
        programs = pool.len(),
        model = %config.advisor.model,
        "shortlist content loaded"
    );

    Ok(ShortlistService::new(
        Arc::new(questionnaire),
        Arc::new(pool),
        Arc::new(advisor),
        config.content.shortlist_limit,
    ))
}

/// Parses a `key=value` questionnaire answer passed on the command line.
pub(crate) fn parse_answer(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing answer key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_answers() {
        assert_eq!(
            parse_answer("monthlyBudget = under_700"),
            Ok(("monthlyBudget".to_string(), "under_700".to_string()))
        );
        assert_eq!(
            parse_answer("undergraduateMajor=Computer Science"),
            Ok((
                "undergraduateMajor".to_string(),
                "Computer Science".to_string()
            ))
        );
    }

    #[test]
    fn rejects_malformed_answers() {
        assert!(parse_answer("monthlyBudget").is_err());
        assert!(parse_answer("=value").is_err());
    }
}
