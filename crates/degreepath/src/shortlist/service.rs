use std::sync::Arc;

use tracing::debug;

use super::advisor::{AdvisorError, ProgramAdvisor, Recommendation};
use super::answers::ShortlistAnswers;
use super::programs::ProgramPool;
use super::questionnaire::{AnswerError, Questionnaire};
use super::scoring::{shortlist_by_rules, ScoredProgram};
use crate::i18n::Lang;

/// Service composing the questionnaire, the program pool, and the advisor.
pub struct ShortlistService {
    questionnaire: Arc<Questionnaire>,
    pool: Arc<ProgramPool>,
    advisor: Arc<ProgramAdvisor>,
    default_limit: usize,
}

impl ShortlistService {
    pub fn new(
        questionnaire: Arc<Questionnaire>,
        pool: Arc<ProgramPool>,
        advisor: Arc<ProgramAdvisor>,
        default_limit: usize,
    ) -> Self {
        Self {
            questionnaire,
            pool,
            advisor,
            default_limit,
        }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn pool(&self) -> &ProgramPool {
        &self.pool
    }

    /// Validate the answers, then rank the pool by the weighted rule set.
    pub fn rank(
        &self,
        answers: &ShortlistAnswers,
        lang: Lang,
        limit: Option<usize>,
    ) -> Result<Vec<ScoredProgram>, ShortlistError> {
        self.questionnaire.validate(answers)?;
        let limit = limit
            .filter(|limit| *limit > 0)
            .unwrap_or(self.default_limit);
        let ranked = shortlist_by_rules(&self.pool, answers, lang, limit);
        debug!(pool = self.pool.len(), returned = ranked.len(), "rule shortlist ranked");
        Ok(ranked)
    }

    /// Ask the advisor for DAAD-backed recommendations. Answers go to the model as given.
    pub async fn recommend(
        &self,
        answers: &ShortlistAnswers,
        lang: Lang,
    ) -> Result<Vec<Recommendation>, ShortlistError> {
        Ok(self.advisor.recommend(answers, lang).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShortlistError {
    #[error(transparent)]
    Answers(#[from] AnswerError),
    #[error(transparent)]
    Advisor(#[from] AdvisorError),
}

impl ShortlistError {
    pub fn status(&self) -> u16 {
        match self {
            ShortlistError::Answers(_) => 422,
            ShortlistError::Advisor(err) => err.status(),
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ShortlistError::Answers(err) => err.to_string(),
            ShortlistError::Advisor(err) => err.detail(),
        }
    }
}
