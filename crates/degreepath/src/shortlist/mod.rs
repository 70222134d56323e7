//! School shortlist: questionnaire definition, answer normalization, rule-based ranking,
//! and the AI-backed advisor that superseded it on the public endpoint.

pub mod advisor;
pub mod answers;
pub mod programs;
pub mod questionnaire;
pub mod scoring;
mod service;

pub use advisor::{
    public_error_message, AdvisorError, OpenAiResponsesClient, ProgramAdvisor, Recommendation,
    ResponsesClient,
};
pub use answers::{BudgetLevel, CitySize, Intake, NormalizedAnswers, ShortlistAnswers};
pub use programs::{Degree, Program, ProgramPool};
pub use questionnaire::{AnswerError, Questionnaire};
pub use scoring::{shortlist_by_rules, ScoreComponent, ScoreFactor, ScoredProgram, DEFAULT_LIMIT};
pub use service::{ShortlistError, ShortlistService};
