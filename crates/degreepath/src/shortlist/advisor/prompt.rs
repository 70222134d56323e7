use serde::Serialize;

use crate::i18n::Lang;
use crate::shortlist::answers::ShortlistAnswers;

pub(crate) const MAX_RECOMMENDATIONS: usize = 8;

const SYSTEM_PROMPT: &str = concat!(
    "You are a study-abroad advisor for Germany. Data source constraint: use ONLY DAAD official website data (domain daad.de).",
    " Do not use any non-DAAD source. Return strict JSON only with this shape: ",
    r#"{"items":[{"id":"string","programName":"string","university":"string","city":"string","degree":"MSc|MA|MBA","reason":"string","sourceUrl":"https://..."}]}."#,
    " Exactly 8 items."
);

const USER_PREAMBLE: &str = concat!(
    "Use DAAD website only. Prefer pages under https://www.daad.de/ and DAAD degree database pages. ",
    "If you cannot find enough DAAD-backed programs, return fewer and explain in reason. ",
    "Questionnaire answers:\n"
);

/// Body of a `POST /responses` call.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub temperature: f32,
    pub tools: Vec<Tool>,
    pub input: Vec<InputMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub search_context_size: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMessage {
    pub role: &'static str,
    pub content: Vec<InputText>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputText {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl InputMessage {
    fn text(role: &'static str, text: String) -> Self {
        Self {
            role,
            content: vec![InputText {
                kind: "input_text",
                text,
            }],
        }
    }
}

#[derive(Serialize)]
struct PromptContext<'a> {
    lang: Lang,
    answers: &'a ShortlistAnswers,
}

pub(crate) fn build_request(model: &str, answers: &ShortlistAnswers, lang: Lang) -> ResponsesRequest {
    let context = serde_json::to_string_pretty(&PromptContext { lang, answers })
        .unwrap_or_else(|_| "{}".to_string());

    ResponsesRequest {
        model: model.to_string(),
        temperature: 0.2,
        tools: vec![Tool {
            kind: "web_search_preview",
            search_context_size: "medium",
        }],
        input: vec![
            InputMessage::text("system", SYSTEM_PROMPT.to_string()),
            InputMessage::text("user", format!("{USER_PREAMBLE}{context}")),
        ],
    }
}
