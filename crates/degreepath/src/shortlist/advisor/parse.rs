use serde::{Deserialize, Serialize};

use super::prompt::MAX_RECOMMENDATIONS;
use super::AdvisorError;
use crate::shortlist::programs::Degree;

const DETAIL_LIMIT: usize = 1200;
const REQUIRED_SOURCE_DOMAIN: &str = "daad.de";

/// The subset of a Responses API reply the advisor reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsesPayload {
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub output: Option<Vec<OutputItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputItem {
    #[serde(default)]
    pub content: Option<Vec<OutputContent>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputContent {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A program suggested by the model, after filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub program_name: String,
    pub university: String,
    pub city: String,
    pub degree: Degree,
    pub reason: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    items: Option<Vec<RawItem>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    program_name: Option<String>,
    #[serde(default)]
    university: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    degree: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    source_url: Option<String>,
}

pub(crate) fn truncate_detail(text: &str) -> String {
    text.chars().take(DETAIL_LIMIT).collect()
}

/// `output_text` wins; otherwise the first `output_text` part across all output items.
pub(crate) fn extract_text(payload: &ResponsesPayload) -> Option<&str> {
    if let Some(text) = payload.output_text.as_deref() {
        return Some(text);
    }
    payload
        .output
        .iter()
        .flatten()
        .flat_map(|item| item.content.iter().flatten())
        .find(|part| part.kind.as_deref() == Some("output_text"))
        .and_then(|part| part.text.as_deref())
}

pub(crate) fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw;
    if let Some(prefix) = text.get(..7) {
        if prefix.eq_ignore_ascii_case("```json") {
            text = text[7..].trim_start();
        }
    }
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.trim_start();
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

pub(crate) fn parse_recommendations(raw: &str) -> Result<Vec<Recommendation>, AdvisorError> {
    let json_text = strip_code_fences(raw);
    let envelope: RawEnvelope =
        serde_json::from_str(json_text).map_err(|_| AdvisorError::InvalidJson {
            detail: truncate_detail(json_text),
        })?;

    let items = envelope.items.unwrap_or_default();
    if items.is_empty() {
        return Err(AdvisorError::NoRecommendations);
    }

    let filtered: Vec<Recommendation> = items
        .into_iter()
        .filter_map(|item| {
            let sourced = item
                .source_url
                .as_deref()
                .is_some_and(|url| url.contains(REQUIRED_SOURCE_DOMAIN));
            if !sourced {
                return None;
            }
            Some((
                item.id,
                non_empty(item.program_name)?,
                non_empty(item.university)?,
                non_empty(item.city)?,
                item.degree,
                item.reason,
            ))
        })
        .take(MAX_RECOMMENDATIONS)
        .enumerate()
        .map(
            |(index, (id, program_name, university, city, degree, reason))| Recommendation {
                id: id
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| format!("daad-{}", index + 1)),
                program_name,
                university,
                city,
                degree: Degree::normalize(degree.as_deref().unwrap_or("MSc")),
                reason: reason.unwrap_or_default(),
            },
        )
        .collect();

    if filtered.is_empty() {
        return Err(AdvisorError::NoSourcedRecommendations);
    }

    Ok(filtered)
}
