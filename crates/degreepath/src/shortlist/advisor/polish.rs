use super::parse::Recommendation;
use crate::i18n::Lang;

/// Phrases the site must never show next to a recommendation.
pub const DEFAULT_BANNED_PHRASES: &[&str] = &[
    "guaranteed admission",
    "guarantee admission",
    "100% admission",
    "100%",
    "保证录取",
    "包录取",
    "稳录",
    "必录",
];

/// Cleans model-written reasons: strips banned phrases, then pads short reasons with
/// the program's university and city.
#[derive(Debug, Clone)]
pub struct ReasonPolisher {
    banned: Vec<String>,
}

impl Default for ReasonPolisher {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_PHRASES.iter().copied())
    }
}

impl ReasonPolisher {
    pub fn new<'a>(banned: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            banned: banned
                .into_iter()
                .map(str::to_ascii_lowercase)
                .filter(|phrase| !phrase.is_empty())
                .collect(),
        }
    }

    fn min_chars(lang: Lang) -> usize {
        match lang {
            Lang::En => 40,
            Lang::Zh => 16,
        }
    }

    pub fn polish(&self, recommendation: &mut Recommendation, lang: Lang) {
        let stripped = self.strip(&recommendation.reason);
        recommendation.reason = pad(stripped, recommendation, lang);
    }

    pub fn strip(&self, reason: &str) -> String {
        let mut text = reason.to_string();
        for phrase in &self.banned {
            // ASCII lowercasing keeps byte offsets aligned with `text`.
            while let Some(start) = text.to_ascii_lowercase().find(phrase.as_str()) {
                text.replace_range(start..start + phrase.len(), "");
            }
        }
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed
            .trim_matches(|c: char| matches!(c, ',' | ';' | '，' | '；' | '、') || c.is_whitespace())
            .to_string()
    }
}

fn pad(reason: String, recommendation: &Recommendation, lang: Lang) -> String {
    if reason.chars().count() >= ReasonPolisher::min_chars(lang) {
        return reason;
    }

    let context = match lang {
        Lang::En => format!(
            "{} at {} in {}.",
            recommendation.program_name, recommendation.university, recommendation.city
        ),
        Lang::Zh => format!(
            "{}（{}，{}）",
            recommendation.program_name, recommendation.university, recommendation.city
        ),
    };

    if reason.is_empty() {
        context
    } else {
        match lang {
            Lang::En => format!("{reason} {context}"),
            Lang::Zh => format!("{reason}。{context}"),
        }
    }
}
