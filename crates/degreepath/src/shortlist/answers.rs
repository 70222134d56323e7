use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw questionnaire answers keyed by question id.
pub type ShortlistAnswers = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Low,
    Medium,
    High,
}

impl BudgetLevel {
    /// Higher weight means cheaper, so `a.weight() >= b.weight()` reads "a fits budget b".
    pub fn weight(self) -> u8 {
        match self {
            Self::Low => 3,
            Self::Medium => 2,
            Self::High => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitySize {
    Small,
    Medium,
    Large,
}

impl CitySize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intake {
    Winter,
    Summer,
    Both,
}

impl Intake {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Summer => "summer",
            Self::Both => "both",
        }
    }

    pub fn compatible_with(self, program: Intake) -> bool {
        self == Intake::Both || program == Intake::Both || self == program
    }
}

/// Coarse buckets derived from the raw answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedAnswers {
    pub program_keyword: String,
    pub budget: BudgetLevel,
    pub english_only: bool,
    pub language_score: f32,
    pub city_size: CitySize,
    pub intake: Intake,
}

impl NormalizedAnswers {
    pub fn from_answers(answers: &ShortlistAnswers) -> Self {
        let field = |key: &str, default: &'static str| {
            answers.get(key).map(String::as_str).unwrap_or(default)
        };

        Self {
            program_keyword: build_keyword(answers),
            budget: map_budget(field("monthlyBudget", "no_limit")),
            english_only: field("teachingLanguage", "no_pref") == "english",
            language_score: map_language_score(field("englishScore", "none")),
            city_size: map_city_size(field("citySize", "large")),
            intake: map_intake(field("mustThisYear", "not_sure")),
        }
    }

    /// Raw answers plus the derived keys, as forwarded to the advisor.
    pub fn enrich(answers: &ShortlistAnswers) -> ShortlistAnswers {
        let normalized = Self::from_answers(answers);
        let mut enriched = answers.clone();
        // Forwarded with the visitor's own casing; only the scorer matches lowercased.
        enriched.insert("programKeyword".to_string(), keyword_phrase(answers));
        enriched.insert("budget".to_string(), normalized.budget.as_str().to_string());
        enriched.insert(
            "englishOnly".to_string(),
            normalized.english_only.to_string(),
        );
        enriched.insert(
            "languageScore".to_string(),
            format_score(normalized.language_score),
        );
        enriched.insert(
            "citySize".to_string(),
            normalized.city_size.as_str().to_string(),
        );
        enriched.insert("intake".to_string(), normalized.intake.as_str().to_string());
        enriched
    }
}

fn format_score(score: f32) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

fn map_budget(value: &str) -> BudgetLevel {
    match value {
        "under_700" | "700_1000" => BudgetLevel::Low,
        "1000_1300" => BudgetLevel::Medium,
        _ => BudgetLevel::High,
    }
}

fn map_city_size(value: &str) -> CitySize {
    match value {
        "small" => CitySize::Small,
        "medium" => CitySize::Medium,
        _ => CitySize::Large,
    }
}

/// IELTS-equivalent band for the declared certificate.
fn map_language_score(value: &str) -> f32 {
    match value {
        "ielts_7_plus" | "toefl_100_plus" | "tdn5" | "dsh3" => 7.0,
        "ielts_65_70" | "toefl_90_100" | "c1" | "tdn4" | "dsh2" => 6.5,
        "ielts_6_65" | "toefl_80_90" | "b2" | "dsh1" => 6.0,
        _ => 5.5,
    }
}

fn map_intake(value: &str) -> Intake {
    if value == "yes" {
        Intake::Winter
    } else {
        Intake::Both
    }
}

fn category_keyword(value: &str) -> &str {
    match value {
        "engineering" => "engineering mechanical electrical",
        "cs_it" => "computer data software ai",
        "business" => "business economics management",
        "science" => "physics chemistry biology materials",
        "social" => "social policy law",
        "design" => "design media art",
        other => other,
    }
}

fn direction_keyword(value: &str) -> &str {
    match value {
        "theory" => "research theory",
        "practice" => "practice applied",
        "tech_mgmt" => "technology management",
        "salary" => "employment industry",
        "interest" => "interest focus",
        other => other,
    }
}

/// Lowercased subject keyword the scorer matches program tags against.
pub fn build_keyword(answers: &ShortlistAnswers) -> String {
    keyword_phrase(answers).to_lowercase()
}

fn keyword_phrase(answers: &ShortlistAnswers) -> String {
    let get = |key: &str| answers.get(key).map(String::as_str).unwrap_or_default();

    [
        category_keyword(get("programCategory")),
        direction_keyword(get("trainingDirection")),
        get("undergraduateMajor"),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> ShortlistAnswers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_answers_missing() {
        let normalized = NormalizedAnswers::from_answers(&ShortlistAnswers::new());
        assert_eq!(normalized.budget, BudgetLevel::High);
        assert!(!normalized.english_only);
        assert_eq!(normalized.language_score, 5.5);
        assert_eq!(normalized.city_size, CitySize::Large);
        assert_eq!(normalized.intake, Intake::Both);
        assert!(normalized.program_keyword.is_empty());
    }

    #[test]
    fn maps_budget_and_language_tiers() {
        let normalized = NormalizedAnswers::from_answers(&answers(&[
            ("monthlyBudget", "700_1000"),
            ("englishScore", "c1"),
            ("teachingLanguage", "english"),
            ("citySize", "medium"),
            ("mustThisYear", "yes"),
        ]));
        assert_eq!(normalized.budget, BudgetLevel::Low);
        assert_eq!(normalized.language_score, 6.5);
        assert!(normalized.english_only);
        assert_eq!(normalized.city_size, CitySize::Medium);
        assert_eq!(normalized.intake, Intake::Winter);
    }

    #[test]
    fn keyword_expands_category_and_direction() {
        let keyword = build_keyword(&answers(&[
            ("programCategory", "cs_it"),
            ("trainingDirection", "tech_mgmt"),
            ("undergraduateMajor", "Information Systems"),
        ]));
        assert_eq!(
            keyword,
            "computer data software ai technology management information systems"
        );
    }

    #[test]
    fn unknown_category_passes_through() {
        let keyword = build_keyword(&answers(&[("programCategory", "Robotics")]));
        assert_eq!(keyword, "robotics");
    }

    #[test]
    fn enrich_adds_derived_keys_and_keeps_raw_answers() {
        let enriched = NormalizedAnswers::enrich(&answers(&[
            ("monthlyBudget", "1000_1300"),
            ("englishScore", "ielts_7_plus"),
            ("gpaValue", "3.2"),
        ]));
        assert_eq!(enriched.get("budget").map(String::as_str), Some("medium"));
        assert_eq!(enriched.get("languageScore").map(String::as_str), Some("7"));
        assert_eq!(enriched.get("englishOnly").map(String::as_str), Some("false"));
        assert_eq!(enriched.get("intake").map(String::as_str), Some("both"));
        assert_eq!(enriched.get("gpaValue").map(String::as_str), Some("3.2"));
    }

    #[test]
    fn enriched_keyword_keeps_visitor_casing() {
        let raw = answers(&[
            ("trainingDirection", "practice"),
            ("undergraduateMajor", "Mechanical Engineering"),
        ]);
        let enriched = NormalizedAnswers::enrich(&raw);
        assert_eq!(
            enriched.get("programKeyword").map(String::as_str),
            Some("practice applied Mechanical Engineering")
        );
        assert_eq!(
            NormalizedAnswers::from_answers(&raw).program_keyword,
            "practice applied mechanical engineering"
        );
    }

    #[test]
    fn intake_compatibility_is_symmetric_for_both() {
        assert!(Intake::Both.compatible_with(Intake::Summer));
        assert!(Intake::Winter.compatible_with(Intake::Both));
        assert!(!Intake::Winter.compatible_with(Intake::Summer));
    }
}
