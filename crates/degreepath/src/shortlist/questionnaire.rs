use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::answers::ShortlistAnswers;
use crate::content::ContentError;
use crate::i18n::Lang;

/// Chinese and English variants of a UI string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub zh: String,
    pub en: String,
}

impl LocalizedText {
    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::Zh => &self.zh,
            Lang::En => &self.en,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Options,
    Input,
    Gpa,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: LocalizedText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<LocalizedText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub icon: String,
    pub title: LocalizedText,
    pub questions: Vec<Question>,
}

/// The multi-step shortlist questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("'{value}' is not a valid option for question '{question}'")]
    UnknownOption { question: String, value: String },
}

impl Questionnaire {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| ContentError::io(path, err))?;
        serde_json::from_str(&raw).map_err(|err| ContentError::Invalid {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    pub fn question_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.questions.len())
            .sum()
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
            .find(|question| question.id == id)
    }

    /// Option questions must carry one of their declared values. Free-text, GPA and
    /// unknown keys (including derived ones such as `programKeyword`) pass through.
    pub fn validate(&self, answers: &ShortlistAnswers) -> Result<(), AnswerError> {
        for (key, value) in answers {
            let Some(question) = self.question(key) else {
                continue;
            };
            if question.kind != QuestionKind::Options || value.is_empty() {
                continue;
            }
            if !question.options.iter().any(|option| &option.value == value) {
                return Err(AnswerError::UnknownOption {
                    question: key.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn bundled() -> Questionnaire {
        let path =
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../content/school-shortlist-questionnaire.json");
        Questionnaire::from_path(path).expect("bundled questionnaire loads")
    }

    #[test]
    fn bundled_definition_has_seven_sections() {
        let questionnaire = bundled();
        assert_eq!(questionnaire.sections.len(), 7);
        assert_eq!(questionnaire.question_count(), 21);
        assert!(questionnaire.section("budget").is_some());
    }

    #[test]
    fn validate_rejects_unknown_option_value() {
        let questionnaire = bundled();
        let mut answers = ShortlistAnswers::new();
        answers.insert("monthlyBudget".to_string(), "a_lot".to_string());

        let err = questionnaire.validate(&answers).expect_err("invalid option");
        assert_eq!(
            err,
            AnswerError::UnknownOption {
                question: "monthlyBudget".to_string(),
                value: "a_lot".to_string(),
            }
        );
    }

    #[test]
    fn validate_allows_free_text_and_derived_keys() {
        let questionnaire = bundled();
        let mut answers = ShortlistAnswers::new();
        answers.insert("undergraduateMajor".to_string(), "Mechatronics".to_string());
        answers.insert("programKeyword".to_string(), "engineering".to_string());
        answers.insert("monthlyBudget".to_string(), "under_700".to_string());
        answers.insert("gpaValue".to_string(), "3.4".to_string());

        assert!(questionnaire.validate(&answers).is_ok());
    }

    #[test]
    fn localized_text_picks_language() {
        let text = LocalizedText {
            zh: "预算".to_string(),
            en: "Budget".to_string(),
        };
        assert_eq!(text.get(Lang::En), "Budget");
        assert_eq!(text.get(Lang::Zh), "预算");
    }
}
