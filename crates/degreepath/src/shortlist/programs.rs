use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::answers::{BudgetLevel, CitySize, Intake};
use crate::content::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Degree {
    MSc,
    MA,
    MBA,
}

impl Degree {
    /// Lenient mapping for free-form upstream values; anything unrecognised is an MSc.
    pub fn normalize(value: &str) -> Self {
        match value {
            "MA" => Self::MA,
            "MBA" => Self::MBA,
            _ => Self::MSc,
        }
    }
}

/// One candidate program in the curated pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub program_name: String,
    pub university: String,
    pub city: String,
    pub city_size: CitySize,
    pub tuition_level: BudgetLevel,
    pub english_friendly: bool,
    pub min_ielts: f32,
    pub intake: Intake,
    pub degree: Degree,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProgramFile {
    programs: Vec<Program>,
}

/// Fixed pool the rule-based scorer ranks against.
#[derive(Debug, Clone, Default)]
pub struct ProgramPool {
    programs: Vec<Program>,
}

impl ProgramPool {
    pub fn new(programs: Vec<Program>) -> Self {
        Self { programs }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| ContentError::io(path, err))?;
        Self::from_json(&raw).map_err(|reason| ContentError::Invalid {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, String> {
        let file: ProgramFile = serde_json::from_str(raw).map_err(|err| err.to_string())?;
        Ok(Self::new(file.programs))
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_program_file() {
        let raw = r#"{"programs":[{"id":"tum-ei","programName":"Electrical Engineering","university":"TU Munich","city":"Munich","citySize":"large","tuitionLevel":"high","englishFriendly":true,"minIelts":6.5,"intake":"winter","degree":"MSc","tags":["electrical","engineering"]}]}"#;
        let pool = ProgramPool::from_json(raw).expect("pool parses");
        assert_eq!(pool.len(), 1);
        let program = &pool.programs()[0];
        assert_eq!(program.city_size, CitySize::Large);
        assert_eq!(program.tuition_level, BudgetLevel::High);
        assert_eq!(program.degree, Degree::MSc);
    }

    #[test]
    fn rejects_unknown_degree_in_pool() {
        let raw = r#"{"programs":[{"id":"x","programName":"x","university":"x","city":"x","citySize":"small","tuitionLevel":"low","englishFriendly":false,"minIelts":6.0,"intake":"both","degree":"PhD","tags":[]}]}"#;
        assert!(ProgramPool::from_json(raw).is_err());
    }

    #[test]
    fn normalizes_upstream_degrees() {
        assert_eq!(Degree::normalize("MBA"), Degree::MBA);
        assert_eq!(Degree::normalize("M.Eng"), Degree::MSc);
    }

    #[test]
    fn bundled_pool_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../content/daad-programs.json");
        let pool = ProgramPool::from_path(path).expect("bundled pool loads");
        assert!(pool.len() >= 12);
    }
}
