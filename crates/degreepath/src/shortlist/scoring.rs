use serde::Serialize;

use super::answers::{NormalizedAnswers, ShortlistAnswers};
use super::programs::{Program, ProgramPool};
use crate::i18n::Lang;

pub const DEFAULT_LIMIT: usize = 12;

/// Factors the rule set awards points for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Budget,
    TeachingLanguage,
    LanguageScore,
    CitySize,
    Intake,
    Subject,
}

/// Discrete contribution to a program's score, kept for transparency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProgram {
    pub program: Program,
    pub score: u16,
    pub reason: String,
    pub components: Vec<ScoreComponent>,
}

/// Ranks the pool against the answers, best first, keeping at most `limit` programs.
pub fn shortlist_by_rules(
    pool: &ProgramPool,
    answers: &ShortlistAnswers,
    lang: Lang,
    limit: usize,
) -> Vec<ScoredProgram> {
    let normalized = NormalizedAnswers::from_answers(answers);

    let mut scored: Vec<ScoredProgram> = pool
        .programs()
        .iter()
        .map(|program| {
            let components = score_program(program, &normalized);
            let score = components.iter().map(|component| component.points).sum();
            ScoredProgram {
                program: program.clone(),
                score,
                reason: rule_reason(program, lang),
                components,
            }
        })
        .collect();

    // stable: equal scores keep pool order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

fn score_program(program: &Program, answers: &NormalizedAnswers) -> Vec<ScoreComponent> {
    let mut components = Vec::new();
    let mut award = |factor, points| components.push(ScoreComponent { factor, points });

    if program.tuition_level == answers.budget {
        award(ScoreFactor::Budget, 22);
    } else if program.tuition_level.weight() >= answers.budget.weight() {
        award(ScoreFactor::Budget, 10);
    }

    if !answers.english_only || program.english_friendly {
        award(ScoreFactor::TeachingLanguage, 14);
    }

    if answers.language_score >= program.min_ielts {
        award(ScoreFactor::LanguageScore, 18);
    }

    if program.city_size == answers.city_size {
        award(ScoreFactor::CitySize, 10);
    }

    if answers.intake.compatible_with(program.intake) {
        award(ScoreFactor::Intake, 10);
    }

    let keyword = answers.program_keyword.as_str();
    if program
        .tags
        .iter()
        .any(|tag| keyword.contains(tag.as_str()) || tag.contains(keyword))
    {
        award(ScoreFactor::Subject, 26);
    }

    components
}

/// `university · city · tag, tag` with a locale-appropriate tag separator.
pub fn rule_reason(program: &Program, lang: Lang) -> String {
    let separator = match lang {
        Lang::En => ", ",
        Lang::Zh => "、",
    };
    let tags: Vec<&str> = program.tags.iter().take(2).map(String::as_str).collect();
    format!(
        "{} · {} · {}",
        program.university,
        program.city,
        tags.join(separator)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortlist::answers::{BudgetLevel, CitySize, Intake};
    use crate::shortlist::programs::Degree;

    fn program(id: &str, tuition: BudgetLevel, city_size: CitySize, tags: &[&str]) -> Program {
        Program {
            id: id.to_string(),
            program_name: format!("{id} program"),
            university: format!("{id} University"),
            city: "Aachen".to_string(),
            city_size,
            tuition_level: tuition,
            english_friendly: true,
            min_ielts: 6.5,
            intake: Intake::Winter,
            degree: Degree::MSc,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    fn answers(pairs: &[(&str, &str)]) -> ShortlistAnswers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn full_match_scores_every_factor() {
        let pool = ProgramPool::new(vec![program(
            "rwth",
            BudgetLevel::Low,
            CitySize::Medium,
            &["mechanical", "engineering"],
        )]);
        let ranked = shortlist_by_rules(
            &pool,
            &answers(&[
                ("monthlyBudget", "under_700"),
                ("teachingLanguage", "english"),
                ("englishScore", "ielts_7_plus"),
                ("citySize", "medium"),
                ("mustThisYear", "yes"),
                ("programCategory", "engineering"),
            ]),
            Lang::En,
            DEFAULT_LIMIT,
        );

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 22 + 14 + 18 + 10 + 10 + 26);
        assert_eq!(ranked[0].components.len(), 6);
        assert_eq!(
            ranked[0].reason,
            "rwth University · Aachen · mechanical, engineering"
        );
    }

    #[test]
    fn cheaper_program_gets_partial_budget_credit() {
        let pool = ProgramPool::new(vec![program("cheap", BudgetLevel::Low, CitySize::Small, &[])]);
        let ranked = shortlist_by_rules(
            &pool,
            &answers(&[("monthlyBudget", "1000_1300")]),
            Lang::Zh,
            DEFAULT_LIMIT,
        );
        let budget = ranked[0]
            .components
            .iter()
            .find(|component| component.factor == ScoreFactor::Budget)
            .expect("budget component");
        assert_eq!(budget.points, 10);
    }

    #[test]
    fn pricier_program_gets_no_budget_credit() {
        let pool = ProgramPool::new(vec![program("dear", BudgetLevel::High, CitySize::Small, &[])]);
        let ranked = shortlist_by_rules(
            &pool,
            &answers(&[("monthlyBudget", "under_700")]),
            Lang::Zh,
            DEFAULT_LIMIT,
        );
        assert!(ranked[0]
            .components
            .iter()
            .all(|component| component.factor != ScoreFactor::Budget));
    }

    #[test]
    fn sorts_descending_and_truncates() {
        let pool = ProgramPool::new(vec![
            program("a", BudgetLevel::High, CitySize::Small, &["design"]),
            program("b", BudgetLevel::High, CitySize::Large, &["computer"]),
            program("c", BudgetLevel::High, CitySize::Large, &["law"]),
        ]);
        let ranked = shortlist_by_rules(
            &pool,
            &answers(&[("programCategory", "cs_it")]),
            Lang::Zh,
            2,
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].program.id, "b");
        assert_eq!(ranked[1].program.id, "c");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn chinese_reason_uses_enumeration_comma() {
        let reason = rule_reason(
            &program("fu", BudgetLevel::Low, CitySize::Large, &["policy", "law", "social"]),
            Lang::Zh,
        );
        assert_eq!(reason, "fu University · Aachen · policy、law");
    }

    #[test]
    fn empty_keyword_matches_any_tag() {
        let pool = ProgramPool::new(vec![program("x", BudgetLevel::High, CitySize::Large, &["art"])]);
        let ranked = shortlist_by_rules(&pool, &ShortlistAnswers::new(), Lang::Zh, 1);
        assert!(ranked[0]
            .components
            .iter()
            .any(|component| component.factor == ScoreFactor::Subject));
    }
}
