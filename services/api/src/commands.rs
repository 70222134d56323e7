use crate::infra::{build_shortlist_service, parse_answer};
use clap::Args;
use degreepath::config::AppConfig;
use degreepath::content::PostLibrary;
use degreepath::error::AppError;
use degreepath::i18n::{with_lang, Lang};
use degreepath::shortlist::{Recommendation, ScoredProgram, ShortlistAnswers};

#[derive(Args, Debug, Default)]
pub(crate) struct ShortlistArgs {
    /// Questionnaire answer as key=value. Repeat for each question.
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<(String, String)>,
    /// Output language (zh or en). Defaults to zh.
    #[arg(long)]
    pub(crate) lang: Option<String>,
    /// Maximum number of ranked programs to print.
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Ask the language-model advisor instead of the rule-based ranking.
    #[arg(long)]
    pub(crate) advisor: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PostsArgs {
    /// Language used for the printed links (zh or en). Defaults to zh.
    #[arg(long)]
    pub(crate) lang: Option<String>,
}

pub(crate) async fn run_shortlist(args: ShortlistArgs) -> Result<(), AppError> {
    let ShortlistArgs {
        answers,
        lang,
        limit,
        advisor,
    } = args;

    let config = AppConfig::load()?;
    let service = build_shortlist_service(&config)?;
    let lang = Lang::from_body_hint(lang.as_deref());
    let answers: ShortlistAnswers = answers.into_iter().collect();

    if advisor {
        let results = service.recommend(&answers, lang).await?;
        render_recommendations(&results, lang);
    } else {
        let results = service.rank(&answers, lang, limit)?;
        render_ranked(&results, service.pool().len(), lang);
    }

    Ok(())
}

pub(crate) fn run_posts(args: PostsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let lang = Lang::from_body_hint(args.lang.as_deref());
    let library = PostLibrary::new(config.content.posts_dir());
    let summaries = library.summaries()?;

    println!("Posts in {} ({} total)", library.dir().display(), summaries.len());
    if summaries.is_empty() {
        println!("  (no posts found)");
        return Ok(());
    }

    for summary in summaries {
        let date = if summary.date.is_empty() {
            "undated"
        } else {
            summary.date.as_str()
        };
        println!(
            "- {} [{}] {}",
            date,
            if summary.tag.is_empty() { "-" } else { summary.tag.as_str() },
            summary.title
        );
        println!("    {}", with_lang(&format!("/posts/{}", summary.slug), lang));
    }

    Ok(())
}

fn render_ranked(results: &[ScoredProgram], pool_size: usize, lang: Lang) {
    println!(
        "Rule-based shortlist ({} of {} programs, lang={})",
        results.len(),
        pool_size,
        lang
    );
    for (index, row) in results.iter().enumerate() {
        println!(
            "{:>2}. [{:>3}] {} ({})",
            index + 1,
            row.score,
            row.program.program_name,
            row.reason
        );
        let breakdown: Vec<String> = row
            .components
            .iter()
            .map(|component| format!("{:?}+{}", component.factor, component.points))
            .collect();
        if !breakdown.is_empty() {
            println!("      {}", breakdown.join(" "));
        }
    }
}

fn render_recommendations(results: &[Recommendation], lang: Lang) {
    println!("Advisor shortlist ({} programs, lang={})", results.len(), lang);
    for (index, item) in results.iter().enumerate() {
        println!(
            "{:>2}. {} {:?} - {}, {}",
            index + 1,
            item.program_name,
            item.degree,
            item.university,
            item.city
        );
        println!("      {}", item.reason);
    }
}
