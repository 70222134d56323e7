use crate::commands::{run_posts, run_shortlist, PostsArgs, ShortlistArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use degreepath::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "DegreePath",
    about = "Run the DegreePath content and school shortlist service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank the program pool against questionnaire answers
    Shortlist(ShortlistArgs),
    /// List the published posts, newest first
    Posts(PostsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Shortlist(args) => run_shortlist(args).await,
        Command::Posts(args) => run_posts(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["degreepath-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn collects_repeated_answers() {
        let cli = Cli::try_parse_from([
            "degreepath-api",
            "shortlist",
            "--answer",
            "citySize=large",
            "--answer",
            "monthlyBudget=under_700",
            "--lang",
            "en",
            "--limit",
            "5",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Shortlist(args)) => {
                assert_eq!(args.answers.len(), 2);
                assert_eq!(args.answers[1].0, "monthlyBudget");
                assert_eq!(args.lang.as_deref(), Some("en"));
                assert_eq!(args.limit, Some(5));
                assert!(!args.advisor);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_answers_without_separator() {
        let result = Cli::try_parse_from(["degreepath-api", "shortlist", "--answer", "citySize"]);
        assert!(result.is_err());
    }
}
