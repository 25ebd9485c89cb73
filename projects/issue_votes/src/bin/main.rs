use std::process::ExitCode;

use clap::Parser;
use interfaces_github_issues::{GitHubApiError, GitHubClient};
use projects_issue_votes::{
    actions::error_command,
    config::{Cli, ConfigError, Settings},
    i18n::Translations,
    run::{run, RunError, RunSummary},
};
use thiserror::Error;
use tracing::{error, info};
use utils_trace::tracing_init;

#[derive(Debug, Error)]
pub enum MainError {
    #[error("Config: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("GitHubClient: {source}")]
    GitHubClient {
        #[source]
        source: GitHubApiError,
    },

    #[error("Run: {source}")]
    Run {
        #[from]
        source: RunError,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is the normal case on CI.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let t = Translations::for_language(&cli.language());

    if let Err(err) = tracing_init(&cli.log_level) {
        eprintln!("{} TracingInit: {err}", t.error_prefix);
        return ExitCode::FAILURE;
    }

    match run_job(cli).await {
        Ok(summary) => {
            info!(
                tallied = summary.votes.len(),
                skipped = summary.skipped.len(),
                comments_written = summary.comments_written,
                ranking_issue = summary.ranking_issue,
                snapshot = %summary.snapshot_path.display(),
                "vote run finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{} {err}", t.error_prefix);
            println!("{}", error_command(&err.to_string()));
            ExitCode::FAILURE
        }
    }
}

async fn run_job(cli: Cli) -> Result<RunSummary, MainError> {
    let settings = Settings::from_cli(cli)?;

    info!(
        repository = %format!("{}/{}", settings.owner, settings.repo),
        ranking_issue = settings.ranking_issue_number,
        language = %settings.language,
        "starting vote run"
    );

    let client = GitHubClient::new(settings.client_config())
        .map_err(|source| MainError::GitHubClient { source })?;

    let summary = run(&client, &settings.run_settings()).await?;

    Ok(summary)
}
