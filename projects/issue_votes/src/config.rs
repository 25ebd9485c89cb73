use std::num::ParseIntError;
use std::path::PathBuf;

use clap::Parser;
use interfaces_github_issues::{GitHubClientConfig, DEFAULT_API_URL};
use thiserror::Error;

use crate::i18n::{Translations, DEFAULT_LANGUAGE};
use crate::run::RunSettings;

pub const DEFAULT_IGNORE_LABEL: &str = "ignore-issue";
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Command-line surface. Each flag falls back to the environment variable the
/// Actions runner sets for the matching action input.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "issue_votes",
    version,
    about = "Tally 👍/👎 reactions on open issues and publish a vote ranking"
)]
pub struct Cli {
    /// Token used for every API call.
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Issue hosting the ranking comment. Recreated when missing.
    #[arg(long, env = "INPUT_RANKING_ISSUE_NUMBER")]
    pub ranking_issue_number: Option<String>,

    /// Issues carrying this label are skipped (case-insensitive).
    #[arg(long, env = "INPUT_IGNORE_LABEL")]
    pub ignore_label: Option<String>,

    /// `en` or `es`; anything else uses `es`.
    #[arg(long, env = "INPUT_LANGUAGE")]
    pub language: Option<String>,

    /// Target repository as `owner/name`.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Web base used for issue links in the ranking table.
    #[arg(long, env = "GITHUB_SERVER_URL")]
    pub server_url: Option<String>,

    /// Directory the `.votes/` snapshot is written under.
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MissingToken: no token supplied (INPUT_TOKEN / --token)")]
    MissingToken,

    #[error("MissingRankingIssue: no ranking issue number supplied (INPUT_RANKING_ISSUE_NUMBER / --ranking-issue-number)")]
    MissingRankingIssue,

    #[error("InvalidRankingIssue {value:?}: {source}")]
    InvalidRankingIssue {
        value: String,
        source: ParseIntError,
    },

    #[error("MissingRepository: no repository supplied (GITHUB_REPOSITORY / --repository)")]
    MissingRepository,

    #[error("InvalidRepository {value:?}: expected owner/name")]
    InvalidRepository { value: String },
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub ranking_issue_number: u64,
    pub ignore_label: String,
    pub language: String,
    pub api_url: String,
    pub server_url: String,
    pub workspace: PathBuf,
}

/// Actions hands unset inputs over as empty strings.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_repository(value: &str) -> Result<(String, String), ConfigError> {
    match value.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ConfigError::InvalidRepository {
            value: value.to_string(),
        }),
    }
}

impl Cli {
    pub fn language(&self) -> String {
        non_empty(self.language.as_deref())
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string()
    }
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let token = non_empty(cli.token.as_deref())
            .ok_or(ConfigError::MissingToken)?
            .to_string();

        let raw_number = non_empty(cli.ranking_issue_number.as_deref()).ok_or(ConfigError::MissingRankingIssue)?;
        let ranking_issue_number = raw_number
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidRankingIssue {
                value: raw_number.to_string(),
                source,
            })?;

        let repository = non_empty(cli.repository.as_deref()).ok_or(ConfigError::MissingRepository)?;
        let (owner, repo) = parse_repository(repository)?;

        Ok(Self {
            token,
            owner,
            repo,
            ranking_issue_number,
            ignore_label: non_empty(cli.ignore_label.as_deref())
                .unwrap_or(DEFAULT_IGNORE_LABEL)
                .to_string(),
            language: cli.language(),
            api_url: non_empty(cli.api_url.as_deref())
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            server_url: non_empty(cli.server_url.as_deref())
                .unwrap_or(DEFAULT_SERVER_URL)
                .to_string(),
            workspace: cli
                .workspace
                .filter(|path| !path.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }

    pub fn translations(&self) -> &'static Translations {
        Translations::for_language(&self.language)
    }

    pub fn client_config(&self) -> GitHubClientConfig {
        GitHubClientConfig {
            token: self.token.clone(),
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            api_url: self.api_url.clone(),
        }
    }

    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            ranking_issue_number: self.ranking_issue_number,
            ignore_label: self.ignore_label.clone(),
            translations: self.translations(),
            workspace: self.workspace.clone(),
            server_url: self.server_url.clone(),
        }
    }
}
