use std::path::PathBuf;

use interfaces_github_issues::GitHubApiError;
use thiserror::Error;
use tracing::info;

use crate::collector::collect_open_issues;
use crate::comments::{upsert_marker_comment, vote_comment_body, UpsertMode, ISSUE_VOTE_MARKER};
use crate::i18n::Translations;
use crate::ranking::{publish_ranking, ranking_body, top_entries, IssueLinks, RankingError};
use crate::snapshot::{write_snapshot, SnapshotError};
use crate::tally::{tally_issue, Votes};
use crate::tracker::IssueTracker;

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub ranking_issue_number: u64,
    pub ignore_label: String,
    pub translations: &'static Translations,
    /// Directory the `.votes/` snapshot is written under.
    pub workspace: PathBuf,
    pub server_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub votes: Votes,
    pub skipped: Vec<u64>,
    pub comments_written: usize,
    pub snapshot_path: PathBuf,
    pub ranking_issue: u64,
    pub ranking_created: bool,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("CollectIssues: {source}")]
    CollectIssues { source: GitHubApiError },

    #[error("UpsertVoteComment #{number}: {source}")]
    UpsertVoteComment {
        number: u64,
        source: GitHubApiError,
    },

    #[error("WriteSnapshot: {source}")]
    WriteSnapshot {
        #[from]
        source: SnapshotError,
    },

    #[error("PublishRanking: {source}")]
    PublishRanking {
        #[from]
        source: RankingError,
    },
}

/// One full pass: tally every open issue, refresh its vote comment, write the
/// snapshot, then publish the ranking. The first failure aborts the pass.
pub async fn run<T>(tracker: &T, settings: &RunSettings) -> Result<RunSummary, RunError>
where
    T: IssueTracker + ?Sized,
{
    let t = settings.translations;

    let issues = collect_open_issues(tracker)
        .await
        .map_err(|source| RunError::CollectIssues { source })?;

    let mut votes = Votes::new();
    let mut skipped = Vec::new();
    let mut comments_written = 0;

    for issue in &issues {
        let Some(record) = tally_issue(issue, &settings.ignore_label) else {
            info!("{}", t.ignoring(issue.number, &settings.ignore_label));
            skipped.push(issue.number);
            continue;
        };

        let body = vote_comment_body(t, &record);
        let outcome = upsert_marker_comment(tracker, issue.number, ISSUE_VOTE_MARKER, &body, UpsertMode::SkipUnchanged)
            .await
            .map_err(|source| RunError::UpsertVoteComment {
                number: issue.number,
                source,
            })?;

        if outcome.wrote() {
            comments_written += 1;
        }
        votes.insert(issue.number, record);
    }

    let snapshot_path = write_snapshot(&settings.workspace, &votes).await?;

    let links = IssueLinks::new(&settings.server_url, tracker.owner(), tracker.repo());
    let body = ranking_body(t, &links, &top_entries(&votes));
    let (target, _) = publish_ranking(tracker, t, settings.ranking_issue_number, &body).await?;

    Ok(RunSummary {
        votes,
        skipped,
        comments_written,
        snapshot_path,
        ranking_issue: target.number,
        ranking_created: target.created,
    })
}
