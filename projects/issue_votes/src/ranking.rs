use interfaces_github_issues::GitHubApiError;
use thiserror::Error;
use tracing::{info, warn};

use crate::comments::{upsert_marker_comment, UpsertMode, UpsertOutcome, RANKING_MARKER};
use crate::i18n::Translations;
use crate::tally::{VoteRecord, Votes};
use crate::tracker::IssueTracker;

pub const RANKING_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("GetRankingIssue #{number}: {source}")]
    GetRankingIssue {
        number: u64,
        source: GitHubApiError,
    },

    #[error("CreateRankingIssue: {source}")]
    CreateRankingIssue { source: GitHubApiError },

    #[error("UpsertRankingComment #{number}: {source}")]
    UpsertRankingComment {
        number: u64,
        source: GitHubApiError,
    },
}

/// Builds links to issues on the web UI.
#[derive(Debug, Clone)]
pub struct IssueLinks {
    base: String,
}

impl IssueLinks {
    pub fn new(server_url: &str, owner: &str, repo: &str) -> Self {
        Self {
            base: format!("{}/{owner}/{repo}/issues", server_url.trim_end_matches('/')),
        }
    }

    pub fn issue_url(&self, number: u64) -> String {
        format!("{}/{number}", self.base)
    }
}

/// The issue hosting the ranking comment for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingTarget {
    pub number: u64,
    pub created: bool,
}

/// Highest totals first, at most [`RANKING_LIMIT`] entries. Ties keep
/// ascending issue-number order.
pub fn top_entries(votes: &Votes) -> Vec<(u64, &VoteRecord)> {
    let mut entries: Vec<(u64, &VoteRecord)> = votes.iter().map(|(number, record)| (*number, record)).collect();
    entries.sort_by(|a, b| b.1.total.cmp(&a.1.total));
    entries.truncate(RANKING_LIMIT);
    entries
}

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

pub fn ranking_body(t: &Translations, links: &IssueLinks, entries: &[(u64, &VoteRecord)]) -> String {
    let mut body = format!("{RANKING_MARKER}\n{}{}", t.ranking_title, t.ranking_header);

    for (number, record) in entries {
        body.push_str(&format!(
            "| [#{number}]({}) | {} | {} | {} | {} |\n",
            links.issue_url(*number),
            table_cell(&record.title),
            record.upvotes,
            record.downvotes,
            record.total,
        ));
    }

    body
}

/// Fetches the configured ranking issue, creating a fresh one when the
/// configured number is gone. Any other failure aborts.
pub async fn resolve_ranking_issue<T>(
    tracker: &T,
    t: &Translations,
    configured: u64,
) -> Result<RankingTarget, RankingError>
where
    T: IssueTracker + ?Sized,
{
    match tracker.get_issue(configured).await {
        Ok(issue) => Ok(RankingTarget {
            number: issue.number,
            created: false,
        }),
        Err(err) if err.is_absent() => {
            warn!(issue = configured, "ranking issue not found, creating a new one");
            let issue = tracker
                .create_issue(t.new_ranking_title, t.new_ranking_body)
                .await
                .map_err(|source| RankingError::CreateRankingIssue { source })?;
            info!("{}", t.success_create(issue.number));
            Ok(RankingTarget {
                number: issue.number,
                created: true,
            })
        }
        Err(source) => Err(RankingError::GetRankingIssue {
            number: configured,
            source,
        }),
    }
}

pub async fn publish_ranking<T>(
    tracker: &T,
    t: &Translations,
    configured: u64,
    body: &str,
) -> Result<(RankingTarget, UpsertOutcome), RankingError>
where
    T: IssueTracker + ?Sized,
{
    let target = resolve_ranking_issue(tracker, t, configured).await?;

    let outcome = upsert_marker_comment(tracker, target.number, RANKING_MARKER, body, UpsertMode::AlwaysUpdate)
        .await
        .map_err(|source| RankingError::UpsertRankingComment {
            number: target.number,
            source,
        })?;

    if !target.created {
        info!("{}", t.success_update);
    }

    Ok((target, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::memory::{InMemoryTracker, Mutation};
    use interfaces_github_issues::{Issue, StatusCode};

    fn votes(entries: &[(u64, u64, u64)]) -> Votes {
        entries
            .iter()
            .map(|&(number, up, down)| (number, VoteRecord::new(format!("Issue {number}"), up, down)))
            .collect()
    }

    fn open_issue(number: u64) -> Issue {
        Issue {
            number,
            title: "Ranking".to_string(),
            labels: Vec::new(),
            reactions: None,
            state: "open".to_string(),
            pull_request: None,
        }
    }

    #[test]
    fn keeps_ten_highest_totals() {
        let votes = votes(&(1..=15u64).map(|n| (n, n, 0)).collect::<Vec<_>>());
        let top = top_entries(&votes);

        assert_eq!(top.len(), RANKING_LIMIT);
        assert_eq!(top.first().unwrap().0, 15);
        assert_eq!(top.last().unwrap().0, 6);
        assert!(top.windows(2).all(|pair| pair[0].1.total >= pair[1].1.total));
    }

    #[test]
    fn ties_keep_issue_number_order() {
        let votes = votes(&[(9, 2, 0), (3, 2, 0), (4, 5, 0), (1, 2, 0)]);
        let order: Vec<u64> = top_entries(&votes).into_iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec![4, 1, 3, 9]);
    }

    #[test]
    fn renders_table_rows_with_links() {
        let t = Translations::for_language("en");
        let links = IssueLinks::new("https://github.com/", "octo", "votes");
        let votes = votes(&[(5, 7, 2)]);

        let body = ranking_body(t, &links, &top_entries(&votes));

        assert_eq!(
            body,
            "<!-- VOTE-RANKING-COMMENT -->\n### 📊 Current issue ranking by votes\n\n\
             | # | Issue | 👍 | 👎 | Total |\n|---|-------|----|----|-----|\n\
             | [#5](https://github.com/octo/votes/issues/5) | Issue 5 | 7 | 2 | 5 |\n"
        );
    }

    #[test]
    fn escapes_pipes_in_titles() {
        assert_eq!(table_cell("a | b\nc"), "a \\| b c");
    }

    #[tokio::test]
    async fn existing_issue_is_reused() {
        let tracker = InMemoryTracker::new("octo", "votes", vec![open_issue(42)]);
        let t = Translations::for_language("en");

        let target = resolve_ranking_issue(&tracker, t, 42).await.unwrap();

        assert_eq!(target, RankingTarget { number: 42, created: false });
        assert!(tracker.mutations().await.is_empty());
    }

    #[tokio::test]
    async fn gone_issue_is_recreated() {
        let tracker = InMemoryTracker::new("octo", "votes", vec![open_issue(42)]);
        tracker.force_status(42, StatusCode::GONE).await;
        let t = Translations::for_language("es");

        let target = resolve_ranking_issue(&tracker, t, 42).await.unwrap();

        assert!(target.created);
        assert_eq!(target.number, 43);
        assert_eq!(
            tracker.mutations().await,
            vec![Mutation::CreateIssue {
                number: 43,
                title: "📊 Ranking de votos por issue".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn other_failures_abort() {
        let tracker = InMemoryTracker::new("octo", "votes", vec![open_issue(42)]);
        tracker.force_status(42, StatusCode::INTERNAL_SERVER_ERROR).await;
        let t = Translations::for_language("en");

        let err = resolve_ranking_issue(&tracker, t, 42).await.unwrap_err();

        assert!(matches!(err, RankingError::GetRankingIssue { number: 42, .. }));
        assert!(tracker.mutations().await.is_empty());
    }

    #[tokio::test]
    async fn publish_posts_then_updates() {
        let tracker = InMemoryTracker::new("octo", "votes", vec![open_issue(42)]);
        let t = Translations::for_language("en");
        let body = format!("{RANKING_MARKER}\nbody");

        let (_, first) = publish_ranking(&tracker, t, 42, &body).await.unwrap();
        let (_, second) = publish_ranking(&tracker, t, 42, &body).await.unwrap();

        assert!(matches!(first, UpsertOutcome::Created(_)));
        assert_eq!(second, UpsertOutcome::Updated(first.comment_id()));
        assert_eq!(tracker.comments_on(42).await.len(), 1);
    }
}
