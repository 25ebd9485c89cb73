use interfaces_github_issues::{Comment, GitHubApiError};
use tracing::debug;

use crate::i18n::Translations;
use crate::tally::VoteRecord;
use crate::tracker::IssueTracker;

/// Hidden token identifying the per-issue vote summary. Must stay byte-identical
/// across releases so earlier comments keep being found.
pub const ISSUE_VOTE_MARKER: &str = "<!-- ISSUE-VOTE-COMMENT -->";

/// Hidden token identifying the aggregate ranking comment.
pub const RANKING_MARKER: &str = "<!-- VOTE-RANKING-COMMENT -->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertMode {
    /// Leave an existing comment alone when its body already matches.
    SkipUnchanged,
    AlwaysUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(u64),
    Updated(u64),
    Unchanged(u64),
}

impl UpsertOutcome {
    pub fn comment_id(&self) -> u64 {
        match *self {
            UpsertOutcome::Created(id) | UpsertOutcome::Updated(id) | UpsertOutcome::Unchanged(id) => id,
        }
    }

    pub fn wrote(&self) -> bool {
        !matches!(self, UpsertOutcome::Unchanged(_))
    }
}

/// First comment containing `marker`, whoever wrote it.
pub fn find_marker_comment<'a>(comments: &'a [Comment], marker: &str) -> Option<&'a Comment> {
    comments.iter().find(|comment| comment.body.contains(marker))
}

pub fn vote_comment_body(t: &Translations, record: &VoteRecord) -> String {
    format!(
        "{ISSUE_VOTE_MARKER}\n{}{}",
        t.votes_title,
        t.votes_body(record.upvotes, record.downvotes, record.total)
    )
}

pub async fn upsert_marker_comment<T>(
    tracker: &T,
    issue_number: u64,
    marker: &str,
    body: &str,
    mode: UpsertMode,
) -> Result<UpsertOutcome, GitHubApiError>
where
    T: IssueTracker + ?Sized,
{
    let comments = tracker.list_issue_comments(issue_number).await?;

    match find_marker_comment(&comments, marker) {
        Some(existing) if mode == UpsertMode::SkipUnchanged && existing.body == body => {
            debug!(issue = issue_number, comment = existing.id, "comment already up to date");
            Ok(UpsertOutcome::Unchanged(existing.id))
        }
        Some(existing) => {
            tracker.update_comment(existing.id, body).await?;
            debug!(issue = issue_number, comment = existing.id, "updated comment");
            Ok(UpsertOutcome::Updated(existing.id))
        }
        None => {
            let created = tracker.create_comment(issue_number, body).await?;
            debug!(issue = issue_number, comment = created.id, "created comment");
            Ok(UpsertOutcome::Created(created.id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::memory::{InMemoryTracker, Mutation};
    use interfaces_github_issues::Issue;

    fn tracker_with_issue(number: u64) -> InMemoryTracker {
        let issue = Issue {
            number,
            title: "Dark mode".to_string(),
            labels: Vec::new(),
            reactions: None,
            state: "open".to_string(),
            pull_request: None,
        };
        InMemoryTracker::new("octo", "votes", vec![issue])
    }

    #[test]
    fn vote_body_starts_with_marker() {
        let t = Translations::for_language("en");
        let body = vote_comment_body(t, &VoteRecord::new("Dark mode", 7, 2));

        assert!(body.starts_with("<!-- ISSUE-VOTE-COMMENT -->\n### 📊 Vote summary"));
        assert!(body.contains("👍: 7"));
        assert!(body.contains("👎: 2"));
        assert!(body.contains("Total: 5"));
    }

    #[test]
    fn finds_first_comment_with_marker() {
        let comments = vec![
            Comment { id: 1, body: "first!".to_string() },
            Comment { id: 2, body: format!("quoted {ISSUE_VOTE_MARKER} elsewhere") },
            Comment { id: 3, body: format!("{ISSUE_VOTE_MARKER}\nlater") },
        ];
        assert_eq!(find_marker_comment(&comments, ISSUE_VOTE_MARKER).unwrap().id, 2);
        assert!(find_marker_comment(&comments, RANKING_MARKER).is_none());
    }

    #[tokio::test]
    async fn creates_when_missing() {
        let tracker = tracker_with_issue(5);

        let body = format!("{ISSUE_VOTE_MARKER}\nx");

        let outcome = upsert_marker_comment(&tracker, 5, ISSUE_VOTE_MARKER, &body, UpsertMode::SkipUnchanged)
            .await
            .unwrap();

        assert!(matches!(outcome, UpsertOutcome::Created(_)));
        assert_eq!(tracker.comments_on(5).await.len(), 1);
    }

    #[tokio::test]
    async fn skips_identical_body() {
        let tracker = tracker_with_issue(5);
        let body = format!("{ISSUE_VOTE_MARKER}\nsame");
        let id = tracker.seed_comment(5, &body).await;

        let outcome = upsert_marker_comment(&tracker, 5, ISSUE_VOTE_MARKER, &body, UpsertMode::SkipUnchanged)
            .await
            .unwrap();

        assert_eq!(outcome, UpsertOutcome::Unchanged(id));
        assert!(!outcome.wrote());
        assert!(tracker.mutations().await.is_empty());
    }

    #[tokio::test]
    async fn updates_changed_body_in_place() {
        let tracker = tracker_with_issue(5);
        let id = tracker.seed_comment(5, &format!("{ISSUE_VOTE_MARKER}\nold")).await;
        let body = format!("{ISSUE_VOTE_MARKER}\nnew");

        let outcome = upsert_marker_comment(&tracker, 5, ISSUE_VOTE_MARKER, &body, UpsertMode::SkipUnchanged)
            .await
            .unwrap();

        assert_eq!(outcome, UpsertOutcome::Updated(id));
        assert_eq!(tracker.comments_on(5).await[0].body, body);
        assert_eq!(
            tracker.mutations().await,
            vec![Mutation::UpdateComment { issue: 5, comment_id: id }]
        );
    }

    #[tokio::test]
    async fn always_update_rewrites_identical_body() {
        let tracker = tracker_with_issue(5);
        let body = format!("{RANKING_MARKER}\nsame");
        let id = tracker.seed_comment(5, &body).await;

        let outcome = upsert_marker_comment(&tracker, 5, RANKING_MARKER, &body, UpsertMode::AlwaysUpdate)
            .await
            .unwrap();

        assert_eq!(outcome, UpsertOutcome::Updated(id));
        assert_eq!(tracker.mutations().await.len(), 1);
    }
}
