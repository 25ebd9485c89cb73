use interfaces_github_issues::{GitHubApiError, Issue};
use tracing::debug;

use crate::tracker::IssueTracker;

/// Open issues in API order, with pull requests removed.
pub async fn collect_open_issues<T>(tracker: &T) -> Result<Vec<Issue>, GitHubApiError>
where
    T: IssueTracker + ?Sized,
{
    let fetched = tracker.list_open_issues().await?;
    let fetched_count = fetched.len();

    let issues: Vec<Issue> = fetched
        .into_iter()
        .filter(|issue| !issue.is_pull_request())
        .collect();

    debug!(
        fetched = fetched_count,
        pull_requests = fetched_count - issues.len(),
        "collected open issues"
    );

    Ok(issues)
}
