//! Seam between the vote workflow and the remote issue tracker.
//!
//! [`GitHubClient`] is the production implementation; [`memory::InMemoryTracker`]
//! backs the tests.

pub mod memory;

use async_trait::async_trait;
use interfaces_github_issues::{Comment, GitHubApiError, GitHubClient, Issue};

/// The remote operations the vote workflow needs from an issue tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    fn owner(&self) -> &str;

    fn repo(&self) -> &str;

    async fn list_open_issues(&self) -> Result<Vec<Issue>, GitHubApiError>;

    async fn list_issue_comments(&self, number: u64) -> Result<Vec<Comment>, GitHubApiError>;

    async fn get_issue(&self, number: u64) -> Result<Issue, GitHubApiError>;

    async fn create_issue(&self, title: &str, body: &str) -> Result<Issue, GitHubApiError>;

    async fn create_comment(&self, number: u64, body: &str) -> Result<Comment, GitHubApiError>;

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<Comment, GitHubApiError>;
}

#[async_trait]
impl IssueTracker for GitHubClient {
    fn owner(&self) -> &str {
        GitHubClient::owner(self)
    }

    fn repo(&self) -> &str {
        GitHubClient::repo(self)
    }

    async fn list_open_issues(&self) -> Result<Vec<Issue>, GitHubApiError> {
        GitHubClient::list_open_issues(self).await
    }

    async fn list_issue_comments(&self, number: u64) -> Result<Vec<Comment>, GitHubApiError> {
        GitHubClient::list_issue_comments(self, number).await
    }

    async fn get_issue(&self, number: u64) -> Result<Issue, GitHubApiError> {
        GitHubClient::get_issue(self, number).await
    }

    async fn create_issue(&self, title: &str, body: &str) -> Result<Issue, GitHubApiError> {
        GitHubClient::create_issue(self, title, body).await
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<Comment, GitHubApiError> {
        GitHubClient::create_comment(self, number, body).await
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<Comment, GitHubApiError> {
        GitHubClient::update_comment(self, comment_id, body).await
    }
}
