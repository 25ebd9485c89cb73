//! In-memory implementation of `IssueTracker`.
//!
//! Holds issues and comments in maps and records every write, so a run can be
//! replayed and its side effects inspected.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use interfaces_github_issues::{Comment, GitHubApiError, Issue, StatusCode};
use tokio::sync::RwLock;

use super::IssueTracker;

/// A write issued against the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateIssue { number: u64, title: String },
    CreateComment { issue: u64, comment_id: u64 },
    UpdateComment { issue: u64, comment_id: u64 },
}

#[derive(Debug, Default)]
struct State {
    issues: Vec<Issue>,
    comments: BTreeMap<u64, Vec<Comment>>,
    /// Issue numbers that answer `get_issue` with a fixed status.
    forced_status: HashMap<u64, StatusCode>,
    next_comment_id: u64,
    mutations: Vec<Mutation>,
}

pub struct InMemoryTracker {
    owner: String,
    repo: String,
    state: RwLock<State>,
}

impl InMemoryTracker {
    pub fn new(owner: &str, repo: &str, issues: Vec<Issue>) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            state: RwLock::new(State {
                issues,
                next_comment_id: 1,
                ..State::default()
            }),
        }
    }

    /// Seeds a comment as if someone had already posted it.
    pub async fn seed_comment(&self, issue: u64, body: &str) -> u64 {
        let mut state = self.state.write().await;
        let id = state.next_comment_id;
        state.next_comment_id += 1;
        state
            .comments
            .entry(issue)
            .or_default()
            .push(Comment { id, body: body.to_string() });
        id
    }

    /// Makes `get_issue(number)` fail with `status` regardless of contents.
    pub async fn force_status(&self, number: u64, status: StatusCode) {
        self.state.write().await.forced_status.insert(number, status);
    }

    pub async fn comments_on(&self, issue: u64) -> Vec<Comment> {
        self.state
            .read()
            .await
            .comments
            .get(&issue)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn mutations(&self) -> Vec<Mutation> {
        self.state.read().await.mutations.clone()
    }

    pub async fn clear_mutations(&self) {
        self.state.write().await.mutations.clear();
    }

    pub async fn issue(&self, number: u64) -> Option<Issue> {
        self.state
            .read()
            .await
            .issues
            .iter()
            .find(|issue| issue.number == number)
            .cloned()
    }
}

fn status_error(action: &'static str, status: StatusCode) -> GitHubApiError {
    GitHubApiError::Status {
        action,
        status,
        body: String::new(),
    }
}

#[async_trait]
impl IssueTracker for InMemoryTracker {
    fn owner(&self) -> &str {
        &self.owner
    }

    fn repo(&self) -> &str {
        &self.repo
    }

    async fn list_open_issues(&self) -> Result<Vec<Issue>, GitHubApiError> {
        let state = self.state.read().await;
        Ok(state
            .issues
            .iter()
            .filter(|issue| issue.state == "open")
            .cloned()
            .collect())
    }

    async fn list_issue_comments(&self, number: u64) -> Result<Vec<Comment>, GitHubApiError> {
        Ok(self.comments_on(number).await)
    }

    async fn get_issue(&self, number: u64) -> Result<Issue, GitHubApiError> {
        let state = self.state.read().await;
        if let Some(status) = state.forced_status.get(&number) {
            return Err(status_error("get issue", *status));
        }
        state
            .issues
            .iter()
            .find(|issue| issue.number == number)
            .cloned()
            .ok_or_else(|| status_error("get issue", StatusCode::NOT_FOUND))
    }

    async fn create_issue(&self, title: &str, _body: &str) -> Result<Issue, GitHubApiError> {
        let mut state = self.state.write().await;
        let number = state.issues.iter().map(|issue| issue.number).max().unwrap_or(0) + 1;
        let issue = Issue {
            number,
            title: title.to_string(),
            labels: Vec::new(),
            reactions: None,
            state: "open".to_string(),
            pull_request: None,
        };
        state.issues.push(issue.clone());
        state.mutations.push(Mutation::CreateIssue {
            number,
            title: title.to_string(),
        });
        Ok(issue)
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<Comment, GitHubApiError> {
        let mut state = self.state.write().await;
        if !state.issues.iter().any(|issue| issue.number == number) {
            return Err(status_error("create comment", StatusCode::NOT_FOUND));
        }
        let id = state.next_comment_id;
        state.next_comment_id += 1;
        let comment = Comment {
            id,
            body: body.to_string(),
        };
        state.comments.entry(number).or_default().push(comment.clone());
        state.mutations.push(Mutation::CreateComment {
            issue: number,
            comment_id: id,
        });
        Ok(comment)
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<Comment, GitHubApiError> {
        let mut state = self.state.write().await;
        let found = state.comments.iter_mut().find_map(|(issue, comments)| {
            comments
                .iter_mut()
                .find(|comment| comment.id == comment_id)
                .map(|comment| (*issue, comment))
        });

        let Some((issue, comment)) = found else {
            return Err(status_error("update comment", StatusCode::NOT_FOUND));
        };
        comment.body = body.to_string();
        let updated = comment.clone();

        state.mutations.push(Mutation::UpdateComment { issue, comment_id });
        Ok(updated)
    }
}
