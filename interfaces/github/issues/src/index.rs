use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::models::{Comment, CommentPayload, Issue, NewIssuePayload};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub's maximum page size; a shorter page marks the end of a listing.
pub const PER_PAGE: usize = 100;

const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub api_url: String,
}

/// Client bound to a single `owner/repo`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    owner: String,
    repo: String,
}

#[derive(Debug, Error)]
pub enum GitHubApiError {
    #[error("InvalidToken: {source}")]
    InvalidToken {
        #[from]
        source: InvalidHeaderValue,
    },

    #[error("ClientBuild: {source}")]
    ClientBuild { source: reqwest::Error },

    #[error("RequestSend ({action}): {source}")]
    RequestSend {
        action: &'static str,
        source: reqwest::Error,
    },

    #[error("ResponseRead ({action}): {source}")]
    ResponseRead {
        action: &'static str,
        source: reqwest::Error,
    },

    #[error("Decode ({action}): {source}")]
    Decode {
        action: &'static str,
        source: serde_json::Error,
    },

    #[error("{action} failed with {status}: {body}")]
    Status {
        action: &'static str,
        status: StatusCode,
        body: String,
    },
}

impl GitHubApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GitHubApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for "not found" and "gone", the two statuses a deleted or
    /// transferred issue answers with.
    pub fn is_absent(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::NOT_FOUND) | Some(StatusCode::GONE)
        )
    }
}

impl GitHubClient {
    pub fn new(config: GitHubClientConfig) -> Result<Self, GitHubApiError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        headers.insert(USER_AGENT, HeaderValue::from_static("issue-votes"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|source| GitHubApiError::ClientBuild { source })?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            owner: config.owner,
            repo: config.repo,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    fn repo_url(&self, tail: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, self.owner, self.repo, tail)
    }

    /// Every open issue in the repository, pull requests included, in API order.
    pub async fn list_open_issues(&self) -> Result<Vec<Issue>, GitHubApiError> {
        let url = self.repo_url("issues");
        self.get_all_pages("list issues", |page| {
            self.client
                .get(&url)
                .query(&[("state", "open")])
                .query(&[("per_page", PER_PAGE), ("page", page)])
        })
        .await
    }

    pub async fn list_issue_comments(&self, number: u64) -> Result<Vec<Comment>, GitHubApiError> {
        let url = self.repo_url(&format!("issues/{number}/comments"));
        self.get_all_pages("list comments", |page| {
            self.client
                .get(&url)
                .query(&[("per_page", PER_PAGE), ("page", page)])
        })
        .await
    }

    pub async fn get_issue(&self, number: u64) -> Result<Issue, GitHubApiError> {
        let request = self.client.get(self.repo_url(&format!("issues/{number}")));
        self.send_json("get issue", request).await
    }

    pub async fn create_issue(&self, title: &str, body: &str) -> Result<Issue, GitHubApiError> {
        let request = self
            .client
            .post(self.repo_url("issues"))
            .json(&NewIssuePayload { title, body });
        self.send_json("create issue", request).await
    }

    pub async fn create_comment(&self, number: u64, body: &str) -> Result<Comment, GitHubApiError> {
        let request = self
            .client
            .post(self.repo_url(&format!("issues/{number}/comments")))
            .json(&CommentPayload { body });
        self.send_json("create comment", request).await
    }

    pub async fn update_comment(&self, comment_id: u64, body: &str) -> Result<Comment, GitHubApiError> {
        let request = self
            .client
            .patch(self.repo_url(&format!("issues/comments/{comment_id}")))
            .json(&CommentPayload { body });
        self.send_json("update comment", request).await
    }

    async fn get_all_pages<T, F>(&self, action: &'static str, page_request: F) -> Result<Vec<T>, GitHubApiError>
    where
        T: DeserializeOwned,
        F: Fn(usize) -> RequestBuilder,
    {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let batch: Vec<T> = self.send_json(action, page_request(page)).await?;
            let count = batch.len();
            items.extend(batch);

            debug!(action, page, count, "fetched page");

            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        action: &'static str,
        request: RequestBuilder,
    ) -> Result<T, GitHubApiError> {
        let response = request
            .send()
            .await
            .map_err(|source| GitHubApiError::RequestSend { action, source })?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|source| GitHubApiError::ResponseRead { action, source })?;

        if !status.is_success() {
            return Err(GitHubApiError::Status { action, status, body });
        }

        serde_json::from_str(&body).map_err(|source| GitHubApiError::Decode { action, source })
    }
}
