//! Thin REST binding for the GitHub issues API
//!
//! - `index` holds the client and its request plumbing
//! - `models` holds the wire types it decodes

pub mod index;
pub mod models;

pub use index::{GitHubApiError, GitHubClient, GitHubClientConfig, DEFAULT_API_URL, PER_PAGE};
pub use models::{Comment, Issue, Label, Reactions};
pub use reqwest::StatusCode;
