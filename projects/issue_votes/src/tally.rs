use std::collections::BTreeMap;

use interfaces_github_issues::Issue;
use serde::{Deserialize, Serialize};

/// Vote counts for one issue, recomputed from scratch every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub title: String,
    pub upvotes: u64,
    pub downvotes: u64,
    pub total: i64,
}

impl VoteRecord {
    pub fn new(title: impl Into<String>, upvotes: u64, downvotes: u64) -> Self {
        Self {
            title: title.into(),
            upvotes,
            downvotes,
            total: upvotes as i64 - downvotes as i64,
        }
    }
}

/// Issue number → votes, iterated in ascending issue number.
pub type Votes = BTreeMap<u64, VoteRecord>;

pub fn has_ignore_label(issue: &Issue, ignore_label: &str) -> bool {
    let wanted = ignore_label.to_lowercase();
    issue
        .labels
        .iter()
        .any(|label| label.name.to_lowercase() == wanted)
}

/// `None` when the issue carries the ignore label.
pub fn tally_issue(issue: &Issue, ignore_label: &str) -> Option<VoteRecord> {
    if has_ignore_label(issue, ignore_label) {
        return None;
    }
    Some(VoteRecord::new(
        issue.title.clone(),
        issue.upvotes(),
        issue.downvotes(),
    ))
}
