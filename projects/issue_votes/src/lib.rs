//! Issue vote tally for GitHub repositories
//!
//! - Counts 👍/👎 reactions on every open issue and keeps one summary comment per issue
//! - Writes the tally to `.votes/votes.json`
//! - Maintains a top-10 ranking comment on a dedicated issue
//! - Reads its inputs the way a GitHub Action receives them (`INPUT_*`, `GITHUB_*`)

pub mod actions;
pub mod collector;
pub mod comments;
pub mod config;
pub mod i18n;
pub mod ranking;
pub mod run;
pub mod snapshot;
pub mod tally;
pub mod tracker;
