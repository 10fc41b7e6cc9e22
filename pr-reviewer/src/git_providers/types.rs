//! Provider-agnostic identifiers for change requests (PRs).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique reference to a pull request inside a provider.
///
/// * `project` – GitHub `"owner/repo"`.
/// * `iid`     – pull request number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequestId {
    pub project: String,
    pub iid: u64,
}

impl fmt::Display for ChangeRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.project, self.iid)
    }
}

/// Comment as returned by `POST /repos/{owner}/{repo}/issues/{number}/comments`.
///
/// Only the fields we log are kept; everything is optional so a successful
/// POST never fails on an unexpected payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueComment {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}
