//! Step 3: Publisher.
//!
//! Posts the review as a single top-level PR comment.
//!
//! - Body is [`COMMENT_HEADER`], a blank line, then the review verbatim.
//! - Dry-run: log what would be posted without calling the API.
//! - Never returns an error: HTTP and transport failures are logged and
//!   reported through [`PublishOutcome`].

use std::time::Instant;

use tracing::{error, info};

use crate::errors::{Error, ProviderError};
use crate::git_providers::github::GitHubClient;
use crate::git_providers::{ChangeRequestId, ProviderConfig};

/// Fixed markdown header prepended to every comment.
pub const COMMENT_HEADER: &str = "### 🤖 AI Code Review";

/// Configuration for publishing step.
#[derive(Debug, Clone, Default)]
pub struct PublishConfig {
    /// If true, do not actually send anything; just log what would be posted.
    pub dry_run: bool,
}

/// What happened to the comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Comment created.
    Posted {
        comment_id: u64,
        url: Option<String>,
    },
    /// Dry-run: nothing was sent.
    DryRun,
    /// The API answered with a non-success status.
    Rejected { status: u16, body: String },
    /// The request could not be made or completed.
    Failed(String),
}

/// Renders the full comment body for `review`.
pub fn render_comment(review: &str) -> String {
    format!("{COMMENT_HEADER}\n\n{review}")
}

/// Publish `review` on the pull request `id`.
pub async fn publish_review(
    provider_cfg: &ProviderConfig,
    id: &ChangeRequestId,
    review: &str,
    cfg: &PublishConfig,
) -> PublishOutcome {
    let t0 = Instant::now();
    let body = render_comment(review);

    if cfg.dry_run {
        info!(pr = %id, body_len = body.len(), "dry-run: comment not posted");
        info!("dry-run comment body:\n{body}");
        return PublishOutcome::DryRun;
    }

    let result = match GitHubClient::from_config(provider_cfg) {
        Ok(client) => client.create_issue_comment(id, &body).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(comment) => {
            info!(
                pr = %id,
                comment_id = comment.id,
                url = comment.html_url.as_deref().unwrap_or("-"),
                elapsed_ms = t0.elapsed().as_millis(),
                "review comment posted"
            );
            PublishOutcome::Posted {
                comment_id: comment.id,
                url: comment.html_url,
            }
        }
        Err(Error::Provider(ProviderError::Status { status, body })) => {
            error!(pr = %id, status, response = %body, "failed to post review comment");
            PublishOutcome::Rejected { status, body }
        }
        Err(e) => {
            error!(pr = %id, error = %e, "error while posting review comment");
            PublishOutcome::Failed(e.to_string())
        }
    }
}
