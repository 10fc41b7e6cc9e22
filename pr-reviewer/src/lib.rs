//! Public entry for the pr-reviewer pipeline.
//!
//! A single high-level function runs the whole review for one pull request:
//!
//! 1) **Step 1 — Diff retrieval**
//!    - `git fetch origin <base>` then `git diff origin/<base>...HEAD`
//!    - any git failure is logged and treated as "no diff"
//!    - no diff → the run stops here: no completion request, no comment
//!
//! 2) **Step 2 — Review generation**
//!    - one chat completion; failures become `Error: ...` text
//!
//! 3) **Step 3 — Publishing**
//!    - one `POST .../issues/{pr}/comments` with the header + review
//!    - HTTP/transport failures are logged, never raised
//!
//! Stages run strictly in sequence. Configuration is validated first; if a
//! required variable is missing nothing else runs. No stage returns an error
//! to the caller, so the process always exits normally.

pub mod config;
pub mod diff;
pub mod errors;
pub mod git_providers;
pub mod publish;
pub mod review;

use std::time::Instant;
use tracing::{debug, error, info};

use publish::PublishOutcome;

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Configuration was incomplete or invalid; nothing else ran.
    ConfigError(String),
    /// Step 1 produced no diff (no changes, or git failed); nothing was
    /// requested or posted.
    NoDiff,
    /// All three stages ran.
    Completed {
        /// Text handed to the publisher (review or `Error:` text).
        review: String,
        publish: PublishOutcome,
    },
}

/// Load configuration from the process environment and run the review.
pub async fn run_from_env() -> RunOutcome {
    run_from_lookup(|k| std::env::var(k).ok()).await
}

/// Same as [`run_from_env`] but reads variables through `lookup`.
pub async fn run_from_lookup<F>(lookup: F) -> RunOutcome
where
    F: Fn(&str) -> Option<String>,
{
    match ReviewerConfig::from_lookup(lookup) {
        Ok(cfg) => run_review(cfg).await,
        Err(e) => {
            error!(error = %e, "configuration error, review skipped");
            RunOutcome::ConfigError(e.to_string())
        }
    }
}

/// Run steps **1–3** for a single pull request.
///
/// # Logging
/// Emits `DEBUG` timing per step and an `INFO` summary at the end.
pub async fn run_review(cfg: ReviewerConfig) -> RunOutcome {
    let t0 = Instant::now();
    info!(
        pr = %cfg.change,
        base = %cfg.base_branch,
        dry_run = cfg.publish.dry_run,
        "starting review"
    );

    // ---------------------------
    // Step 1: diff
    // ---------------------------
    let t1 = Instant::now();
    debug!("step1: fetch base and compute diff");
    let diff = diff::fetch_diff(&cfg.repo_dir, &cfg.base_branch, cfg.max_diff_chars).await;
    debug!(
        "step1: done, diff_found={} ({} ms)",
        diff.is_some(),
        t1.elapsed().as_millis()
    );

    let Some(diff) = diff else {
        info!(
            pr = %cfg.change,
            elapsed_ms = t0.elapsed().as_millis(),
            "no diff, review finished without a comment"
        );
        return RunOutcome::NoDiff;
    };

    // ---------------------------
    // Step 2: review
    // ---------------------------
    let t2 = Instant::now();
    debug!("step2: generate review");
    let review = review::generate_review(&cfg.llm, Some(diff.as_str())).await;
    debug!(
        "step2: done, review_len={} ({} ms)",
        review.len(),
        t2.elapsed().as_millis()
    );

    // ---------------------------
    // Step 3: publish
    // ---------------------------
    let t3 = Instant::now();
    debug!("step3: publish comment");
    let publish = publish::publish_review(&cfg.provider, &cfg.change, &review, &cfg.publish).await;
    debug!("step3: done ({} ms)", t3.elapsed().as_millis());

    info!(
        pr = %cfg.change,
        outcome = ?publish,
        elapsed_ms = t0.elapsed().as_millis(),
        "review finished"
    );

    RunOutcome::Completed { review, publish }
}

// -----------------------------------------------------------------------------
// Convenience re-exports for downstream users
// -----------------------------------------------------------------------------

pub use config::ReviewerConfig;
pub use publish::{COMMENT_HEADER, PublishConfig};
pub use review::NO_CHANGES_MESSAGE;
