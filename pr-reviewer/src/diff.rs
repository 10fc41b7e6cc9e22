//! Step 1: diff retrieval.
//!
//! Runs `git fetch origin <base>` and `git diff origin/<base>...HEAD` in the
//! checkout. Failures are logged with git's stderr and collapse to `None`.

use std::path::Path;
use std::time::Instant;

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::errors::{GitError, MrResult};

/// Appended when a diff is cut to `max_chars`.
pub const TRUNCATION_MARKER: &str = "\n... [diff truncated]\n";

/// Fetches `base_branch` and returns the diff of `HEAD` against it.
///
/// Returns `None` when the diff is empty or when either git call fails.
/// A `max_chars` of 0 keeps the diff whole.
pub async fn fetch_diff(repo_dir: &Path, base_branch: &str, max_chars: usize) -> Option<String> {
    let t0 = Instant::now();
    match try_fetch_diff(repo_dir, base_branch).await {
        Ok(Some(diff)) => {
            info!(
                base = base_branch,
                bytes = diff.len(),
                elapsed_ms = t0.elapsed().as_millis(),
                "diff computed"
            );
            Some(truncate_diff(diff, max_chars))
        }
        Ok(None) => {
            info!(base = base_branch, "no changes against base branch");
            None
        }
        Err(e) => {
            error!(base = base_branch, error = %e, "failed to compute diff");
            None
        }
    }
}

async fn try_fetch_diff(repo_dir: &Path, base_branch: &str) -> MrResult<Option<String>> {
    let base = base_branch.trim();
    if base.is_empty() || base.starts_with('-') {
        return Err(GitError::InvalidRef(base_branch.to_string()).into());
    }

    run_git(repo_dir, &["fetch", "origin", base]).await?;

    let range = format!("origin/{base}...HEAD");
    let diff = run_git(repo_dir, &["diff", &range]).await?;

    Ok((!diff.is_empty()).then_some(diff))
}

/// Runs one git command in `repo_dir`, returning stdout on success.
async fn run_git(repo_dir: &Path, args: &[&str]) -> MrResult<String> {
    let command = format!("git {}", args.join(" "));
    debug!(%command, dir = %repo_dir.display(), "running");

    let output = Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .await
        .map_err(|source| GitError::Spawn {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(GitError::Exit {
            command,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Cuts `diff` to at most `max_chars` characters plus [`TRUNCATION_MARKER`].
pub fn truncate_diff(diff: String, max_chars: usize) -> String {
    if max_chars == 0 {
        return diff;
    }
    match diff.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            warn!(
                max_chars,
                total_chars = diff.chars().count(),
                "diff exceeds limit, truncating"
            );
            let mut cut = diff[..idx].to_string();
            cut.push_str(TRUNCATION_MARKER);
            cut
        }
        None => diff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_disabled_or_short_keeps_input() {
        let d = "diff --git a/x b/x\n+1\n".to_string();
        assert_eq!(truncate_diff(d.clone(), 0), d);
        assert_eq!(truncate_diff(d.clone(), 10_000), d);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let d = "+ünïcödé line\n".repeat(4);
        let out = truncate_diff(d, 5);
        assert_eq!(out, format!("+ünïc{TRUNCATION_MARKER}"));
    }

    #[tokio::test]
    async fn option_like_branch_is_rejected_before_running_git() {
        let dir = std::env::temp_dir();
        let err = try_fetch_diff(&dir, "--upload-pack=evil").await.unwrap_err();
        assert!(err.to_string().contains("invalid branch name"));
        assert!(fetch_diff(&dir, "", 0).await.is_none());
    }
}
