//! Run configuration, read once at startup.
//!
//! Five variables are required; anything else has a default. Values are read
//! through a lookup function so tests can inject them without touching the
//! process environment.

use std::path::PathBuf;

use ai_llm_service::LlmModelConfig;
use ai_llm_service::config::default_config::config_openai_review;
use ai_llm_service::error_handler::opt_var;

use crate::errors::{ConfigError, MrResult};
use crate::git_providers::{ChangeRequestId, DEFAULT_GITHUB_API, ProviderConfig};
use crate::publish::PublishConfig;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const PR_NUMBER: &str = "PR_NUMBER";
pub const BASE_REF: &str = "BASE_REF";

/// Required variables, in the order they are reported when missing.
pub const REQUIRED_VARS: [&str; 5] = [
    OPENAI_API_KEY,
    GITHUB_TOKEN,
    GITHUB_REPOSITORY,
    PR_NUMBER,
    BASE_REF,
];

pub const GITHUB_API_URL: &str = "GITHUB_API_URL";
pub const REVIEW_REPO_DIR: &str = "REVIEW_REPO_DIR";
pub const REVIEW_MAX_DIFF_CHARS: &str = "REVIEW_MAX_DIFF_CHARS";
pub const REVIEW_DRY_RUN: &str = "REVIEW_DRY_RUN";

/// Everything one review run needs.
#[derive(Debug, Clone)]
pub struct ReviewerConfig {
    /// Completion model settings (key, endpoint, model id).
    pub llm: LlmModelConfig,
    /// GitHub API base + token.
    pub provider: ProviderConfig,
    /// Target pull request.
    pub change: ChangeRequestId,
    /// Branch the diff is computed against.
    pub base_branch: String,
    /// Working copy where `git` runs.
    pub repo_dir: PathBuf,
    /// 0 disables truncation.
    pub max_diff_chars: usize,
    pub publish: PublishConfig,
}

impl ReviewerConfig {
    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVars`] listing every absent/blank required variable
    /// - [`ConfigError::InvalidRepository`] / [`ConfigError::InvalidPrNumber`]
    ///   for malformed identifiers
    /// - completion config errors for malformed optional LLM variables
    pub fn from_lookup<F>(lookup: F) -> MrResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| opt_var(&lookup, name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing).into());
        }

        let required = |name: &'static str| opt_var(&lookup, name).unwrap_or_default();

        let change = ChangeRequestId {
            project: parse_repository(&required(GITHUB_REPOSITORY))?,
            iid: parse_pr_number(&required(PR_NUMBER))?,
        };

        let base_api =
            opt_var(&lookup, GITHUB_API_URL).unwrap_or_else(|| DEFAULT_GITHUB_API.to_string());
        if !(base_api.starts_with("http://") || base_api.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl {
                var: GITHUB_API_URL,
                value: base_api,
            }
            .into());
        }

        let max_diff_chars = match opt_var(&lookup, REVIEW_MAX_DIFF_CHARS) {
            Some(v) => v.parse::<usize>().map_err(|_| ConfigError::InvalidNumber {
                var: REVIEW_MAX_DIFF_CHARS,
                value: v.clone(),
            })?,
            None => 0,
        };

        let dry_run = opt_var(&lookup, REVIEW_DRY_RUN)
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        let llm = config_openai_review(&lookup, required(OPENAI_API_KEY))?;

        Ok(Self {
            llm,
            provider: ProviderConfig {
                base_api,
                token: required(GITHUB_TOKEN),
            },
            change,
            base_branch: required(BASE_REF),
            repo_dir: opt_var(&lookup, REVIEW_REPO_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            max_diff_chars,
            publish: PublishConfig { dry_run },
        })
    }
}

fn parse_repository(raw: &str) -> MrResult<String> {
    match raw.split_once('/') {
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok(raw.to_string())
        }
        _ => Err(ConfigError::InvalidRepository(raw.to_string()).into()),
    }
}

fn parse_pr_number(raw: &str) -> MrResult<u64> {
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidPrNumber(raw.to_string()).into()),
    }
}
