//! Crate-wide error hierarchy for pr-reviewer.
//!
//! Errors travel with `?` inside a stage. Each stage entry point (`diff`,
//! `review`, `publish`) catches them, logs, and turns them into that stage's
//! fallback value, so nothing reaches `main`.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type MrResult<T> = Result<T, Error>;

/// Root error type for the pr-reviewer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API related failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Local `git` invocation failure.
    #[error(transparent)]
    Git(#[from] GitError),

    /// Configuration problems (missing variables, malformed values).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Completion service failure.
    #[error(transparent)]
    Llm(#[from] AiLlmError),
}

/// Detailed provider-specific error used inside the provider layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Non-success HTTP status with the body returned by the API.
    #[error("http status {status}: {body}")]
    Status { status: u16, body: String },

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Invalid request setup (bad header value, client build failure).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// `git` subprocess errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// The binary could not be started at all.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited non-zero.
    #[error("`{command}` exited with {status}: {stderr}")]
    Exit {
        command: String,
        status: String,
        stderr: String,
    },

    /// Branch name that would be parsed as an option or is empty.
    #[error("invalid branch name: {0:?}")]
    InvalidRef(String),
}

/// Configuration and setup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),

    #[error("invalid pull request number: {0:?}")]
    InvalidPrNumber(String),

    #[error("invalid repository {0:?}, expected `owner/repo`")]
    InvalidRepository(String),

    #[error("invalid api url in {var}: {value:?}")]
    InvalidApiUrl { var: &'static str, value: String },

    #[error("invalid number in {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

// ===== Conversions for `?` ergonomics =====

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Provider(ProviderError::from(e))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }
        if e.is_builder() {
            return ProviderError::InvalidRequest(e.to_string());
        }
        if let Some(status) = e.status() {
            return ProviderError::Status {
                status: status.as_u16(),
                body: String::new(),
            };
        }
        ProviderError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_vars_are_listed_in_order() {
        let e = ConfigError::MissingVars(vec!["GITHUB_TOKEN", "PR_NUMBER"]);
        assert_eq!(
            e.to_string(),
            "missing required environment variables: GITHUB_TOKEN, PR_NUMBER"
        );
    }

    #[test]
    fn git_exit_error_carries_stderr() {
        let e = Error::from(GitError::Exit {
            command: "git fetch origin main".into(),
            status: "exit status: 128".into(),
            stderr: "fatal: couldn't find remote ref main".into(),
        });
        let msg = e.to_string();
        assert!(msg.contains("git fetch origin main"));
        assert!(msg.contains("couldn't find remote ref"));
    }
}
