//! Provider facade.
//!
//! Only GitHub is wired up; the PR is addressed through the issues API,
//! which treats pull requests as issues for commenting purposes.

pub mod types;
pub use types::*;

pub mod github;

/// Public GitHub REST API base.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

/// Runtime configuration for the provider client.
#[derive(Clone)]
pub struct ProviderConfig {
    /// API base, e.g. "https://api.github.com" or a GHES "https://host/api/v3"
    pub base_api: String,
    /// Access token for the provider (PAT or Actions token).
    pub token: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_api", &self.base_api)
            .field("token", &"<redacted>")
            .finish()
    }
}
