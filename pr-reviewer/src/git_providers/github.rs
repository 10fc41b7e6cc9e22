//! GitHub provider.
//!
//! Endpoints:
//! - POST /repos/{owner}/{repo}/issues/{number}/comments

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::debug;

use crate::errors::{MrResult, ProviderError};
use crate::git_providers::{ChangeRequestId, IssueComment, ProviderConfig};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = "pr-ai-review/0.1";

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String, // "https://api.github.com"
}

impl GitHubClient {
    /// Builds a client with bearer auth and the GitHub JSON accept header.
    pub fn from_config(cfg: &ProviderConfig) -> MrResult<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", cfg.token))
            .map_err(|e| ProviderError::InvalidRequest(format!("invalid token header: {e}")))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_api: cfg.base_api.trim_end_matches('/').to_string(),
        })
    }

    pub fn issue_comments_url(&self, id: &ChangeRequestId) -> String {
        format!(
            "{}/repos/{}/issues/{}/comments",
            self.base_api, id.project, id.iid
        )
    }

    /// Creates a top-level comment on the pull request.
    ///
    /// Non-2xx answers come back as [`ProviderError::Status`] with the response
    /// body attached.
    pub async fn create_issue_comment(
        &self,
        id: &ChangeRequestId,
        body: &str,
    ) -> MrResult<IssueComment> {
        #[derive(Serialize)]
        struct Req<'a> {
            body: &'a str,
        }

        let url = self.issue_comments_url(id);
        debug!(%url, body_len = body.len(), "github: POST issue comment");

        let resp = self.http.post(&url).json(&Req { body }).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(resp.json().await.unwrap_or_default())
    }
}
