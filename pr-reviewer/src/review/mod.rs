//! Step 2: review generation.
//!
//! One chat completion per run. An absent or empty diff short-circuits to a
//! fixed placeholder, and any failure becomes an `Error: Unable to get AI
//! review. ...` string that is published in place of the review.
//!
//! Logs:
//! - `INFO`: request start/finish with timing
//! - `ERROR`: the underlying completion error

pub mod prompt;

use std::time::Instant;

use ai_llm_service::{LlmModelConfig, OpenAiService};
use tracing::{error, info};

use crate::errors::MrResult;
use prompt::{SYSTEM_PROMPT, build_review_prompt};

/// Review text used when there is nothing to review.
pub const NO_CHANGES_MESSAGE: &str = "No code changes detected.";

/// Produces review text for `diff`. Never fails.
pub async fn generate_review(llm_cfg: &LlmModelConfig, diff: Option<&str>) -> String {
    let Some(diff) = diff.filter(|d| !d.is_empty()) else {
        info!("no diff to review, skipping completion request");
        return NO_CHANGES_MESSAGE.to_string();
    };

    let t0 = Instant::now();
    info!(model = %llm_cfg.model, diff_len = diff.len(), "requesting review");

    match request_review(llm_cfg, diff).await {
        Ok(text) => {
            info!(
                review_len = text.len(),
                elapsed_ms = t0.elapsed().as_millis(),
                "review generated"
            );
            text
        }
        Err(e) => {
            error!(error = %e, elapsed_ms = t0.elapsed().as_millis(), "review generation failed");
            format!("Error: Unable to get AI review. {e}")
        }
    }
}

async fn request_review(llm_cfg: &LlmModelConfig, diff: &str) -> MrResult<String> {
    let service = OpenAiService::new(llm_cfg.clone())?;
    let user = build_review_prompt(diff);
    Ok(service.generate(&user, Some(SYSTEM_PROMPT)).await?)
}
