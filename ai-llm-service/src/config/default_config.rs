//! Default completion config assembled from environment-style variables.
//!
//! The API key itself is resolved by the caller (it is one of the reviewer's
//! required variables); everything here is optional with a fixed default.
//!
//! # Variables
//!
//! - `OPENAI_BASE_URL`  = API base URL (default `https://api.openai.com`)
//! - `OPENAI_MODEL`     = model identifier (default `gpt-4o-mini`)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TEMPERATURE`  = optional sampling temperature (0.0..=2.0)
//! - `LLM_TIMEOUT_SECS` = request timeout in seconds (default 120)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        Result, opt_f32, opt_u32, opt_u64, opt_var, validate_http_endpoint, validate_range_f32,
    },
};

/// Public OpenAI API base.
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";

/// Model used for reviews unless `OPENAI_MODEL` overrides it.
pub const DEFAULT_REVIEW_MODEL: &str = "gpt-4o-mini";

/// Review requests can be slow for large diffs.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Constructs the config for the **review** model.
///
/// # Defaults
/// - `endpoint = DEFAULT_OPENAI_ENDPOINT`
/// - `model = DEFAULT_REVIEW_MODEL`
/// - `temperature = None` (provider default)
/// - `timeout_secs = Some(120)`
///
/// # Errors
/// - [`ConfigError::InvalidFormat`](crate::error_handler::ConfigError::InvalidFormat)
///   if `OPENAI_BASE_URL` is not an http(s) URL
/// - [`ConfigError::InvalidNumber`](crate::error_handler::ConfigError::InvalidNumber)
///   for malformed numeric variables
/// - [`ConfigError::OutOfRange`](crate::error_handler::ConfigError::OutOfRange)
///   if `LLM_TEMPERATURE` is outside `0.0..=2.0`
pub fn config_openai_review<F>(lookup: F, api_key: String) -> Result<LlmModelConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let endpoint =
        opt_var(&lookup, "OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_ENDPOINT.to_string());
    validate_http_endpoint("OPENAI_BASE_URL", &endpoint)?;

    let model = opt_var(&lookup, "OPENAI_MODEL").unwrap_or_else(|| DEFAULT_REVIEW_MODEL.to_string());
    let max_tokens = opt_u32(&lookup, "LLM_MAX_TOKENS")?;

    let temperature = opt_f32(&lookup, "LLM_TEMPERATURE")?;
    if let Some(t) = temperature {
        validate_range_f32("temperature", t, 0.0, 2.0)?;
    }

    let timeout_secs = opt_u64(&lookup, "LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature,
        top_p: None,
        timeout_secs: Some(timeout_secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::{AiLlmError, ConfigError};

    fn none(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = config_openai_review(none, "sk-test".into()).unwrap();
        assert_eq!(cfg.endpoint, DEFAULT_OPENAI_ENDPOINT);
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.max_tokens, None);
        assert_eq!(cfg.temperature, None);
        assert_eq!(cfg.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn overrides_are_honoured() {
        let lookup = |k: &str| match k {
            "OPENAI_BASE_URL" => Some("http://127.0.0.1:8080".to_string()),
            "OPENAI_MODEL" => Some("gpt-4o".to_string()),
            "LLM_MAX_TOKENS" => Some("1024".to_string()),
            "LLM_TEMPERATURE" => Some("0.3".to_string()),
            "LLM_TIMEOUT_SECS" => Some("15".to_string()),
            _ => None,
        };
        let cfg = config_openai_review(lookup, "sk".into()).unwrap();
        assert_eq!(cfg.endpoint, "http://127.0.0.1:8080");
        assert_eq!(cfg.model, "gpt-4o");
        assert_eq!(cfg.max_tokens, Some(1024));
        assert_eq!(cfg.temperature, Some(0.3));
        assert_eq!(cfg.timeout_secs, Some(15));
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let bad_url = |k: &str| (k == "OPENAI_BASE_URL").then(|| "ftp://x".to_string());
        assert!(matches!(
            config_openai_review(bad_url, "sk".into()),
            Err(AiLlmError::Config(ConfigError::InvalidFormat { .. }))
        ));

        let hot = |k: &str| (k == "LLM_TEMPERATURE").then(|| "3.5".to_string());
        assert!(matches!(
            config_openai_review(hot, "sk".into()),
            Err(AiLlmError::Config(ConfigError::OutOfRange { .. }))
        ));
    }
}
