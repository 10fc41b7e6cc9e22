//! OpenAI-compatible chat completion client used by the PR reviewer.
//!
//! - [`config`]: model configuration and env-driven defaults
//! - [`services`]: HTTP clients (currently OpenAI chat completions)
//! - [`error_handler`]: unified error type and config helpers
//! - [`telemetry`]: `tracing-subscriber` setup shared by the binary

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, Result};
pub use services::open_ai_service::OpenAiService;
