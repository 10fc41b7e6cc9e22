use ai_llm_service::telemetry;
use pr_reviewer::RunOutcome;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // `.env` is optional; in CI the variables come from the workflow.
    let dotenv = dotenvy::dotenv();

    let _ = tracing_subscriber::registry()
        .with(telemetry::env_filter("info"))
        .with(telemetry::layer())
        .try_init();

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }

    match pr_reviewer::run_from_env().await {
        RunOutcome::ConfigError(_) => info!("nothing to do, exiting"),
        RunOutcome::NoDiff => info!("no changes to review"),
        RunOutcome::Completed { .. } => info!("done"),
    }
}
