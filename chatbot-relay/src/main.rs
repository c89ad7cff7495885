use chatbot_relay::config::RelayConfig;
use chatbot_relay::services::init_metrics;
use chatbot_relay::startup::Application;
use dotenvy::dotenv;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT")
        .ok()
        .filter(|endpoint| !endpoint.is_empty());
    init_tracing("chatbot-relay", "info", otlp_endpoint.as_deref())?;

    // Returning the error exits with status 1 before any port is bound.
    let configuration = RelayConfig::load().map_err(|e| {
        tracing::error!(
            error = %e,
            "Failed to load configuration. Please check your .env file."
        );
        anyhow::anyhow!("{}", e)
    })?;

    init_metrics()?;

    let application = Application::build(configuration).await?;
    application.run_until_stopped().await
}
