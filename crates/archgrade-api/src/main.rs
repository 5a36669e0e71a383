//! Binary entrypoint for the archgrade API server.
use archgrade_api::{run, ApiConfig, AppState};
use archgrade_llm::ProviderChain;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    let profile = config.load_profile()?;
    tracing::info!(profile = %profile.name, "Scoring profile loaded");

    // Blocking HTTP clients are built and finally dropped outside the runtime
    let providers = Arc::new(ProviderChain::from_env());
    if providers.is_empty() {
        tracing::warn!("No language model configured; only structured input will be accepted");
    } else {
        tracing::info!(providers = ?providers.names(), "Language models ready");
    }

    let state = AppState::new(profile, providers.clone())?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(&config.addr, state))?;
    Ok(())
}
