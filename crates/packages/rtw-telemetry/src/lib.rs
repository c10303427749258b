use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

/// Builds the log subscriber. `RUST_LOG` wins over `default_level` when set.
pub fn build_subscriber(default_level: &str) -> Result<impl Subscriber + Send + Sync + use<>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level '{default_level}'"))?,
    };

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true)))
}

/// Installs the subscriber as the global default. Call once at startup,
/// typically with the level from `rtw_config::Settings`.
pub fn init_subscriber(service_name: &str, default_level: &str) -> Result<()> {
    let subscriber = build_subscriber(default_level)?;
    tracing::subscriber::set_global_default(subscriber)
        .context("a global tracing subscriber is already installed")?;

    info!("Logging initialised for {}", service_name);
    Ok(())
}
