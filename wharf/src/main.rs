//! Wharf - Desktop dashboard for workspace deployments.
//!
//! Displays a workspace's active-user history, its agents with their
//! forwarded ports, and the template README.

use iced::application;

use wharf::app::{ConfigSource, Wharf, load_dashboard_config};

fn main() -> anyhow::Result<()> {
    let (config, source) =
        load_dashboard_config().map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    wharf_api::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    match &source {
        ConfigSource::File(path) => {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        ConfigSource::DemoFallback(reason) => {
            tracing::info!(reason = %reason, "Starting in demo mode");
        }
    }

    tracing::info!("Starting Wharf");

    // Run the Iced application
    let boot_config = config;
    application(
        move || Wharf::boot(boot_config.clone()),
        Wharf::update,
        Wharf::view,
    )
    .title(Wharf::title)
    .subscription(Wharf::subscription)
    .theme(Wharf::theme)
    .run()
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
