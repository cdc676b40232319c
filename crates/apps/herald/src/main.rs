//! Herald - a portal inbox watcher that emails notifications for new messages
//!
//! This is the long-running daemon entry point: it resolves configuration,
//! wires the portal client, watermark store and SMTP dispatcher together and
//! hands control to the poll loop.

use std::collections::HashMap;
use std::path::Path;

use log::{error, info, warn};
use notifier::{
    FileWatermarkStore, PollController, PortalClient, Settings, Shutdown, SmtpNotifier,
};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    // The first CLI argument names the deployment environment; its env file
    // seeds variables the process environment does not already define.
    let environment = std::env::args().nth(1).unwrap_or_else(|| "local".to_string());
    let env_file = format!(".env.{environment}");
    let file_vars = match config::parse_env_file(Path::new(&env_file)) {
        Ok(vars) => {
            info!("Loaded environment file {env_file}");
            vars
        }
        Err(e) => {
            warn!("No usable environment file {env_file} ({e}); using process environment only");
            HashMap::new()
        }
    };

    let settings = match Settings::from_lookup(|key| {
        std::env::var(key).ok().or_else(|| file_vars.get(key).cloned())
    }) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(settings) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(settings: Settings) -> anyhow::Result<()> {
    let portal = PortalClient::new(
        &settings.portal_base_url,
        settings.portal_username.clone(),
        settings.portal_password.clone(),
    )?;
    let store = FileWatermarkStore::new(&settings.watermark_path);
    let notifier = SmtpNotifier::new(
        settings.smtp_host.clone(),
        settings.smtp_port,
        settings.smtp_username.clone(),
        settings.smtp_password.clone(),
    );

    info!(
        "Watching {} for {}, watermark at {}",
        settings.portal_base_url,
        settings.portal_username,
        settings.watermark_path.display()
    );

    let controller = PollController::new(
        Box::new(portal),
        Box::new(store),
        Box::new(notifier),
        settings.recipient,
        settings.check_interval_minutes,
    );

    // Runs until the process is stopped externally; the watermark write is
    // atomic, so a kill at any point cannot corrupt it.
    controller.run(&Shutdown::new());
    Ok(())
}
