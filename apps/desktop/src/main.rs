use anyhow::Context;
use livepad::domain::config::ClientConfig;
use livepad::kernel::config::load_config;
use lpad_desktop::{AppContext, DesktopApp};
use lpad_logger::{FileFormat, Logger};
use lpad_runtime::{RuntimeConfig, build_runtime_with_config};
use std::path::PathBuf;
use tracing::info;

const DEFAULT_CONFIG: &str = "livepad-desktop";

fn main() -> anyhow::Result<()> {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let cfg: ClientConfig = load_config(explicit.as_deref(), DEFAULT_CONFIG)
        .context("Critical: Configuration is malformed")?;

    let logger = Logger::builder().name(env!("CARGO_PKG_NAME")).env_filter(cfg.log.level.as_str());
    let _log = match &cfg.log.dir {
        Some(dir) => {
            let format = if cfg.log.json { FileFormat::Json } else { FileFormat::Plain };
            logger.path(dir).file_format(format).init()?
        },
        None => logger.init()?,
    };

    // The window owns the main thread; network calls go to this runtime.
    let runtime = build_runtime_with_config(&RuntimeConfig::client())?;
    let context = AppContext::new(&cfg, runtime.handle().clone())
        .context("Failed to initialize the API client")?;

    info!(api_url = %cfg.api_url, policy = ?cfg.error_policy, "Launching editor");
    DesktopApp::new().launch(context);
    Ok(())
}
