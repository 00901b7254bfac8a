use anyhow::Context;
use livepad::domain::config::AppConfig;
use livepad::kernel::config::load_config;
use lpad_logger::{FileFormat, Logger};
use lpad_server::Server;
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = "livepad";

#[lpad_runtime::main(server)]
async fn main() -> anyhow::Result<()> {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let cfg: AppConfig = load_config(explicit.as_deref(), DEFAULT_CONFIG)
        .context("Critical: Configuration is malformed")?;

    let logger = Logger::builder().name(env!("CARGO_PKG_NAME")).env_filter(cfg.log.level.as_str());
    let _log = match &cfg.log.dir {
        Some(dir) => {
            let format = if cfg.log.json { FileFormat::Json } else { FileFormat::Plain };
            logger.path(dir).file_format(format).init()?
        },
        None => logger.init()?,
    };

    Server::builder().config(cfg).build().await?.run().await
}
