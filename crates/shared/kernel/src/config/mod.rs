use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `LPAD__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "LPAD";
const ENV_SEPARATOR: &str = "__";

#[lpad_derive::lpad_error]
pub enum ConfigError {
    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layers `LPAD__*` environment variables over a TOML file and deserializes `T`.
///
/// An `explicit` path must exist. Without one, `default_name` (without extension) is
/// looked up in the working directory and silently skipped when absent, so a bare
/// binary runs on defaults.
///
/// # Errors
/// [`ConfigError::Config`] when an explicit file is missing, a file is malformed, or
/// the merged values do not fit `T`.
///
/// ```rust
/// use lpad_kernel::config::load_config;
/// use lpad_domain::config::AppConfig;
///
/// let cfg: AppConfig = load_config(None, "does-not-exist")?;
/// assert_eq!(cfg.server.port, 5001);
/// # Ok::<(), lpad_kernel::config::ConfigError>(())
/// ```
pub fn load_config<T>(explicit: Option<&Path>, default_name: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match explicit {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            File::from(path).required(true)
        },
        None => File::with_name(default_name).required(false),
    };

    Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR).try_parsing(true),
        )
        .build()
        .context("building configuration sources")?
        .try_deserialize::<T>()
        .context("deserializing configuration")
}
