//! # Logger
//!
//! Installs the global `tracing` subscriber for the Livepad binaries.
//!
//! The console layer is on by default. Pointing the builder at a directory adds a
//! non-blocking rolling file layer; the returned [`Logger`] owns its worker guard and
//! must outlive every log call that should reach the file.
//!
//! `RUST_LOG` overrides the programmatic level unless an explicit
//! [`LoggerBuilder::env_filter`] is supplied.
//!
//! ```rust,no_run
//! use lpad_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("livepad-server")
//!     .level(LevelFilter::DEBUG)
//!     .path("logs")
//!     .max_files(7)
//!     .init()?;
//! # Ok::<(), lpad_logger::LoggerError>(())
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

/// Directives appended to the default filter so transport chatter stays out of the logs.
const QUIET_DEPENDENCIES: &[&str] = &["hyper=warn", "hyper_util=warn", "reqwest=warn", "tao=warn"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// How console lines are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStyle {
    #[default]
    Compact,
    Pretty,
}

/// How file lines are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    console_style: ConsoleStyle,
    level: LevelFilter,
    env_filter: Option<String>,
    path: Option<PathBuf>,
    rotation: Rotation,
    max_files: usize,
    file_format: FileFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            console_style: ConsoleStyle::Compact,
            level: LevelFilter::INFO,
            env_filter: None,
            path: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            file_format: FileFormat::Plain,
        }
    }
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);
#[derive(Debug)]
pub struct ConsoleOnly;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for Unnamed {}
impl Sealed for Named {}
impl Sealed for ConsoleOnly {}
impl Sealed for WithFile {}

/// Type-state builder: a name is required before `init`, file options only exist once
/// a directory was set.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = Unnamed, F: Sealed = ConsoleOnly> {
    config: LoggerConfig,
    name: N,
    output: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<Unnamed, F> {
    /// Names the process; also used as the rolling file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, F> {
        LoggerBuilder { config: self.config, name: Named(name.into()), output: PhantomData }
    }
}

impl<F: Sealed> LoggerBuilder<Named, F> {
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Explicit filter directives such as `lpad_projects=debug,tower_http=info`.
    ///
    /// Replaces `RUST_LOG`; a malformed filter makes [`LoggerBuilder::init`] fail.
    #[must_use]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    #[must_use]
    pub const fn console_style(mut self, style: ConsoleStyle) -> Self {
        self.config.console_style = style;
        self
    }

    /// Adds a rolling file layer writing into `dir`.
    pub fn path(self, dir: impl Into<PathBuf>) -> LoggerBuilder<Named, WithFile> {
        let mut config = self.config;
        config.path = Some(dir.into());
        LoggerBuilder { config, name: self.name, output: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, `max_files == 0`,
    ///   a malformed filter, or when no layer is enabled.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when the log directory is unusable.
    /// * [`LoggerError::Subscriber`] when a global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let LoggerBuilder { config, name: Named(name), .. } = self;
        validate(&config, &name)?;

        let filter = env_filter(&config)?;
        let mut layers: Vec<BoxedLayer> = Vec::new();

        if config.console {
            layers.push(match config.console_style {
                ConsoleStyle::Compact => fmt::layer().compact().with_target(true).boxed(),
                ConsoleStyle::Pretty => fmt::layer().pretty().boxed(),
            });
        }

        let guard = match &config.path {
            Some(dir) => {
                let (layer, guard) = file_layer(&config, dir.clone(), &name)?;
                layers.push(layer);
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "console output is disabled and no log directory was set".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;
        tracing::debug!(logger = %name, level = %config.level, "Logger initialized");

        Ok(Logger { name, guard })
    }
}

impl LoggerBuilder<Named, WithFile> {
    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Number of rotated files kept on disk.
    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    #[must_use]
    pub const fn file_format(mut self, format: FileFormat) -> Self {
        self.config.file_format = format;
        self
    }
}

/// Handle to the installed subscriber. Dropping it flushes and stops the file worker.
#[must_use = "dropping the logger stops the background file writer"]
#[derive(Debug)]
pub struct Logger {
    name: String,
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: Unnamed, output: PhantomData }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a file layer (and its worker thread) is active.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!(logger = %self.name, "Flushing log files");
        }
    }
}

fn validate(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "logger name cannot be empty".into(),
            context: None,
        });
    }
    if config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: Some(name.to_owned().into()),
        });
    }
    Ok(())
}

fn env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());

    if let Some(directives) = &config.env_filter {
        return builder.parse(directives).map_err(|err| LoggerError::InvalidConfiguration {
            message: format!("invalid filter '{directives}': {err}").into(),
            context: None,
        });
    }

    let mut filter = builder.from_env_lossy();
    for directive in QUIET_DEPENDENCIES {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    Ok(filter)
}

fn file_layer(
    config: &LoggerConfig,
    dir: PathBuf,
    name: &str,
) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
    std::fs::create_dir_all(&dir)
        .context(format!("creating log directory {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(config.max_files)
        .build(&dir)
        .context(format!("opening rolling log in {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let layer = match config.file_format {
        FileFormat::Plain => layer.boxed(),
        FileFormat::Json => layer.json().boxed(),
    };

    Ok((layer, guard))
}
