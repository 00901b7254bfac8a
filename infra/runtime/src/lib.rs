//! # Runtime
//!
//! Tokio runtime presets shared by the Livepad binaries.
//!
//! * [`RuntimeConfig::server`] sizes the scheduler for the API server.
//! * [`RuntimeConfig::client`] keeps the footprint small for interactive tools.
//!
//! The [`main`] attribute wires a preset into an `async fn main`:
//!
//! ```rust,ignore
//! #[lpad_runtime::main(server)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use lpad_derive::main;

use anyhow::Context;
use std::num::NonZero;
use std::thread::available_parallelism;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Used when the available parallelism cannot be detected.
const FALLBACK_WORKER_THREADS: usize = 4;
const MAX_WORKER_THREADS: usize = 512;
const MIN_STACK_SIZE: usize = 1024 * 1024;
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
const DEFAULT_THREAD_NAME: &str = "lpad-worker";
/// Environment override for the worker count, honoured by every preset.
pub const WORKER_THREADS_ENV: &str = "LPAD_WORKER_THREADS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: detected_worker_threads(),
            stack_size: 2 * MIN_STACK_SIZE,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            thread_keep_alive: Duration::from_secs(60),
        }
    }
}

impl RuntimeConfig {
    /// All cores, roomy stacks and long-lived idle threads for request handling.
    #[must_use]
    pub fn server() -> Self {
        Self {
            worker_threads: detected_worker_threads(),
            stack_size: 4 * MIN_STACK_SIZE,
            thread_name: "lpad-server".to_owned(),
            thread_keep_alive: Duration::from_secs(300),
        }
    }

    /// At most two workers; the client only waits on a handful of HTTP calls.
    #[must_use]
    pub fn client() -> Self {
        Self {
            worker_threads: detected_worker_threads().min(2),
            stack_size: 2 * MIN_STACK_SIZE,
            thread_name: "lpad-client".to_owned(),
            thread_keep_alive: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, MAX_WORKER_THREADS);
        self
    }

    #[must_use]
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = bytes.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.thread_name = if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name };
        self
    }

    #[must_use]
    pub const fn with_thread_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.thread_keep_alive = keep_alive;
        self
    }

    /// Clamps hand-written values into the supported ranges.
    fn normalized(&self) -> Self {
        self.clone()
            .with_worker_threads(self.worker_threads)
            .with_stack_size(self.stack_size)
            .with_thread_name(self.thread_name.clone())
    }
}

/// Builds a multi-threaded runtime with every Tokio driver enabled.
///
/// # Errors
/// Fails when the OS refuses to spawn the worker threads.
pub fn build_runtime_with_config(config: &RuntimeConfig) -> Result<Runtime> {
    let config = config.normalized();
    debug!(
        threads = config.worker_threads,
        stack = config.stack_size,
        name = %config.thread_name,
        "Building tokio runtime"
    );

    Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .thread_name(&config.thread_name)
        .thread_stack_size(config.stack_size)
        .thread_keep_alive(config.thread_keep_alive)
        .enable_all()
        .build()
        .with_context(|| format!("failed to start the {} runtime", config.thread_name))
}

fn detected_worker_threads() -> usize {
    std::env::var(WORKER_THREADS_ENV)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&threads| (1..=MAX_WORKER_THREADS).contains(&threads))
        .unwrap_or_else(|| {
            available_parallelism().map_or(FALLBACK_WORKER_THREADS, NonZero::get)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_threads_are_clamped() {
        assert_eq!(RuntimeConfig::default().with_worker_threads(0).worker_threads, 1);
        assert_eq!(
            RuntimeConfig::default().with_worker_threads(10_000).worker_threads,
            MAX_WORKER_THREADS
        );
    }

    #[test]
    fn stack_size_is_clamped() {
        assert_eq!(RuntimeConfig::default().with_stack_size(1).stack_size, MIN_STACK_SIZE);
        assert_eq!(RuntimeConfig::default().with_stack_size(usize::MAX).stack_size, MAX_STACK_SIZE);
    }

    #[test]
    fn blank_thread_name_falls_back() {
        assert_eq!(RuntimeConfig::default().with_thread_name("  ").thread_name, DEFAULT_THREAD_NAME);
    }

    #[test]
    fn client_preset_is_small() {
        let client = RuntimeConfig::client();
        assert!(client.worker_threads <= 2);
        assert!(client.stack_size < RuntimeConfig::server().stack_size);
    }

    #[test]
    fn normalization_fixes_hand_written_configs() {
        let raw = RuntimeConfig {
            worker_threads: 0,
            stack_size: 0,
            thread_name: String::new(),
            thread_keep_alive: Duration::ZERO,
        };

        let fixed = raw.normalized();
        assert_eq!(fixed.worker_threads, 1);
        assert_eq!(fixed.stack_size, MIN_STACK_SIZE);
        assert_eq!(fixed.thread_name, DEFAULT_THREAD_NAME);
    }
}
