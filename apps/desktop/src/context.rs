use livepad::domain::config::{ClientConfig, ScriptErrorPolicy};
use livepad::preview::PreviewOptions;
use livepad::projects::client::{HttpBackend, ProjectSync, SyncError};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Root context shared by every view. Network calls run on the client runtime, so
/// they work no matter which executor polls the UI futures.
#[derive(Debug, Clone)]
pub struct AppContext {
    inner: Arc<AppContextInner>,
}

#[derive(Debug)]
struct AppContextInner {
    sync: ProjectSync<HttpBackend>,
    runtime: Handle,
    options: PreviewOptions,
}

impl AppContext {
    /// # Errors
    /// [`SyncError::Connection`] when the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, runtime: Handle) -> Result<Self, SyncError> {
        let backend = HttpBackend::new(config.api_url.as_str())?;
        Ok(Self {
            inner: Arc::new(AppContextInner {
                sync: ProjectSync::new(backend),
                runtime,
                options: PreviewOptions::new(config.error_policy),
            }),
        })
    }

    #[must_use]
    pub fn sync(&self) -> &ProjectSync<HttpBackend> {
        &self.inner.sync
    }

    #[must_use]
    pub fn options(&self) -> PreviewOptions {
        self.inner.options
    }

    #[must_use]
    pub fn error_policy(&self) -> ScriptErrorPolicy {
        self.inner.options.error_policy
    }

    /// Runs `task` on the client runtime and waits for it.
    ///
    /// # Errors
    /// The task's own error, or [`SyncError::Connection`] if the task panicked or
    /// the runtime is shutting down.
    pub async fn offload<T, F>(&self, task: impl FnOnce(Self) -> F) -> Result<T, SyncError>
    where
        F: Future<Output = Result<T, SyncError>> + Send + 'static,
        T: Send + 'static,
    {
        self.inner.runtime.spawn(task(self.clone())).await.map_err(|err| {
            SyncError::Connection { message: format!("background task failed: {err}").into(), context: None }
        })?
    }
}
