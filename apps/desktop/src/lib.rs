//! Livepad desktop editor: project listing, three source panes and a live,
//! sandboxed preview, talking to the project API over HTTP.

mod context;
mod host;
mod surface;
mod views;

pub use context::AppContext;
pub use host::{DesktopHost, NoticeQueue};
pub use surface::SignalSurface;
pub use views::{App, Route, Shell};

use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;

const STYLE: &str = include_str!("style.css");

#[derive(Debug)]
pub struct DesktopApp {
    title: String,
    width: f64,
    height: f64,
}

impl Default for DesktopApp {
    fn default() -> Self {
        Self { title: "Livepad".to_owned(), width: 1280.0, height: 800.0 }
    }
}

impl DesktopApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use = "This function does nothing unless you call `launch()` on it"]
    pub const fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Opens the window and blocks until it is closed.
    pub fn launch(self, context: AppContext) {
        let window = WindowBuilder::new().with_title(&self.title).with_inner_size(
            dioxus::desktop::LogicalSize { width: self.width, height: self.height },
        );

        let cfg = Config::default().with_window(window).with_custom_head(format!(
            r#"<meta name="viewport" content="width=device-width, initial-scale=1.0"><style>{STYLE}</style>"#
        ));

        LaunchBuilder::desktop().with_cfg(cfg).with_context(context).launch(App);
    }
}
