mod editor;
mod listing;
mod notice;
mod shell;

pub use shell::{Route, Shell};

use dioxus::prelude::*;
use editor::Editor;
use listing::Listing;
use notice::NoticeModal;

/// Root component: one view at a time plus the modal notice on top.
#[component]
pub fn App() -> Element {
    let shell = Shell::provide();

    let view = match shell.route() {
        Route::Listing => rsx! { Listing {} },
        Route::Editor { project } => {
            let key = project.as_ref().map_or_else(|| "new".to_owned(), ToString::to_string);
            rsx! { Editor { key: "{key}", project } }
        },
    };

    rsx! {
        main { class: "app", {view} }
        NoticeModal {}
    }
}
