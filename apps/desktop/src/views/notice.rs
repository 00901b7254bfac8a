use super::shell::Shell;
use dioxus::prelude::*;
use livepad::projects::client::NoticeLevel;

#[component]
pub fn NoticeModal() -> Element {
    let mut shell = use_context::<Shell>();
    let Some(notice) = shell.current_notice() else {
        return rsx! {};
    };
    let class = match notice.level {
        NoticeLevel::Info => "notice info",
        NoticeLevel::Error => "notice error",
    };

    rsx! {
        div { class: "backdrop",
            div { class: "{class}", role: "alertdialog",
                p { "{notice.message}" }
                button { autofocus: true, onclick: move |_| shell.dismiss(), "OK" }
            }
        }
    }
}
