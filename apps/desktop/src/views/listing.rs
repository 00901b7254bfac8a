use super::shell::{Route, Shell};
use crate::context::AppContext;
use dioxus::prelude::*;
use livepad::projects::ProjectSummary;
use livepad::projects::client::{Notice, ProjectBackend};

#[component]
pub fn Listing() -> Element {
    let ctx = use_context::<AppContext>();
    let mut shell = use_context::<Shell>();
    let mut projects = use_resource(move || {
        let ctx = ctx.clone();
        async move { ctx.offload(|ctx| async move { ctx.sync().backend().list().await }).await }
    });

    let body = match &*projects.read() {
        None => rsx! { p { class: "hint", "Loading projects..." } },
        Some(Err(err)) => rsx! { p { class: "hint error", "Could not load projects: {err}" } },
        Some(Ok(list)) if list.is_empty() => rsx! { p { class: "hint", "No projects yet." } },
        Some(Ok(list)) => rsx! {
            ul { class: "projects",
                for summary in list.iter().cloned() {
                    ProjectRow {
                        key: "{summary.id}",
                        summary,
                        on_deleted: move |()| projects.restart(),
                    }
                }
            }
        },
    };

    rsx! {
        section { class: "listing",
            header {
                h1 { "Projects" }
                button { onclick: move |_| shell.open(Route::Editor { project: None }), "New project" }
            }
            {body}
        }
    }
}

#[component]
fn ProjectRow(summary: ProjectSummary, on_deleted: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut shell = use_context::<Shell>();
    let open_id = summary.id.clone();
    let delete_id = summary.id.clone();

    let delete = move |_| {
        let ctx = ctx.clone();
        let id = delete_id.clone();
        spawn(async move {
            let result =
                ctx.offload(move |ctx| async move { ctx.sync().backend().delete(&id).await }).await;
            match result {
                Ok(_) => on_deleted.call(()),
                Err(err) => shell.notify(Notice::error(format!("Error deleting: {err}"))),
            }
        });
    };

    rsx! {
        li {
            span { class: "name", "{summary.name}" }
            button {
                onclick: move |_| shell.open(Route::Editor { project: Some(open_id.clone()) }),
                "Open"
            }
            button { class: "danger", onclick: delete, "Delete" }
        }
    }
}
