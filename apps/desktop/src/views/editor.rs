use super::shell::Shell;
use crate::context::AppContext;
use crate::host::DesktopHost;
use crate::surface::SignalSurface;
use dioxus::prelude::*;
use livepad::domain::{FragmentKind, ProjectId};
use livepad::editor::EditingSession;
use livepad::preview::PreviewRenderer;
use livepad::projects::client::{HttpBackend, ProjectBackend, ProjectSync};
use tracing::debug;

type Session = EditingSession<PreviewRenderer<SignalSurface>>;
type Projects = ProjectSync<HttpBackend>;

#[component]
pub fn Editor(project: Option<ProjectId>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut shell = use_context::<Shell>();
    let preview = use_signal(String::new);
    let options = ctx.options();
    let mut session: Signal<Session> = use_signal(move || {
        EditingSession::new(PreviewRenderer::with_options(SignalSurface::new(preview), options))
    });
    let saving = use_signal(|| false);
    // Edits and saves wait for the initial fetch; its result must land in a `NEW` session.
    let mut loading = use_signal(|| project.is_some());
    let mut prompting = use_signal(|| false);
    let mut draft = use_signal(String::new);

    use_hook({
        let ctx = ctx.clone();
        move || {
            spawn(async move {
                let Some(id) = project else {
                    session.write().open_fresh();
                    return;
                };
                let fetch_id = id.clone();
                let fetched = ctx
                    .offload(move |ctx| async move { ctx.sync().backend().fetch(&fetch_id).await })
                    .await;
                let mut host = DesktopHost::default();
                match Projects::finish_load(&mut *session.write(), &mut host, &id, fetched) {
                    Ok(()) => debug!(project_id = %id, "Editor opened on a stored project"),
                    Err(err) => debug!(error = %err, "Editor load ended with a notice"),
                }
                loading.set(false);
                shell.apply(host);
            });
        }
    });

    let save_ctx = ctx.clone();
    let on_save = move |_| {
        if session.read().state().is_bound() {
            run_save(save_ctx.clone(), session, saving, shell, DesktopHost::default());
        } else {
            prompting.set(true);
        }
    };

    let prompt_ctx = ctx.clone();
    let answer = move |name: Option<String>| {
        prompting.set(false);
        run_save(prompt_ctx.clone(), session, saving, shell, DesktopHost::answering(name));
    };

    let bound = session.read().project_id().cloned();
    let title = bound.as_ref().map_or_else(|| "Untitled project".to_owned(), |id| format!("Project {id}"));

    rsx! {
        section { class: "editor",
            header {
                button { onclick: move |_| shell.open(super::shell::Route::Listing), "Projects" }
                h1 { "{title}" }
                button {
                    class: "primary",
                    disabled: loading() || saving() || shell.is_blocking(),
                    onclick: on_save,
                    if saving() { "Saving..." } else { "Save" }
                }
            }
            div { class: "workspace",
                div { class: "sources",
                    for kind in FragmentKind::ALL {
                        div { class: "pane",
                            label { "{kind.label()}" }
                            textarea {
                                spellcheck: "false",
                                readonly: loading(),
                                value: session.read().fragment(kind).to_owned(),
                                oninput: move |evt| {
                                    session.write().set(kind, evt.value());
                                },
                            }
                        }
                    }
                }
                iframe {
                    class: "preview",
                    title: "Preview",
                    "sandbox": "allow-scripts",
                    "srcdoc": preview(),
                }
            }
            if prompting() {
                div { class: "backdrop",
                    div { class: "notice", role: "dialog",
                        p { "Name your new project:" }
                        input {
                            autofocus: true,
                            value: draft(),
                            oninput: move |evt| draft.set(evt.value()),
                        }
                        div { class: "actions",
                            button {
                                onclick: {
                                    let mut answer = answer.clone();
                                    move |_| answer(Some(draft()))
                                },
                                "Save"
                            }
                            button {
                                onclick: {
                                    let mut answer = answer.clone();
                                    move |_| answer(None)
                                },
                                "Cancel"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Prepares on the UI thread, sends on the client runtime, then finishes back on
/// the UI thread; the session is never borrowed across the request.
fn run_save(
    ctx: AppContext,
    mut session: Signal<Session>,
    mut saving: Signal<bool>,
    mut shell: Shell,
    mut host: DesktopHost,
) {
    let prepared = Projects::prepare_save(&*session.read(), &mut host);
    shell.apply(host);
    let Ok(Some(request)) = prepared else {
        return;
    };

    saving.set(true);
    spawn(async move {
        let result =
            ctx.offload(move |ctx| async move { ctx.sync().execute(request).await }).await;
        let mut host = DesktopHost::default();
        match Projects::finish(&mut *session.write(), &mut host, result) {
            Ok(outcome) => debug!(?outcome, "Save finished"),
            Err(err) => debug!(error = %err, "Save ended with a notice"),
        }
        saving.set(false);
        shell.apply(host);
    });
}
