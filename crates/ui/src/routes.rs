use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::app::{ProgressTick, ThemeSignal};
use crate::context::AppContext;
use crate::views::{
    DashboardView, FinalExamView, LessonDetailView, LessonsView, ModuleQuizView, MonitorView,
    SettingsView, TutorView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/lessons", LessonsView)] Lessons {},
        #[route("/lessons/:lesson_id", LessonDetailView)] LessonDetail { lesson_id: u64 },
        #[route("/quiz/:lesson_id", ModuleQuizView)] ModuleQuiz { lesson_id: u64 },
        #[route("/exam", FinalExamView)] FinalExam {},
        #[route("/monitor", MonitorView)] Monitor {},
        #[route("/tutor", TutorView)] Tutor {},
        #[route("/settings", SettingsView)] Settings {},
}

#[component]
fn Layout() -> Element {
    let theme = use_context::<ThemeSignal>().0;

    rsx! {
        div { class: "app theme-{theme()}",
            Sidebar {}
            main { class: "content",
                Header {}
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let tick = use_context::<ProgressTick>().0;

    // Re-read the snapshot whenever a quiz outcome bumps the tick.
    let _ = tick();
    let percentage = ctx.progress().completion_percentage();

    rsx! {
        nav { class: "sidebar",
            h1 { "HydroSmart Academy" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Lessons {}, "Lessons" } }
                li { Link { to: Route::Monitor {}, "Monitor" } }
                li { Link { to: Route::Tutor {}, "Tutor" } }
                li { Link { to: Route::Settings {}, "Settings" } }
            }
            div { class: "sidebar-progress",
                span { "Curriculum progress" }
                div { class: "progress-track",
                    div { class: "progress-fill", style: "width: {percentage}%;" }
                }
                span { class: "progress-label", "{percentage}%" }
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let mut theme = use_context::<ThemeSignal>().0;
    let mut tick = use_context::<ProgressTick>();
    let mut panel_open = use_signal(|| false);

    let _ = (tick.0)();
    let unread = ctx.notifications().unread_count();
    let entries = ctx.notifications().snapshot();

    let settings = ctx.settings();
    let feed_for_open = ctx.notifications();
    let feed_for_clear = ctx.notifications();

    let toggle_theme = move |_| {
        let next = theme().toggled();
        theme.set(next);
        let settings = settings.clone();
        spawn(async move {
            // Persist on every toggle; failures only lose the preference.
            let _ = settings.set_theme(next).await;
        });
    };

    rsx! {
        header { class: "topbar",
            button {
                class: "icon-button",
                title: "Toggle theme",
                onclick: toggle_theme,
                if theme() == hydro_core::model::ThemePreference::Dark { "Light mode" } else { "Dark mode" }
            }
            div { class: "bell",
                button {
                    class: "icon-button",
                    onclick: move |_| {
                        let open = !panel_open();
                        panel_open.set(open);
                        if open {
                            feed_for_open.mark_all_read();
                            tick.bump();
                        }
                    },
                    "Notifications"
                    if unread > 0 {
                        span { class: "bell-dot", "{unread}" }
                    }
                }
                if panel_open() {
                    div { class: "bell-panel",
                        div { class: "bell-panel-head",
                            h4 { "Updates" }
                            button {
                                class: "link-button",
                                onclick: move |_| {
                                    feed_for_clear.clear();
                                    tick.bump();
                                },
                                "Clear all"
                            }
                        }
                        if entries.is_empty() {
                            p { class: "bell-empty", "No notifications yet." }
                        } else {
                            ul {
                                for entry in entries {
                                    li { key: "{entry.id()}",
                                        span { class: "bell-time", {entry.created_at().format("%H:%M").to_string()} }
                                        "{entry.text()}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
