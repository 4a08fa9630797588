use dioxus::prelude::*;
use dioxus_router::Router;

use hydro_core::model::ThemePreference;

use crate::context::AppContext;
use crate::routes::Route;

/// Theme state shared across the layout and the settings view.
#[derive(Clone, Copy)]
pub struct ThemeSignal(pub Signal<ThemePreference>);

/// Bumped whenever progression or the notification feed changes, so the
/// sidebar and header re-read their service snapshots.
#[derive(Clone, Copy)]
pub struct ProgressTick(pub Signal<u32>);

impl ProgressTick {
    pub fn bump(&mut self) {
        let current = (self.0)();
        self.0.set(current.wrapping_add(1));
    }
}

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    use_context_provider(|| ThemeSignal(Signal::new(ctx.initial_theme())));
    use_context_provider(|| ProgressTick(Signal::new(0)));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-route titles are rendered inside the views.
        document::Title { "HydroSmart Academy" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
