use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::app::ProgressTick;
use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::lesson_cards;

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let tick = use_context::<ProgressTick>().0;
    let navigator = use_navigator();
    let mut query = use_signal(String::new);

    let _ = tick();
    let catalog = ctx.catalog();
    let progression = ctx.progress().snapshot();
    let cards = lesson_cards(&catalog, &progression, &query());

    rsx! {
        div { class: "page dashboard",
            section { class: "hero",
                span { class: "hero-tag", "Hydroponics 4.0 Edition" }
                h2 { "The farming revolution, in your hands" }
                p {
                    "Learn modern hydroponic technique and IoT-driven irrigation \
                     through an industry-standard curriculum."
                }
                Link { class: "button primary", to: Route::Lessons {}, "Start the curriculum" }
            }

            section { class: "featured",
                div { class: "featured-head",
                    h3 {
                        if query().trim().is_empty() {
                            "Featured modules"
                        } else {
                            "Search results"
                        }
                    }
                    input {
                        class: "search",
                        r#type: "text",
                        placeholder: "Search modules (e.g. NFT, nutrients, basics)...",
                        value: "{query}",
                        oninput: move |event| query.set(event.value()),
                    }
                }
                if cards.is_empty() {
                    div { class: "empty",
                        p { "No modules match your search." }
                        button {
                            class: "link-button",
                            onclick: move |_| query.set(String::new()),
                            "Reset search"
                        }
                    }
                } else {
                    div { class: "card-grid",
                        for card in cards {
                            div {
                                key: "{card.id}",
                                class: if card.unlocked { "lesson-card" } else { "lesson-card locked" },
                                onclick: {
                                    let navigator = navigator;
                                    let unlocked = card.unlocked;
                                    let lesson_id = card.id.value();
                                    move |_| {
                                        if unlocked {
                                            navigator.push(Route::LessonDetail { lesson_id });
                                        }
                                    }
                                },
                                div { class: "lesson-card-head",
                                    span { class: "category", "{card.category}" }
                                    if card.completed {
                                        span { class: "badge done", "Completed" }
                                    } else if !card.unlocked {
                                        span { class: "badge locked", "Locked" }
                                    }
                                }
                                h4 { "{card.title}" }
                                p { class: "description", "{card.description}" }
                                span { class: "duration", "{card.duration}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
