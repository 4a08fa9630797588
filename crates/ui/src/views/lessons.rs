use std::path::Path;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::app::ProgressTick;
use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{lesson_cards, markdown_to_html};

const CERTIFICATE_DIR: &str = "certificates";

#[component]
pub fn LessonsView() -> Element {
    let ctx = use_context::<AppContext>();
    let tick = use_context::<ProgressTick>().0;
    let navigator = use_navigator();
    let mut query = use_signal(String::new);

    let _ = tick();
    let catalog = ctx.catalog();
    let progression = ctx.progress().snapshot();
    let cards = lesson_cards(&catalog, &progression, &query());

    rsx! {
        div { class: "page lessons",
            div { class: "lessons-main",
                h2 {
                    if query().trim().is_empty() {
                        "Curriculum modules"
                    } else {
                        "Search results"
                    }
                }
                input {
                    class: "search",
                    r#type: "text",
                    placeholder: "Search modules...",
                    value: "{query}",
                    oninput: move |event| query.set(event.value()),
                }
                if cards.is_empty() {
                    div { class: "empty", p { "No modules found." } }
                } else {
                    ul { class: "lesson-list",
                        for card in cards {
                            li {
                                key: "{card.id}",
                                class: if card.unlocked { "lesson-row" } else { "lesson-row locked" },
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
                                span {
                                    class: if card.completed { "lesson-number done" } else { "lesson-number" },
                                    if card.completed { "✓" } else { "{card.number:02}" }
                                }
                                div { class: "lesson-row-body",
                                    h4 { "{card.title}" }
                                    p { "{card.category} · {card.duration}" }
                                }
                                span { class: "lesson-row-state",
                                    if card.unlocked { "→" } else { "Locked" }
                                }
                            }
                        }
                    }
                }
            }
            AchievementPanel {}
        }
    }
}

#[component]
fn AchievementPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let tick = use_context::<ProgressTick>().0;
    let navigator = use_navigator();
    let mut certificate_name = use_signal(String::new);
    let mut certificate_status = use_signal(|| None::<Result<String, String>>);

    let _ = tick();
    let progress = ctx.progress();
    let total = ctx.catalog().lessons().len();
    let completed = progress.completed_count();
    let percentage = progress.completion_percentage();
    let exam_open = progress.is_final_exam_eligible();
    let exam_passed = progress.final_exam_passed();

    let certificates = ctx.certificates();
    let export_certificate = move |_| {
        match certificates
            .render(&certificate_name())
            .and_then(|certificate| certificate.write_to(Path::new(CERTIFICATE_DIR)))
        {
            Ok(path) => certificate_status.set(Some(Ok(format!("Saved to {}", path.display())))),
            Err(err) => certificate_status.set(Some(Err(err.to_string()))),
        }
    };

    rsx! {
        aside { class: "achievement",
            h3 { "Achievement" }
            p { "You have completed {completed} of {total} modules." }
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {percentage}%;" }
            }
            if exam_passed {
                div { class: "certificate-form",
                    input {
                        r#type: "text",
                        placeholder: "Name for the certificate",
                        value: "{certificate_name}",
                        oninput: move |event| certificate_name.set(event.value()),
                    }
                    button { class: "button primary", onclick: export_certificate, "Download certificate" }
                    {match certificate_status() {
                        Some(Ok(message)) => rsx! { p { class: "status ok", "{message}" } },
                        Some(Err(message)) => rsx! { p { class: "status error", "{message}" } },
                        None => rsx! {},
                    }}
                }
            } else if exam_open {
                button {
                    class: "button exam",
                    onclick: move |_| { navigator.push(Route::FinalExam {}); },
                    "Take the final exam"
                }
            } else {
                p { class: "hint", "Complete every module to open the final exam." }
            }
        }
    }
}

#[component]
pub fn LessonDetailView(lesson_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let tick = use_context::<ProgressTick>().0;
    let navigator = use_navigator();

    let _ = tick();
    let catalog = ctx.catalog();
    let id = hydro_core::model::LessonId::new(lesson_id);
    let Some(lesson) = catalog.lesson(id) else {
        return rsx! {
            div { class: "page",
                p { "This lesson does not exist." }
                Link { to: Route::Lessons {}, "Back to lessons" }
            }
        };
    };

    if !ctx.progress().is_unlocked(id) {
        return rsx! {
            div { class: "page",
                p { "Finish the previous module to unlock this lesson." }
                Link { to: Route::Lessons {}, "Back to lessons" }
            }
        };
    }

    let completed = ctx.progress().is_completed(id);
    let body_html = markdown_to_html(lesson.body());

    rsx! {
        div { class: "page lesson-detail",
            div { class: "lesson-banner",
                h2 { "{lesson.title()}" }
                p { "{lesson.category()} · {lesson.duration_label()}" }
                {lesson.video_url().map(|video_url| rsx! {
                    a { class: "link-button", href: "{video_url}", "Watch the walkthrough video" }
                })}
            }
            article { class: "lesson-body", dangerous_inner_html: "{body_html}" }
            div { class: "lesson-actions",
                if completed {
                    span { class: "badge done", "Module completed" }
                } else {
                    button {
                        class: "button primary",
                        onclick: move |_| { navigator.push(Route::ModuleQuiz { lesson_id }); },
                        "Start the module quiz"
                    }
                }
                Link { class: "button", to: Route::Lessons {}, "Back" }
            }
        }
    }
}
