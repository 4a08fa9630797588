use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{ChatEntry, greeting, lesson_context};

#[component]
pub fn TutorView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut transcript = use_signal(|| vec![greeting()]);
    let mut input = use_signal(String::new);
    let mut pending = use_signal(|| 0u32);

    let send = {
        let ctx = ctx.clone();
        move |_| {
            let question = input().trim().to_string();
            if question.is_empty() {
                return;
            }
            input.set(String::new());
            transcript.with_mut(|entries| entries.push(ChatEntry::student(question.clone())));

            // Completed-lesson titles give the tutor something to build on.
            let completed_titles: Vec<String> = ctx
                .catalog()
                .lessons()
                .iter()
                .filter(|lesson| ctx.progress().is_completed(lesson.id()))
                .map(|lesson| lesson.title().to_string())
                .collect();
            let context = lesson_context(&completed_titles);

            let tutor = ctx.tutor();
            pending.set(pending() + 1);
            spawn(async move {
                // Replies append in arrival order; `ask` never fails, it
                // falls back to a fixed reply instead.
                let reply = tutor.ask(&question, context.as_deref()).await;
                transcript.with_mut(|entries| entries.push(ChatEntry::tutor(reply)));
                pending.set(pending().saturating_sub(1));
            });
        }
    };

    rsx! {
        div { class: "page tutor",
            div { class: "tutor-head",
                h2 { "Agri-Tutor" }
                span { class: "live-pill", "Live assistant" }
            }
            div { class: "transcript",
                for (index, entry) in transcript().into_iter().enumerate() {
                    div { key: "{index}", class: "chat-row {entry.role.class()}",
                        div { class: "chat-bubble", "{entry.text}" }
                    }
                }
                if pending() > 0 {
                    div { class: "chat-row chat-tutor",
                        div { class: "chat-bubble thinking", "Thinking..." }
                    }
                }
            }
            div { class: "composer",
                input {
                    r#type: "text",
                    placeholder: "Ask anything about hydroponics...",
                    value: "{input}",
                    oninput: move |event| input.set(event.value()),
                    onkeydown: {
                        let mut send = send.clone();
                        move |event: KeyboardEvent| {
                            if event.key() == Key::Enter {
                                send(());
                            }
                        }
                    },
                }
                button {
                    class: "button primary",
                    onclick: {
                        let mut send = send.clone();
                        move |_| send(())
                    },
                    "Send"
                }
            }
        }
    }
}
