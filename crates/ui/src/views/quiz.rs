use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use hydro_core::model::LessonId;
use services::{QuizOutcome, QuizWorkflowService};

use crate::app::ProgressTick;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{QuizPhase, QuizVm};

#[component]
pub fn ModuleQuizView(lesson_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let workflow = ctx.quiz_workflow();
    let vm = use_signal({
        let workflow = Arc::clone(&workflow);
        move || QuizVm::start_module(&workflow, LessonId::new(lesson_id))
    });

    quiz_runner(vm, workflow, Route::LessonDetail { lesson_id })
}

#[component]
pub fn FinalExamView() -> Element {
    let ctx = use_context::<AppContext>();
    let workflow = ctx.quiz_workflow();
    let vm = use_signal({
        let workflow = Arc::clone(&workflow);
        move || QuizVm::start_final_exam(&workflow)
    });

    quiz_runner(vm, workflow, Route::Lessons {})
}

/// Everything one render of the quiz screen needs, extracted in one read so
/// event handlers are free to mutate the vm afterwards.
enum RunnerData {
    Failed(ViewError),
    Question {
        title: String,
        prompt: String,
        options: Vec<String>,
        selected: Option<usize>,
        number: usize,
        total: usize,
        can_retreat: bool,
        can_advance: bool,
        can_submit: bool,
        is_last: bool,
    },
    Scored {
        title: String,
        outcome: QuizOutcome,
    },
}

fn runner_data(vm: &Result<QuizVm, ViewError>) -> RunnerData {
    match vm {
        Err(err) => RunnerData::Failed(*err),
        Ok(vm) => match vm.phase() {
            QuizPhase::Scored(outcome) => RunnerData::Scored {
                title: vm.title().to_string(),
                outcome: outcome.clone(),
            },
            QuizPhase::InProgress => {
                let progress = vm.progress();
                RunnerData::Question {
                    title: vm.title().to_string(),
                    prompt: vm.prompt(),
                    options: vm.options(),
                    selected: vm.selected(),
                    number: progress.current + 1,
                    total: progress.total,
                    can_retreat: vm.can_retreat(),
                    can_advance: vm.can_advance(),
                    can_submit: vm.can_submit(),
                    is_last: vm.is_last(),
                }
            }
        },
    }
}

fn quiz_runner(
    mut vm: Signal<Result<QuizVm, ViewError>>,
    workflow: Arc<QuizWorkflowService>,
    exit: Route,
) -> Element {
    let navigator = use_navigator();
    let mut tick = use_context::<ProgressTick>();

    let data = vm.with(|vm| runner_data(vm));

    match data {
        RunnerData::Failed(err) => rsx! {
            div { class: "page quiz",
                p { class: "status error", "{err.message()}" }
                button {
                    class: "button",
                    onclick: move |_| { navigator.push(exit.clone()); },
                    "Back"
                }
            }
        },
        RunnerData::Scored { title, outcome } => {
            let exit_on_continue = exit.clone();
            rsx! {
                div { class: "page quiz",
                    div { class: "quiz-result",
                        h4 { class: "quiz-result-title", "{title}" }
                        h2 {
                            if outcome.passed { "Well done!" } else { "Not quite there" }
                        }
                        p {
                            if outcome.passed {
                                "You have fully mastered this material."
                            } else {
                                "You need every answer correct (100%) to pass."
                            }
                        }
                        div { class: "score-box",
                            span { class: "score-label", "Your score" }
                            span {
                                class: if outcome.passed { "score pass" } else { "score fail" },
                                "{outcome.score}%"
                            }
                        }
                        {outcome.unlocked_title.as_ref().map(|unlocked_title| rsx! {
                            p { class: "status ok", "New module unlocked: {unlocked_title}" }
                        })}
                        if outcome.final_exam_passed {
                            p { class: "status ok", "Final exam passed — your certificate is ready." }
                        }
                        if outcome.passed {
                            button {
                                class: "button primary",
                                onclick: move |_| {
                                    tick.bump();
                                    navigator.push(Route::Lessons {});
                                },
                                "Continue"
                            }
                        } else {
                            button {
                                class: "button retry",
                                onclick: move |_| {
                                    vm.with_mut(|vm| {
                                        if let Ok(vm) = vm {
                                            vm.retry();
                                        }
                                    });
                                },
                                "Retry quiz"
                            }
                            button {
                                class: "button",
                                onclick: move |_| {
                                    tick.bump();
                                    navigator.push(exit_on_continue.clone());
                                },
                                "Give up for now"
                            }
                        }
                    }
                }
            }
        }
        RunnerData::Question {
            title,
            prompt,
            options,
            selected,
            number,
            total,
            can_retreat,
            can_advance,
            can_submit,
            is_last,
        } => {
            let percent = 100 * number / total;
            let exit_on_cancel = exit.clone();
            rsx! {
                div { class: "page quiz",
                    div { class: "quiz-head",
                        div {
                            h2 { "{title}" }
                            p { "Answer 100% correctly to continue." }
                        }
                        button {
                            class: "icon-button",
                            title: "Cancel quiz",
                            onclick: move |_| { navigator.push(exit_on_cancel.clone()); },
                            "✕"
                        }
                    }
                    div { class: "progress-track thin",
                        div { class: "progress-fill", style: "width: {percent}%;" }
                    }
                    div { class: "quiz-body",
                        span { class: "question-counter", "Question {number} of {total}" }
                        h3 { "{prompt}" }
                        div { class: "options",
                            for (index, option) in options.into_iter().enumerate() {
                                button {
                                    key: "{index}",
                                    class: if selected == Some(index) { "option selected" } else { "option" },
                                    onclick: move |_| {
                                        vm.with_mut(|vm| {
                                            if let Ok(vm) = vm {
                                                vm.select(index);
                                            }
                                        });
                                    },
                                    "{option}"
                                }
                            }
                        }
                        div { class: "quiz-nav",
                            button {
                                class: "button",
                                disabled: !can_retreat,
                                onclick: move |_| {
                                    vm.with_mut(|vm| {
                                        if let Ok(vm) = vm {
                                            vm.prev();
                                        }
                                    });
                                },
                                "Previous"
                            }
                            if is_last {
                                button {
                                    class: "button primary",
                                    disabled: !can_submit,
                                    onclick: {
                                        let workflow = Arc::clone(&workflow);
                                        move |_| {
                                            vm.with_mut(|vm| {
                                                if let Ok(vm) = vm {
                                                    let _ = vm.submit(&workflow);
                                                }
                                            });
                                            tick.bump();
                                        }
                                    },
                                    "Finish quiz"
                                }
                            } else {
                                button {
                                    class: "button primary",
                                    disabled: !can_advance,
                                    onclick: move |_| {
                                        vm.with_mut(|vm| {
                                            if let Ok(vm) = vm {
                                                vm.next();
                                            }
                                        });
                                    },
                                    "Next"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
