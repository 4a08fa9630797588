use dioxus::prelude::*;

use hydro_core::model::AppSettingsDraft;

use crate::app::ThemeSignal;
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let theme = use_context::<ThemeSignal>().0;

    let settings_resource = use_resource({
        let settings = ctx.settings();
        move || {
            let settings = settings.clone();
            async move {
                settings
                    .load()
                    .await
                    .map(|settings| {
                        (
                            settings.api_key().unwrap_or_default().to_string(),
                            settings.api_model().unwrap_or_default().to_string(),
                            settings.api_base_url().unwrap_or_default().to_string(),
                            settings.tutor_system_prompt().unwrap_or_default().to_string(),
                        )
                    })
                    .map_err(|_| ViewError::Unknown)
            }
        }
    });

    match view_state_from_resource(settings_resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            div { class: "page settings", p { "Loading settings..." } }
        },
        ViewState::Error(err) => rsx! {
            div { class: "page settings", p { class: "status error", "{err.message()}" } }
        },
        ViewState::Ready((api_key, api_model, api_base_url, system_prompt)) => rsx! {
            SettingsForm {
                api_key,
                api_model,
                api_base_url,
                system_prompt,
                theme_label: theme().to_string(),
            }
        },
    }
}

#[component]
fn SettingsForm(
    api_key: String,
    api_model: String,
    api_base_url: String,
    system_prompt: String,
    theme_label: String,
) -> Element {
    let ctx = use_context::<AppContext>();
    let mut api_key = use_signal(|| api_key);
    let mut api_model = use_signal(|| api_model);
    let mut api_base_url = use_signal(|| api_base_url);
    let mut system_prompt = use_signal(|| system_prompt);
    let mut status = use_signal(|| None::<Result<&'static str, String>>);
    let theme = use_context::<ThemeSignal>().0;

    let save = {
        let ctx = ctx.clone();
        move |_| {
            let draft = AppSettingsDraft {
                theme: theme(),
                api_key: Some(api_key()),
                api_model: Some(api_model()),
                api_base_url: Some(api_base_url()),
                tutor_system_prompt: Some(system_prompt()),
            };
            let settings = ctx.settings();
            spawn(async move {
                match settings.save(draft).await {
                    Ok(_) => status.set(Some(Ok("Settings saved."))),
                    Err(err) => status.set(Some(Err(err.to_string()))),
                }
            });
        }
    };

    rsx! {
        div { class: "page settings",
            h2 { "Settings" }
            p { class: "hint",
                "Theme: {theme_label} — use the toggle in the header to switch. \
                 The tutor needs an API key; without one it answers with a fallback message."
            }
            div { class: "settings-form",
                label { "API key"
                    input {
                        r#type: "password",
                        value: "{api_key}",
                        oninput: move |event| api_key.set(event.value()),
                    }
                }
                label { "Model"
                    input {
                        r#type: "text",
                        placeholder: "gpt-4o-mini",
                        value: "{api_model}",
                        oninput: move |event| api_model.set(event.value()),
                    }
                }
                label { "Base URL"
                    input {
                        r#type: "text",
                        placeholder: "https://api.openai.com/v1",
                        value: "{api_base_url}",
                        oninput: move |event| api_base_url.set(event.value()),
                    }
                }
                label { "Tutor system prompt"
                    textarea {
                        value: "{system_prompt}",
                        oninput: move |event| system_prompt.set(event.value()),
                    }
                }
                button { class: "button primary", onclick: save, "Save" }
                {match status() {
                    Some(Ok(message)) => rsx! { p { class: "status ok", "{message}" } },
                    Some(Err(message)) => rsx! { p { class: "status error", "{message}" } },
                    None => rsx! {},
                }}
            }
        }
    }
}
