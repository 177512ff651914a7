use gloo::console;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::status::ErrorMessage;
use crate::models::business::{Business, TIMEZONES};
use crate::models::onboarding::{OnboardingForm, OnboardingStep};
use crate::services::api::AgendaClient;

#[derive(Properties, PartialEq)]
pub struct OnboardingProps {
    pub on_complete: Callback<Business>,
}

#[function_component(Onboarding)]
pub fn onboarding(props: &OnboardingProps) -> Html {
    let form = use_state(OnboardingForm::default);
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    let on_name = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.set_name(input.value());
            form.set(next);
        })
    };
    let on_slug = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.set_slug(&input.value());
            form.set(next);
        })
    };
    let on_timezone = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.set_timezone(select.value());
            form.set(next);
        })
    };
    let on_continue = {
        let form = form.clone();
        let error = error.clone();
        Callback::from(move |_| {
            let mut next = (*form).clone();
            match next.advance() {
                Ok(()) => {
                    error.set(None);
                    form.set(next);
                }
                Err(e) => error.set(Some(e.message().to_string())),
            }
        })
    };
    let on_back = {
        let form = form.clone();
        Callback::from(move |_| {
            let mut next = (*form).clone();
            next.back();
            form.set(next);
        })
    };
    let on_submit = {
        let form = form.clone();
        let saving = saving.clone();
        let error = error.clone();
        let on_complete = props.on_complete.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let request = match form.to_request() {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.message().to_string()));
                    return;
                }
            };

            saving.set(true);
            error.set(None);
            let saving = saving.clone();
            let error = error.clone();
            let on_complete = on_complete.clone();
            spawn_local(async move {
                let result = match AgendaClient::new() {
                    Ok(client) => client.create_business(&request).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(business) => on_complete.emit(business),
                    Err(e) => {
                        console::error!(format!("Failed to create business: {e}"));
                        error.set(Some(e.message().to_string()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let origin = gloo::utils::window().location().origin().unwrap_or_default();
    let link_prefix = format!("{}/agenda/", origin.trim_end_matches('/'));
    let preview = form.link_preview(&origin);

    html! {
        <div class="onboarding-page">
            <div class="card onboarding-card">
                <div class="onboarding-header">
                    <h1>{"Corella Agenda"}</h1>
                    <p class="muted">{"Let's set up your business"}</p>
                </div>

                <div class="progress">
                    <div class="progress-bar done"></div>
                    <div class={classes!("progress-bar", (form.step == OnboardingStep::Link).then_some("done"))}></div>
                </div>

                <form onsubmit={on_submit}>
                    {
                        match form.step {
                            OnboardingStep::Name => html! {
                                <div class="onboarding-step">
                                    <h2>{"What's your business name?"}</h2>
                                    <p class="muted">{"This will be displayed to your clients"}</p>
                                    <input
                                        type="text"
                                        placeholder="e.g., Maria's Hair Salon"
                                        value={form.name.clone()}
                                        oninput={on_name}
                                        required=true
                                    />
                                    <button
                                        type="button"
                                        class="btn btn-primary btn-block"
                                        disabled={!form.can_advance()}
                                        onclick={on_continue}
                                    >
                                        {"Continue →"}
                                    </button>
                                </div>
                            },
                            OnboardingStep::Link => html! {
                                <div class="onboarding-step">
                                    <h2>{"Your booking page URL"}</h2>
                                    <p class="muted">{"Clients will use this link to book appointments"}</p>

                                    <label class="field-label">{"Your booking link:"}</label>
                                    <div class="slug-field">
                                        <span class="muted">{link_prefix}</span>
                                        <input
                                            type="text"
                                            value={form.slug.clone()}
                                            oninput={on_slug}
                                            required=true
                                        />
                                    </div>
                                    <p class="muted">{preview}</p>

                                    <label class="field-label">{"Timezone"}</label>
                                    <select onchange={on_timezone}>
                                        { for TIMEZONES.iter().map(|(zone, label)| html! {
                                            <option value={*zone} selected={form.timezone == *zone}>{*label}</option>
                                        }) }
                                    </select>

                                    <div class="form-actions">
                                        <button type="button" class="btn btn-secondary" onclick={on_back}>{"Back"}</button>
                                        <button
                                            type="submit"
                                            class="btn btn-primary"
                                            disabled={*saving || form.slug.is_empty()}
                                        >
                                            { if *saving { "Creating..." } else { "Create Business" } }
                                        </button>
                                    </div>
                                </div>
                            },
                        }
                    }
                    if let Some(message) = (*error).clone() {
                        <ErrorMessage {message} />
                    }
                </form>
            </div>
        </div>
    }
}
