use std::rc::Rc;

use gloo::console;
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::status::ErrorMessage;
use crate::config::Config;
use crate::models::business::{Business, TIMEZONES, Weekday};
use crate::models::settings::SettingsForm;
use crate::services::api::AgendaClient;

#[derive(Properties, PartialEq)]
pub struct SettingsProps {
    pub business: Rc<Business>,
    /// Receives the business with the saved changes merged in
    pub on_update: Callback<Business>,
}

#[derive(Clone, Copy)]
enum Edge {
    Start,
    End,
}

#[function_component(Settings)]
pub fn settings(props: &SettingsProps) -> Html {
    let form = {
        let business = props.business.clone();
        use_state(move || SettingsForm::from_business(&business))
    };
    let saving = use_state(|| false);
    let saved = use_state(|| false);
    let error = use_state(|| None::<String>);
    // Dropping the handle cancels the pending reset.
    let saved_timer = use_mut_ref(|| None::<Timeout>);

    let on_name = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.name = input.value();
            form.set(next);
        })
    };
    let on_timezone = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.timezone = select.value();
            form.set(next);
        })
    };
    let on_toggle = {
        let form = form.clone();
        Callback::from(move |day: Weekday| {
            let mut next = (*form).clone();
            next.toggle_day(day);
            form.set(next);
        })
    };
    let on_time = {
        let form = form.clone();
        Callback::from(move |(day, edge, value): (Weekday, Edge, String)| {
            let mut next = (*form).clone();
            match edge {
                Edge::Start => next.set_start(day, value),
                Edge::End => next.set_end(day, value),
            }
            form.set(next);
        })
    };

    let on_save = {
        let form = form.clone();
        let saving = saving.clone();
        let saved = saved.clone();
        let error = error.clone();
        let saved_timer = saved_timer.clone();
        let business = props.business.clone();
        let on_update = props.on_update.clone();
        Callback::from(move |_: MouseEvent| {
            if *saving {
                return;
            }
            let update = match form.to_update() {
                Ok(update) => update,
                Err(e) => {
                    error.set(Some(e.message().to_string()));
                    return;
                }
            };

            saving.set(true);
            saved.set(false);
            error.set(None);
            let saving = saving.clone();
            let saved = saved.clone();
            let error = error.clone();
            let saved_timer = saved_timer.clone();
            let business = business.clone();
            let on_update = on_update.clone();
            spawn_local(async move {
                let result = match AgendaClient::new() {
                    Ok(client) => client.update_business(&business.business_id, &update).await,
                    Err(e) => Err(e),
                };
                saving.set(false);
                match result {
                    Ok(()) => {
                        let mut updated = (*business).clone();
                        updated.apply_update(&update);
                        on_update.emit(updated);

                        saved.set(true);
                        let reset = saved.clone();
                        *saved_timer.borrow_mut() =
                            Some(Timeout::new(Config::SAVED_INDICATOR_MS, move || reset.set(false)));
                    }
                    Err(e) => {
                        console::error!(format!("Failed to save settings: {e}"));
                        error.set(Some(e.message().to_string()));
                    }
                }
            });
        })
    };

    let origin = gloo::utils::window().location().origin().unwrap_or_default();
    let booking_url = props.business.booking_url(&origin);
    let save_label = if *saving {
        "Saving..."
    } else if *saved {
        "Saved!"
    } else {
        "Save Changes"
    };

    html! {
        <div class="settings-page">
            <div class="page-header">
                <div>
                    <h1>{"Settings"}</h1>
                    <p class="muted">{"Manage your business settings"}</p>
                </div>
                <button class="btn btn-primary" onclick={on_save} disabled={*saving}>{save_label}</button>
            </div>

            if let Some(message) = (*error).clone() {
                <ErrorMessage {message} />
            }

            <section class="card">
                <h2>{"Business Information"}</h2>
                <p class="muted">{"Basic information about your business"}</p>

                <label class="field-label">{"Business Name"}</label>
                <input type="text" value={form.name.clone()} oninput={on_name} />

                <label class="field-label">{"Timezone"}</label>
                <select onchange={on_timezone}>
                    { for TIMEZONES.iter().map(|(zone, label)| html! {
                        <option value={*zone} selected={form.timezone == *zone}>{*label}</option>
                    }) }
                </select>
            </section>

            <section class="card">
                <h2>{"Public Booking Link"}</h2>
                <p class="muted">{"Share this link with your clients for online booking"}</p>
                <div class="booking-link">
                    <code>{booking_url.clone()}</code>
                    <a class="btn btn-secondary" href={booking_url} target="_blank">{"Open"}</a>
                </div>
            </section>

            <section class="card">
                <h2>{"Working Hours"}</h2>
                <p class="muted">{"Set your business hours for each day"}</p>
                <div class="hours-list">
                    { for Weekday::all().iter().map(|day| hours_row(*day, &form, &on_toggle, &on_time)) }
                </div>
            </section>

            <section class="card">
                <h2>{"Current Plan"}</h2>
                <div class="plan-info">
                    <p class="strong">{format!("{} Plan", capitalize(&props.business.plan))}</p>
                    <p class="muted">{"Manage your subscription"}</p>
                </div>
            </section>
        </div>
    }
}

fn hours_row(
    day: Weekday,
    form: &SettingsForm,
    on_toggle: &Callback<Weekday>,
    on_time: &Callback<(Weekday, Edge, String)>,
) -> Html {
    let schedule = form.working_hours.schedule(day);
    let toggle = on_toggle.reform(move |_: Event| day);
    let time = |edge: Edge| {
        on_time.reform(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            (day, edge, input.value())
        })
    };

    html! {
        <div key={day.label()} class="hours-row">
            <label class="day-toggle">
                <input type="checkbox" checked={schedule.enabled} onchange={toggle} />
                <span>{day.label()}</span>
            </label>
            if schedule.enabled {
                <div class="hours-range">
                    <input type="time" value={schedule.start.clone()} oninput={time(Edge::Start)} />
                    <span class="muted">{"to"}</span>
                    <input type="time" value={schedule.end.clone()} oninput={time(Edge::End)} />
                </div>
            } else {
                <span class="muted">{"Closed"}</span>
            }
        </div>
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Basic".to_string(),
    }
}
