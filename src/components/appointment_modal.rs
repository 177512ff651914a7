use chrono::Local;
use gloo::console;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::status::ErrorMessage;
use crate::models::appointment::AppointmentForm;
use crate::models::client::Client;
use crate::models::service::{Service, bookable};
use crate::models::staff::{Staff, active};
use crate::services::api::AgendaClient;
use crate::utils::format::format_price;

#[derive(Properties, PartialEq)]
pub struct AppointmentModalProps {
    pub business_id: AttrValue,
    pub initial: AppointmentForm,
    pub clients: Vec<Client>,
    pub services: Vec<Service>,
    pub staff: Vec<Staff>,
    pub on_close: Callback<()>,
    /// Fired after the appointment was created
    pub on_created: Callback<()>,
}

#[derive(Clone, Copy)]
enum Field {
    Client,
    Service,
    Staff,
}

/// New-appointment form. Server errors stay inline so the entered values
/// survive a rejected slot.
#[function_component(AppointmentModal)]
pub fn appointment_modal(props: &AppointmentModalProps) -> Html {
    let form = {
        let initial = props.initial.clone();
        use_state(move || initial)
    };
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    let on_select = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            match field {
                Field::Client => next.client_id = select.value(),
                Field::Service => next.service_id = select.value(),
                Field::Staff => next.staff_id = select.value(),
            }
            form.set(next);
        })
    };
    let on_start = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.start = input.value();
            form.set(next);
        })
    };
    let on_notes = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.notes = input.value();
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let saving = saving.clone();
        let error = error.clone();
        let business_id = props.business_id.clone();
        let on_created = props.on_created.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let appointment = match form.validate(&Local) {
                Ok(appointment) => appointment,
                Err(e) => {
                    error.set(Some(e.message().to_string()));
                    return;
                }
            };

            saving.set(true);
            error.set(None);
            let saving = saving.clone();
            let error = error.clone();
            let business_id = business_id.clone();
            let on_created = on_created.clone();
            spawn_local(async move {
                let result = match AgendaClient::new() {
                    Ok(client) => client.create_appointment(&business_id, &appointment).await,
                    Err(e) => Err(e),
                };
                saving.set(false);
                match result {
                    Ok(_) => on_created.emit(()),
                    Err(e) => {
                        console::error!(format!("Failed to save appointment: {e}"));
                        error.set(Some(e.message().to_string()));
                    }
                }
            });
        })
    };

    let close = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="modal-backdrop">
            <div class="card modal">
                <div class="modal-header">
                    <h2>{"New Appointment"}</h2>
                    <button class="icon-button" onclick={close.clone()} aria-label="Close">{"✕"}</button>
                </div>
                <form onsubmit={on_submit}>
                    <label class="field-label">{"Client *"}</label>
                    <select onchange={on_select(Field::Client)} required=true>
                        <option value="" selected={form.client_id.is_empty()}>{"Select client"}</option>
                        { for props.clients.iter().map(|c| html! {
                            <option value={c.client_id.clone()} selected={form.client_id == c.client_id}>{&c.name}</option>
                        }) }
                    </select>

                    <label class="field-label">{"Service *"}</label>
                    <select onchange={on_select(Field::Service)} required=true>
                        <option value="" selected={form.service_id.is_empty()}>{"Select service"}</option>
                        { for bookable(&props.services).iter().map(|s| html! {
                            <option value={s.service_id.clone()} selected={form.service_id == s.service_id}>
                                {format!("{} ({} min - {})", s.name, s.duration, format_price(s.price))}
                            </option>
                        }) }
                    </select>

                    <label class="field-label">{"Staff *"}</label>
                    <select onchange={on_select(Field::Staff)} required=true>
                        <option value="" selected={form.staff_id.is_empty()}>{"Select staff"}</option>
                        { for active(&props.staff).iter().map(|s| html! {
                            <option value={s.staff_id.clone()} selected={form.staff_id == s.staff_id}>{&s.name}</option>
                        }) }
                    </select>

                    <label class="field-label">{"Date & Time *"}</label>
                    <input type="datetime-local" value={form.start.clone()} oninput={on_start} required=true />

                    <label class="field-label">{"Notes"}</label>
                    <textarea value={form.notes.clone()} oninput={on_notes} rows="2" />

                    if let Some(message) = (*error).clone() {
                        <ErrorMessage {message} />
                    }

                    <div class="form-actions">
                        <button type="button" class="btn btn-secondary" onclick={close}>{"Cancel"}</button>
                        <button type="submit" class="btn btn-primary" disabled={*saving}>
                            { if *saving { "Creating..." } else { "Create Appointment" } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
