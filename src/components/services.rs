use std::rc::Rc;

use gloo::console;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::status::{ErrorMessage, Status, report_failure};
use crate::hooks::use_services::use_services;
use crate::models::business::Business;
use crate::models::service::{Service, ServiceForm, ServiceUpdate};
use crate::services::api::AgendaClient;
use crate::utils::format::format_price;

#[derive(Properties, PartialEq)]
pub struct ServicesProps {
    pub business: Rc<Business>,
}

#[function_component(Services)]
pub fn services(props: &ServicesProps) -> Html {
    let business_id = props.business.business_id.clone();
    let resource = use_services(business_id.clone());
    let modal = use_state(|| None::<ServiceForm>);

    let open_new = {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| modal.set(Some(ServiceForm::default())))
    };
    let open_edit = {
        let modal = modal.clone();
        Callback::from(move |service: Service| modal.set(Some(ServiceForm::edit(&service))))
    };
    let close_modal = {
        let modal = modal.clone();
        Callback::from(move |()| modal.set(None))
    };
    let on_saved = {
        let modal = modal.clone();
        let reload = resource.reload.clone();
        Callback::from(move |()| {
            modal.set(None);
            reload.emit(());
        })
    };
    let on_toggle = {
        let business_id = business_id.clone();
        let reload = resource.reload.clone();
        Callback::from(move |service: Service| {
            let update = service.toggle_update();
            let business_id = business_id.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let result = match AgendaClient::new() {
                    Ok(client) => {
                        client
                            .update_service(&business_id, &service.service_id, &update)
                            .await
                    }
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => reload.emit(()),
                    Err(e) => report_failure("update service", &e),
                }
            });
        })
    };

    let content = match resource.state.data() {
        None => html! { <Status<Vec<Service>> state={resource.state.clone()} /> },
        Some(services) if services.is_empty() => html! {
            <div class="card empty-state">
                <h3>{"No services yet"}</h3>
                <p class="muted">{"Add your first service to start accepting bookings"}</p>
                <button class="btn btn-primary" onclick={open_new.clone()}>{"+ Add Service"}</button>
            </div>
        },
        Some(services) => html! {
            <div class="service-grid">
                { for services.iter().map(|service| service_card(service, &open_edit, &on_toggle)) }
            </div>
        },
    };

    html! {
        <div class="services-page">
            <div class="page-header">
                <div>
                    <h1>{"Services"}</h1>
                    <p class="muted">{"Manage your service offerings"}</p>
                </div>
                <button class="btn btn-primary" onclick={open_new}>{"+ Add Service"}</button>
            </div>

            { content }

            if let Some(form) = (*modal).clone() {
                <ServiceModal business_id={business_id.clone()} initial={form} on_close={close_modal} {on_saved} />
            }
        </div>
    }
}

fn service_card(service: &Service, on_edit: &Callback<Service>, on_toggle: &Callback<Service>) -> Html {
    let edit = {
        let service = service.clone();
        on_edit.reform(move |_: MouseEvent| service.clone())
    };
    let toggle = {
        let service = service.clone();
        on_toggle.reform(move |_: MouseEvent| service.clone())
    };
    let toggle_label = if service.is_active { "Deactivate" } else { "Activate" };

    html! {
        <div key={service.service_id.clone()} class={classes!("card", service.card_class())}>
            <div class="card-top">
                <h3>{&service.name}</h3>
                <div class="card-actions">
                    <button class="btn btn-secondary" onclick={toggle} title={toggle_label}>
                        { if service.is_active { "On" } else { "Off" } }
                    </button>
                    <button class="btn btn-secondary" onclick={edit}>{"Edit"}</button>
                </div>
            </div>
            if let Some(description) = &service.description {
                <p class="muted service-description">{description}</p>
            }
            <div class="service-meta">
                <span class="muted">{format!("{} min", service.duration)}</span>
                <span class="price">{format_price(service.price)}</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ServiceModalProps {
    business_id: AttrValue,
    initial: ServiceForm,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[derive(Clone, Copy)]
enum Field {
    Name,
    Duration,
    Price,
}

#[function_component(ServiceModal)]
fn service_modal(props: &ServiceModalProps) -> Html {
    let form = {
        let initial = props.initial.clone();
        use_state(move || initial)
    };
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    let on_input = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            match field {
                Field::Name => next.name = input.value(),
                Field::Duration => next.duration = input.value(),
                Field::Price => next.price = input.value(),
            }
            form.set(next);
        })
    };
    let on_description = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.description = input.value();
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let saving = saving.clone();
        let error = error.clone();
        let business_id = props.business_id.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let input = match form.validate() {
                Ok(input) => input,
                Err(e) => {
                    error.set(Some(e.message().to_string()));
                    return;
                }
            };

            saving.set(true);
            error.set(None);
            let editing = form.editing.clone();
            let saving = saving.clone();
            let error = error.clone();
            let business_id = business_id.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                let result = match AgendaClient::new() {
                    Ok(client) => match &editing {
                        Some(id) => {
                            client
                                .update_service(&business_id, id, &ServiceUpdate::from(input))
                                .await
                        }
                        None => client.create_service(&business_id, &input).await.map(|_| ()),
                    },
                    Err(e) => Err(e),
                };
                saving.set(false);
                match result {
                    Ok(()) => on_saved.emit(()),
                    Err(e) => {
                        console::error!(format!("Failed to save service: {e}"));
                        error.set(Some(e.message().to_string()));
                    }
                }
            });
        })
    };

    let close = props.on_close.reform(|_: MouseEvent| ());
    let title = if form.is_editing() { "Edit Service" } else { "Add Service" };

    html! {
        <div class="modal-backdrop">
            <div class="card modal">
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button class="icon-button" onclick={close.clone()} aria-label="Close">{"✕"}</button>
                </div>
                <form onsubmit={on_submit}>
                    <label class="field-label">{"Name *"}</label>
                    <input
                        type="text"
                        placeholder="e.g., Haircut"
                        value={form.name.clone()}
                        oninput={on_input(Field::Name)}
                        required=true
                    />

                    <div class="field-row">
                        <div>
                            <label class="field-label">{"Duration (min) *"}</label>
                            <input
                                type="number"
                                min="5"
                                step="5"
                                value={form.duration.clone()}
                                oninput={on_input(Field::Duration)}
                                required=true
                            />
                        </div>
                        <div>
                            <label class="field-label">{"Price ($) *"}</label>
                            <input
                                type="number"
                                min="0"
                                step="0.01"
                                value={form.price.clone()}
                                oninput={on_input(Field::Price)}
                                required=true
                            />
                        </div>
                    </div>

                    <label class="field-label">{"Description"}</label>
                    <textarea
                        placeholder="Optional description..."
                        value={form.description.clone()}
                        oninput={on_description}
                        rows="3"
                    />

                    if let Some(message) = (*error).clone() {
                        <ErrorMessage {message} />
                    }

                    <div class="form-actions">
                        <button type="button" class="btn btn-secondary" onclick={close}>{"Cancel"}</button>
                        <button type="submit" class="btn btn-primary" disabled={*saving}>
                            { if *saving { "Saving..." } else if form.is_editing() { "Update" } else { "Create" } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
