use std::rc::Rc;

use gloo::console;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::status::{ErrorMessage, Status, report_failure};
use crate::hooks::use_clients::use_clients;
use crate::models::appointment::Appointment;
use crate::models::business::Business;
use crate::models::client::{Client, ClientForm, filter_clients};
use crate::services::api::AgendaClient;
use crate::utils::format::{format_long_date, format_time};

#[derive(Properties, PartialEq)]
pub struct ClientsProps {
    pub business: Rc<Business>,
}

#[function_component(Clients)]
pub fn clients(props: &ClientsProps) -> Html {
    let business_id = props.business.business_id.clone();
    let resource = use_clients(business_id.clone());
    let search = use_state(String::new);
    let modal = use_state(|| None::<ClientForm>);
    let history = use_state(|| None::<(String, Vec<Appointment>)>);

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };
    let open_new = {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| modal.set(Some(ClientForm::default())))
    };
    let open_edit = {
        let modal = modal.clone();
        Callback::from(move |client: Client| modal.set(Some(ClientForm::edit(&client))))
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
    let on_delete = {
        let business_id = business_id.clone();
        let reload = resource.reload.clone();
        Callback::from(move |client_id: String| {
            if !gloo::dialogs::confirm("Are you sure you want to delete this client?") {
                return;
            }
            let business_id = business_id.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let result = match AgendaClient::new() {
                    Ok(client) => client.delete_client(&business_id, &client_id).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => reload.emit(()),
                    Err(e) => report_failure("delete client", &e),
                }
            });
        })
    };
    let on_history = {
        let business_id = business_id.clone();
        let history = history.clone();
        Callback::from(move |client: Client| {
            let business_id = business_id.clone();
            let history = history.clone();
            spawn_local(async move {
                let result = match AgendaClient::new() {
                    Ok(api) => api.client_history(&business_id, &client.client_id).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(appointments) => history.set(Some((client.name, appointments))),
                    Err(e) => report_failure("load client history", &e),
                }
            });
        })
    };
    let close_history = {
        let history = history.clone();
        Callback::from(move |_: MouseEvent| history.set(None))
    };

    let list = match resource.state.data() {
        None => html! { <Status<Vec<Client>> state={resource.state.clone()} /> },
        Some(clients) => {
            let matches = filter_clients(clients, &search);
            if matches.is_empty() {
                html! {
                    <div class="card empty-state">
                        if search.is_empty() {
                            <h3>{"No clients yet"}</h3>
                            <p class="muted">{"Add your first client to get started"}</p>
                        } else {
                            <p class="muted">{"No clients match your search"}</p>
                        }
                    </div>
                }
            } else {
                html! {
                    <div class="client-grid">
                        { for matches.into_iter().map(|client| client_card(client, &open_edit, &on_delete, &on_history)) }
                    </div>
                }
            }
        }
    };

    html! {
        <div class="clients-page">
            <div class="page-header">
                <div>
                    <h1>{"Clients"}</h1>
                    <p class="muted">{"Manage your client database"}</p>
                </div>
                <button class="btn btn-primary" onclick={open_new}>{"+ Add Client"}</button>
            </div>

            <input
                class="search-input"
                type="text"
                placeholder="Search clients..."
                value={(*search).clone()}
                oninput={on_search}
            />

            { list }

            if let Some(form) = (*modal).clone() {
                <ClientModal business_id={business_id.clone()} initial={form} on_close={close_modal} {on_saved} />
            }

            if let Some((name, appointments)) = (*history).clone() {
                <div class="modal-backdrop">
                    <div class="card modal">
                        <div class="modal-header">
                            <h2>{format!("History: {name}")}</h2>
                            <button class="icon-button" onclick={close_history} aria-label="Close">{"✕"}</button>
                        </div>
                        if appointments.is_empty() {
                            <p class="empty">{"No appointments yet"}</p>
                        } else {
                            { for appointments.iter().map(|apt| html! {
                                <div key={apt.appointment_id.clone()} class="appointment-row">
                                    <span>{format_long_date(apt.start_time.with_timezone(&chrono::Local).date_naive())}</span>
                                    <span>{format_time(&apt.start_time)}</span>
                                    <span class={classes!("status-badge", apt.status.css_class())}>{apt.status.label()}</span>
                                </div>
                            }) }
                        }
                    </div>
                </div>
            }
        </div>
    }
}

fn client_card(
    client: &Client,
    on_edit: &Callback<Client>,
    on_delete: &Callback<String>,
    on_history: &Callback<Client>,
) -> Html {
    let edit = {
        let client = client.clone();
        on_edit.reform(move |_: MouseEvent| client.clone())
    };
    let delete = {
        let id = client.client_id.clone();
        on_delete.reform(move |_: MouseEvent| id.clone())
    };
    let history = {
        let client = client.clone();
        on_history.reform(move |_: MouseEvent| client.clone())
    };

    html! {
        <div key={client.client_id.clone()} class="card client-card">
            <div class="client-head">
                <span class="avatar">{client.initial()}</span>
                <div>
                    <h3>{&client.name}</h3>
                    if let Some(email) = &client.email {
                        <p class="muted">{email}</p>
                    }
                    if let Some(phone) = &client.phone {
                        <p class="muted">{phone}</p>
                    }
                </div>
            </div>
            if let Some(notes) = &client.notes {
                <p class="client-notes">{notes}</p>
            }
            <div class="card-actions">
                <button class="btn btn-secondary" onclick={history}>{"History"}</button>
                <button class="btn btn-secondary" onclick={edit}>{"Edit"}</button>
                <button class="btn btn-danger" onclick={delete}>{"Delete"}</button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ClientModalProps {
    business_id: AttrValue,
    initial: ClientForm,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[derive(Clone, Copy)]
enum Field {
    Name,
    Email,
    Phone,
}

#[function_component(ClientModal)]
fn client_modal(props: &ClientModalProps) -> Html {
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
                Field::Email => next.email = input.value(),
                Field::Phone => next.phone = input.value(),
            }
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
                        Some(id) => client.update_client(&business_id, id, &input).await,
                        None => client.create_client(&business_id, &input).await.map(|_| ()),
                    },
                    Err(e) => Err(e),
                };
                saving.set(false);
                match result {
                    Ok(()) => on_saved.emit(()),
                    Err(e) => {
                        console::error!(format!("Failed to save client: {e}"));
                        error.set(Some(e.message().to_string()));
                    }
                }
            });
        })
    };

    let close = props.on_close.reform(|_: MouseEvent| ());
    let title = if form.is_editing() { "Edit Client" } else { "Add Client" };

    html! {
        <div class="modal-backdrop">
            <div class="card modal">
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button class="icon-button" onclick={close.clone()} aria-label="Close">{"✕"}</button>
                </div>
                <form onsubmit={on_submit}>
                    <label class="field-label">{"Name *"}</label>
                    <input type="text" value={form.name.clone()} oninput={on_input(Field::Name)} required=true />

                    <label class="field-label">{"Email"}</label>
                    <input type="email" value={form.email.clone()} oninput={on_input(Field::Email)} />

                    <label class="field-label">{"Phone"}</label>
                    <input type="tel" value={form.phone.clone()} oninput={on_input(Field::Phone)} />

                    <label class="field-label">{"Notes"}</label>
                    <textarea value={form.notes.clone()} oninput={on_notes} rows="3" />

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
