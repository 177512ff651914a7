use std::rc::Rc;

use chrono::Local;
use gloo::console;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::status::{ErrorMessage, LoadingScreen, Spinner};
use crate::hooks::use_public_business::use_public_business;
use crate::hooks::use_resource::DataState;
use crate::models::business::Business;
use crate::models::slot::PublicBusiness;
use crate::models::wizard::{
    BookingChoice, BookingWizard, ClientDetails, DateTimeSelection, SlotState, Submission,
    WizardAction, WizardStep,
};
use crate::services::api::AgendaClient;
use crate::utils::format::{format_month, format_price};

type Dispatcher = Callback<WizardAction>;

const WEEKDAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Properties, PartialEq)]
pub struct PublicBookingProps {
    pub slug: AttrValue,
}

/// Public booking page behind `/agenda/{slug}`. No sign-in involved.
#[function_component(PublicBooking)]
pub fn public_booking(props: &PublicBookingProps) -> Html {
    let resource = use_public_business(props.slug.to_string());

    match &resource.state {
        DataState::Loading => html! { <LoadingScreen /> },
        DataState::Error(message) => html! {
            <div class="public-page centered">
                <div class="card not-found">
                    <h2>{message}</h2>
                    <p class="muted">{"This business may not exist or has been removed."}</p>
                    <a class="btn btn-secondary" href="/">{"Go to Homepage"}</a>
                </div>
            </div>
        },
        DataState::Loaded(public) => html! {
            <BookingFlow slug={props.slug.clone()} public={public.clone()} />
        },
    }
}

#[derive(Properties, PartialEq)]
struct BookingFlowProps {
    slug: AttrValue,
    public: Rc<PublicBusiness>,
}

#[function_component(BookingFlow)]
fn booking_flow(props: &BookingFlowProps) -> Html {
    let today = Local::now().date_naive();
    let wizard = {
        let public = props.public.clone();
        use_reducer(move || BookingWizard::new(&public.services, &public.staff, today))
    };

    // Availability lookups; the wizard drops answers to superseded requests.
    {
        let dispatcher = wizard.dispatcher();
        let slug = props.slug.clone();
        use_effect_with(wizard.slot_request_in_flight().cloned(), move |request| {
            if let Some(request) = request.clone() {
                spawn_local(async move {
                    let result = match AgendaClient::new() {
                        Ok(client) => client.available_slots(&slug, &request.query).await,
                        Err(e) => Err(e),
                    };
                    if let Err(e) = &result {
                        console::error!(format!("Failed to fetch available slots: {e}"));
                    }
                    dispatcher.dispatch(WizardAction::SlotsLoaded { request, result });
                });
            }
        });
    }

    {
        let dispatcher = wizard.dispatcher();
        let slug = props.slug.clone();
        let in_flight = wizard
            .booking_in_flight()
            .map(|(attempt, request)| (attempt, request.clone()));
        use_effect_with(in_flight, move |in_flight| {
            if let Some((attempt, request)) = in_flight.clone() {
                spawn_local(async move {
                    let result = match AgendaClient::new() {
                        Ok(client) => client.book(&slug, &request).await,
                        Err(e) => Err(e),
                    };
                    if let Err(e) = &result {
                        console::error!(format!("Booking failed: {e}"));
                    }
                    dispatcher.dispatch(WizardAction::BookingFinished { attempt, result });
                });
            }
        });
    }

    let dispatcher = wizard.dispatcher().to_callback();
    let step_number = wizard.step_number();

    let body = match wizard.step() {
        WizardStep::SelectService { .. } => service_step(&wizard, &dispatcher),
        WizardStep::SelectDateTime { service, selection } => html! {
            <div class="card">
                { step_header("Select Date", Some(&dispatcher)) }
                <p class="muted">{format!("{} · {} min · {}", service.name, service.duration, format_price(service.price))}</p>
                { datetime_step(&wizard, selection, &dispatcher) }
            </div>
        },
        WizardStep::EnterDetails { choice, .. } => details_step(choice, wizard.details(), &dispatcher),
        WizardStep::Confirm { choice, submission, .. } => {
            confirm_step(choice, submission, &dispatcher)
        }
        WizardStep::Success { choice, confirmation } => {
            let book_another = dispatcher.reform(|_: MouseEvent| WizardAction::Reset);
            html! {
                <div class="card success">
                    <h2>{"Booking Confirmed!"}</h2>
                    <p class="muted">
                        {"Your appointment has been scheduled. We sent a confirmation to your email."}
                    </p>
                    <p class="muted">{"Appointment ID"}</p>
                    <code>{&confirmation.appointment_id}</code>
                    <p class="strong">{choice.when()}</p>
                    <button class="btn btn-primary btn-block" onclick={book_another}>
                        {"Book Another Appointment"}
                    </button>
                </div>
            }
        }
    };

    html! {
        <div class="public-page">
            { business_header(&props.public.business) }

            if step_number < 5 {
                <div class="progress">
                    { for (1..=4).map(|n| html! {
                        <div class={classes!("progress-bar", (n <= step_number).then_some("done"))}></div>
                    }) }
                </div>
            }

            if let Some(message) = wizard.error() {
                <ErrorMessage message={message.to_string()} />
            }

            { body }

            <p class="powered-by muted">{"Powered by "}<a href="/">{"Corella"}</a></p>
        </div>
    }
}

fn business_header(business: &Business) -> Html {
    let initial = business
        .name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    html! {
        <div class="public-header">
            if let Some(logo) = &business.logo_url {
                <img class="business-logo" src={logo.clone()} alt={business.name.clone()} />
            } else {
                <span class="avatar">{initial}</span>
            }
            <div>
                <h1>{&business.name}</h1>
                <p class="muted">{"Online Booking"}</p>
            </div>
        </div>
    }
}

fn step_header(title: &str, back: Option<&Dispatcher>) -> Html {
    html! {
        <div class="step-header">
            if let Some(dispatcher) = back {
                <button
                    class="icon-button"
                    onclick={dispatcher.reform(|_: MouseEvent| WizardAction::Back)}
                    aria-label="Back"
                >
                    {"←"}
                </button>
            }
            <h2>{title}</h2>
        </div>
    }
}

fn service_step(wizard: &BookingWizard, dispatcher: &Dispatcher) -> Html {
    html! {
        <div class="card">
            { step_header("Select a Service", None) }
            if wizard.services().is_empty() {
                <p class="empty">{"No services available"}</p>
            } else {
                <div class="service-options">
                    { for wizard.services().iter().map(|service| {
                        let id = service.service_id.clone();
                        let onclick = dispatcher.reform(move |_: MouseEvent| WizardAction::SelectService(id.clone()));
                        html! {
                            <button key={service.service_id.clone()} class="service-option" {onclick}>
                                <div>
                                    <p class="strong">{&service.name}</p>
                                    if let Some(description) = &service.description {
                                        <p class="muted">{description}</p>
                                    }
                                </div>
                                <div class="align-right">
                                    <p class="price">{format_price(service.price)}</p>
                                    <p class="muted">{format!("{} min", service.duration)}</p>
                                </div>
                            </button>
                        }
                    }) }
                </div>
            }
        </div>
    }
}

fn datetime_step(wizard: &BookingWizard, selection: &DateTimeSelection, dispatcher: &Dispatcher) -> Html {
    let today = Local::now().date_naive();
    let on_staff = dispatcher.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        WizardAction::SelectStaff(select.value())
    });
    let selected_staff = selection.staff.as_ref().map(|s| s.staff_id.as_str());

    html! {
        <>
            if wizard.offers_staff_choice() {
                <label class="field-label">{"Select Staff"}</label>
                <select onchange={on_staff}>
                    <option value="" selected={selected_staff.is_none()} disabled=true>{"Choose a staff member"}</option>
                    { for wizard.staff().iter().map(|s| html! {
                        <option value={s.staff_id.clone()} selected={selected_staff == Some(s.staff_id.as_str())}>
                            {&s.name}
                        </option>
                    }) }
                </select>
            }

            <div class="month-header">
                <button class="icon-button" onclick={dispatcher.reform(|_: MouseEvent| WizardAction::PreviousMonth)} aria-label="Previous month">{"‹"}</button>
                <span class="strong">{format_month(wizard.month())}</span>
                <button class="icon-button" onclick={dispatcher.reform(|_: MouseEvent| WizardAction::NextMonth)} aria-label="Next month">{"›"}</button>
            </div>

            <div class="month-grid">
                { for WEEKDAY_HEADERS.iter().map(|day| html! { <div class="weekday muted">{*day}</div> }) }
                { for wizard.month_cells(today).into_iter().map(|cell| match cell.date {
                    None => html! { <div class="day-cell blank"></div> },
                    Some(date) => {
                        let onclick = dispatcher.reform(move |_: MouseEvent| WizardAction::SelectDate { date, today });
                        html! {
                            <button
                                class={classes!("day-cell", cell.selected.then_some("selected"))}
                                disabled={!cell.selectable}
                                {onclick}
                            >
                                {date.format("%-d").to_string()}
                            </button>
                        }
                    }
                }) }
            </div>

            if selection.date.is_some() {
                <label class="field-label">{"Available Times"}</label>
                { slot_list(&selection.slots, dispatcher) }
            }
        </>
    }
}

fn slot_list(slots: &SlotState, dispatcher: &Dispatcher) -> Html {
    match slots {
        SlotState::Idle => html! { <p class="muted">{"Choose a staff member to see available times"}</p> },
        SlotState::Loading(_) => html! { <Spinner /> },
        SlotState::Failed { message, .. } => html! { <ErrorMessage message={message.clone()} /> },
        SlotState::Loaded { slots, .. } if slots.is_empty() => html! {
            <p class="empty">{"No available times for this date"}</p>
        },
        SlotState::Loaded { slots, .. } => html! {
            <div class="slot-grid">
                { for slots.iter().map(|slot| {
                    let time = slot.time.clone();
                    let onclick = dispatcher.reform(move |_: MouseEvent| WizardAction::SelectSlot(time.clone()));
                    html! { <button key={slot.time.clone()} class="slot-button" {onclick}>{&slot.time}</button> }
                }) }
            </div>
        },
    }
}

#[derive(Clone, Copy)]
enum Field {
    Name,
    Email,
    Phone,
}

fn details_step(choice: &BookingChoice, details: &ClientDetails, dispatcher: &Dispatcher) -> Html {
    let on_input = |field: Field| {
        let details = details.clone();
        dispatcher.reform(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = details.clone();
            match field {
                Field::Name => next.name = input.value(),
                Field::Email => next.email = input.value(),
                Field::Phone => next.phone = input.value(),
            }
            WizardAction::UpdateDetails(next)
        })
    };
    let on_submit = dispatcher.reform(|e: SubmitEvent| {
        e.prevent_default();
        WizardAction::SubmitDetails
    });

    html! {
        <div class="card">
            { step_header("Your Details", Some(dispatcher)) }
            <p class="muted">{format!("{} · {}", choice.service.name, choice.when())}</p>
            <form onsubmit={on_submit}>
                <label class="field-label">{"Name *"}</label>
                <input type="text" value={details.name.clone()} oninput={on_input(Field::Name)} required=true />

                <label class="field-label">{"Email *"}</label>
                <input type="email" value={details.email.clone()} oninput={on_input(Field::Email)} required=true />

                <label class="field-label">{"Phone (optional)"}</label>
                <input type="tel" value={details.phone.clone()} oninput={on_input(Field::Phone)} />

                <button type="submit" class="btn btn-primary btn-block">{"Review Booking"}</button>
            </form>
        </div>
    }
}

fn confirm_step(choice: &BookingChoice, submission: &Submission, dispatcher: &Dispatcher) -> Html {
    let booking = matches!(submission, Submission::InFlight { .. });
    let on_confirm = dispatcher.reform(|_: MouseEvent| WizardAction::Confirm);

    html! {
        <div class="card">
            { step_header("Confirm Booking", (!booking).then_some(dispatcher)) }
            <div class="summary">
                <p class="muted">{"Service"}</p>
                <p class="strong">{&choice.service.name}</p>
                <p class="muted">{"Date & Time"}</p>
                <p class="strong">{choice.when()}</p>
                <p class="muted">{"With"}</p>
                <p class="strong">{&choice.staff.name}</p>
                <div class="summary-total">
                    <span class="muted">{"Total"}</span>
                    <span class="price">{choice.total()}</span>
                </div>
            </div>

            if let Submission::Failed(message) = submission {
                <ErrorMessage message={message.clone()} />
            }

            <button class="btn btn-primary btn-block" onclick={on_confirm} disabled={booking}>
                { if booking { "Booking..." } else { "Confirm Booking" } }
            </button>
        </div>
    }
}
