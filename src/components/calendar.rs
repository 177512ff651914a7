use std::rc::Rc;

use chrono::{Local, NaiveDate};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::appointment_modal::AppointmentModal;
use super::status::{ErrorMessage, Spinner, report_failure};
use crate::hooks::use_calendar::use_calendar;
use crate::models::appointment::{Appointment, AppointmentForm, AppointmentStatus};
use crate::models::business::Business;
use crate::models::calendar::{CalendarAction, GRID_HOURS};
use crate::models::staff::active;
use crate::services::api::AgendaClient;
use crate::utils::format::{format_hour, format_month};

#[derive(Properties, PartialEq)]
pub struct CalendarProps {
    pub business: Rc<Business>,
}

#[function_component(Calendar)]
pub fn calendar(props: &CalendarProps) -> Html {
    let business_id = props.business.business_id.clone();
    let state = use_calendar(business_id.clone());
    let modal = use_state(|| None::<AppointmentForm>);

    let today = Local::now().date_naive();
    let days = state.view().days();
    let grid = state.grid(&Local);
    let default_staff = active(&state.staff).first().map(|s| s.staff_id.clone());

    let navigate = |direction: i32| {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(CalendarAction::Navigate(direction)))
    };
    let go_today = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            state.dispatch(CalendarAction::Today(Local::now().date_naive()));
        })
    };
    let open_blank = {
        let modal = modal.clone();
        let default_staff = default_staff.clone();
        Callback::from(move |_: MouseEvent| {
            modal.set(Some(AppointmentForm {
                staff_id: default_staff.clone().unwrap_or_default(),
                ..AppointmentForm::default()
            }));
        })
    };
    let open_at = {
        let modal = modal.clone();
        Callback::from(move |(date, hour): (NaiveDate, u32)| {
            modal.set(Some(AppointmentForm::at(date, hour, default_staff.as_deref())));
        })
    };
    let close_modal = {
        let modal = modal.clone();
        Callback::from(move |()| modal.set(None))
    };
    let on_created = {
        let modal = modal.clone();
        let state = state.clone();
        Callback::from(move |()| {
            modal.set(None);
            state.dispatch(CalendarAction::Refresh);
        })
    };
    let on_status = {
        let state = state.clone();
        let business_id = business_id.clone();
        Callback::from(move |(appointment, next): (Appointment, AppointmentStatus)| {
            let update = match appointment.status_update(next) {
                Ok(update) => update,
                Err(e) => {
                    gloo::dialogs::alert(e.message());
                    return;
                }
            };
            let state = state.clone();
            let business_id = business_id.clone();
            spawn_local(async move {
                let result = match AgendaClient::new() {
                    Ok(client) => {
                        client
                            .update_appointment(&business_id, &appointment.appointment_id, &update)
                            .await
                    }
                    Err(e) => Err(e),
                };
                if let Err(e) = result {
                    report_failure("update appointment", &e);
                }
                state.dispatch(CalendarAction::Refresh);
            });
        })
    };

    html! {
        <div class="calendar-page">
            <div class="page-header calendar-header">
                <div class="calendar-nav">
                    <h1>{"Calendar"}</h1>
                    <button class="icon-button" onclick={navigate(-1)} aria-label="Previous week">{"‹"}</button>
                    <button class="btn btn-secondary" onclick={go_today}>{"Today"}</button>
                    <button class="icon-button" onclick={navigate(1)} aria-label="Next week">{"›"}</button>
                    <span class="muted">{format_month(state.view().start())}</span>
                </div>
                <button class="btn btn-primary" onclick={open_blank}>{"+ New Appointment"}</button>
            </div>

            { for state.errors.iter().map(|message| html! { <ErrorMessage message={message.clone()} /> }) }

            <div class="card calendar-grid">
                <div class="calendar-row calendar-head">
                    <div class="time-cell">{"Time"}</div>
                    { for days.iter().map(|day| html! {
                        <div class={classes!("day-head", (*day == today).then_some("today"))}>
                            <div class="muted">{day.format("%a").to_string()}</div>
                            <div class="day-number">{day.format("%-d").to_string()}</div>
                        </div>
                    }) }
                </div>

                if state.is_loading() {
                    <Spinner />
                } else {
                    { for GRID_HOURS.map(|hour| html! {
                        <div class="calendar-row" key={hour}>
                            <div class="time-cell">{format_hour(hour)}</div>
                            { for days.iter().map(|day| {
                                let day = *day;
                                let cell = grid.cell(day, hour);
                                let onclick = {
                                    let open_at = open_at.clone();
                                    let empty = cell.is_empty();
                                    Callback::from(move |_: MouseEvent| {
                                        if empty {
                                            open_at.emit((day, hour));
                                        }
                                    })
                                };
                                html! {
                                    <div class={classes!("slot-cell", (day == today).then_some("today"))} {onclick}>
                                        { for cell.iter().map(|apt| appointment_chip(
                                            apt,
                                            state.client_name(&apt.client_id),
                                            state.service_name(&apt.service_id),
                                            &on_status,
                                        )) }
                                    </div>
                                }
                            }) }
                        </div>
                    }) }
                }
            </div>

            if let Some(initial) = (*modal).clone() {
                <AppointmentModal
                    business_id={business_id.clone()}
                    {initial}
                    clients={state.clients.clone()}
                    services={state.services.clone()}
                    staff={state.staff.clone()}
                    on_close={close_modal}
                    {on_created}
                />
            }
        </div>
    }
}

fn appointment_chip(
    apt: &Appointment,
    client: &str,
    service: &str,
    on_status: &Callback<(Appointment, AppointmentStatus)>,
) -> Html {
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());
    let action = |next: AppointmentStatus| {
        let on_status = on_status.clone();
        let apt = apt.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_status.emit((apt.clone(), next));
        })
    };

    html! {
        <div key={apt.appointment_id.clone()} class={classes!("appointment-chip", apt.status.css_class())} onclick={stop}>
            <div class="strong">{client}</div>
            <div class="muted">{service}</div>
            if !apt.status.is_terminal() {
                <div class="chip-actions">
                    <button class="chip-done" onclick={action(AppointmentStatus::Completed)}>{"Done"}</button>
                    <button class="chip-cancel" onclick={action(AppointmentStatus::Canceled)}>{"Cancel"}</button>
                </div>
            }
        </div>
    }
}
