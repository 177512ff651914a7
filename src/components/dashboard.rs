use std::rc::Rc;

use chrono::Local;
use yew::prelude::*;

use super::link::Link;
use super::status::Status;
use crate::config::Config;
use crate::hooks::use_clients::use_clients;
use crate::hooks::use_dashboard::use_dashboard;
use crate::hooks::use_services::use_services;
use crate::models::appointment::Appointment;
use crate::models::business::Business;
use crate::models::client::{Client, client_name};
use crate::models::dashboard::DashboardSummary;
use crate::models::service::Service;
use crate::router::Route;
use crate::utils::format::{format_short_date_in, format_time};

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub business: Rc<Business>,
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let summary = use_dashboard(props.business.business_id.clone());
    let clients = use_clients(props.business.business_id.clone());
    let services = use_services(props.business.business_id.clone());

    let Some(data) = summary.state.data() else {
        return html! { <Status<DashboardSummary> state={summary.state.clone()} /> };
    };

    let clients: Rc<Vec<Client>> = clients.state.data().cloned().unwrap_or_default();
    let services: Rc<Vec<Service>> = services.state.data().cloned().unwrap_or_default();
    let names = Names {
        clients: &clients,
        services: &services,
    };

    let stats = &data.stats;
    let cards = [
        ("Today", stats.today),
        ("This Week", stats.this_week),
        ("This Month", stats.this_month),
        ("Clients", stats.total_clients),
    ];

    html! {
        <div class="dashboard">
            <div class="page-header">
                <h1>{"Dashboard"}</h1>
                <p class="muted">{"Welcome back! Here is what is happening today."}</p>
            </div>

            <div class="stats-grid">
                { for cards.iter().map(|(label, value)| html! {
                    <div class="card stat-card">
                        <p class="stat-value">{*value}</p>
                        <p class="muted">{*label}</p>
                    </div>
                }) }
            </div>

            <div class="dashboard-lists">
                <section class="card">
                    <h2>{"Today's Appointments"}</h2>
                    if data.today_appointments.is_empty() {
                        <p class="empty">{"No appointments today"}</p>
                    } else {
                        { for data.today_appointments.iter().map(|apt| today_row(apt, &names)) }
                    }
                </section>

                <section class="card">
                    <div class="section-header">
                        <h2>{"Upcoming"}</h2>
                        <Link to={Route::Calendar} class={classes!("text-link")}>{"View all"}</Link>
                    </div>
                    if data.upcoming_appointments.is_empty() {
                        <p class="empty">{"No upcoming appointments"}</p>
                    } else {
                        { for data.upcoming(Config::DASHBOARD_UPCOMING_LIMIT).iter().map(|apt| upcoming_row(apt, &names)) }
                    }
                </section>
            </div>
        </div>
    }
}

struct Names<'a> {
    clients: &'a [Client],
    services: &'a [Service],
}

impl Names<'_> {
    fn client(&self, id: &str) -> String {
        client_name(self.clients, id, "Unknown").to_string()
    }

    fn service(&self, id: &str) -> String {
        self.services
            .iter()
            .find(|s| s.service_id == id)
            .map_or_else(|| "Service".to_string(), |s| s.name.clone())
    }
}

fn today_row(apt: &Appointment, names: &Names<'_>) -> Html {
    html! {
        <div key={apt.appointment_id.clone()} class={classes!("appointment-row", apt.status.css_class())}>
            <div>
                <p class="strong">{names.client(&apt.client_id)}</p>
                <p class="muted">{names.service(&apt.service_id)}</p>
            </div>
            <div class="align-right">
                <p class="strong">{format_time(&apt.start_time)}</p>
                <span class={classes!("status-badge", apt.status.css_class())}>{apt.status.label()}</span>
            </div>
        </div>
    }
}

fn upcoming_row(apt: &Appointment, names: &Names<'_>) -> Html {
    html! {
        <div key={apt.appointment_id.clone()} class="appointment-row">
            <div>
                <p class="strong">{names.client(&apt.client_id)}</p>
                <p class="muted">{names.service(&apt.service_id)}</p>
            </div>
            <div class="align-right">
                <p class="strong">{format_short_date_in(&apt.start_time, &Local)}</p>
                <p class="muted">{format_time(&apt.start_time)}</p>
            </div>
        </div>
    }
}
