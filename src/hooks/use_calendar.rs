use chrono::Local;
use gloo::console;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::calendar::{CalendarAction, CalendarData, CalendarLoad, CalendarState};
use crate::models::error::AppError;
use crate::services::api::AgendaClient;

/// Calendar week state. Every navigation or refresh starts a new fetch cycle
/// for the week's appointments and the business's clients, services and
/// staff; results of a cycle that has been superseded are ignored.
#[hook]
pub fn use_calendar(business_id: String) -> UseReducerHandle<CalendarState> {
    let state = use_reducer(|| CalendarState::new(Local::now().date_naive()));

    {
        let dispatcher = state.dispatcher();
        let load = state.current_load();
        use_effect_with((business_id, load), move |(business_id, load)| {
            let business_id = business_id.clone();
            let load = *load;
            spawn_local(async move {
                let data = fetch_week(&business_id, load).await;
                dispatcher.dispatch(CalendarAction::Loaded { load, data });
            });
            || ()
        });
    }

    state
}

async fn fetch_week(business_id: &str, load: CalendarLoad) -> CalendarData {
    let client = match AgendaClient::new() {
        Ok(client) => client,
        Err(e) => return failed(&e),
    };

    let (start, end) = load.week.bounds(&Local);
    let (appointments, clients, services, staff) = futures::join!(
        client.list_appointments(business_id, start, end),
        client.list_clients(business_id),
        client.list_services(business_id),
        client.list_staff(business_id),
    );

    CalendarData {
        appointments: logged("appointments", appointments),
        clients: logged("clients", clients),
        services: logged("services", services),
        staff: logged("staff", staff),
    }
}

fn logged<T>(what: &str, result: Result<T, AppError>) -> Result<T, String> {
    result.map_err(|e| {
        console::error!(format!("Failed to fetch {what}: {e}"));
        e.message().to_string()
    })
}

fn failed(error: &AppError) -> CalendarData {
    console::error!(format!("Calendar unavailable: {error}"));
    let message = error.message().to_string();
    CalendarData {
        appointments: Err(message.clone()),
        clients: Err(message.clone()),
        services: Err(message.clone()),
        staff: Err(message),
    }
}
