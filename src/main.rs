use std::rc::Rc;

use yew::prelude::*;

use agenda_web::components::auth_callback::AuthCallback;
use agenda_web::components::booking::PublicBooking;
use agenda_web::components::calendar::Calendar;
use agenda_web::components::clients::Clients;
use agenda_web::components::dashboard::Dashboard;
use agenda_web::components::layout::AgendaLayout;
use agenda_web::components::link::Link;
use agenda_web::components::login::Login;
use agenda_web::components::onboarding::Onboarding;
use agenda_web::components::services::Services;
use agenda_web::components::settings::Settings;
use agenda_web::components::status::LoadingScreen;
use agenda_web::hooks::use_business::{BusinessHandle, use_business};
use agenda_web::hooks::use_navigator::{RouterProvider, current_fragment, use_navigator};
use agenda_web::hooks::use_session::{SessionProvider, use_session};
use agenda_web::models::business::Business;
use agenda_web::router::{GuardOutcome, Route, guard};
use agenda_web::utils::auth_fragment::session_id_from_fragment;

#[function_component(App)]
fn app() -> Html {
    html! {
        <SessionProvider>
            <RouterProvider>
                <Shell />
            </RouterProvider>
            <style>
                {include_str!("style.css")}
            </style>
        </SessionProvider>
    }
}

/// Resolves the route against the session and business, then renders the page.
#[function_component(Shell)]
fn shell() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let business = use_business(session.user.clone());
    // Fragment handed back by the identity provider, consumed once.
    let pending_auth = use_state(|| {
        let fragment = current_fragment();
        session_id_from_fragment(&fragment).is_some().then_some(fragment)
    });

    let outcome = guard(&navigator.route, session.status(), business.status());

    {
        let replace = navigator.replace.clone();
        let blocked = pending_auth.is_some();
        use_effect_with((outcome.clone(), blocked), move |(outcome, blocked)| {
            if let (GuardOutcome::Redirect(target), false) = (outcome, blocked) {
                replace.emit(target.clone());
            }
        });
    }

    if let Some(fragment) = (*pending_auth).clone() {
        let on_finish = {
            let pending_auth = pending_auth.clone();
            Callback::from(move |()| pending_auth.set(None))
        };
        return html! { <AuthCallback {fragment} {on_finish} /> };
    }

    match outcome {
        GuardOutcome::Loading | GuardOutcome::Redirect(_) => html! { <LoadingScreen /> },
        GuardOutcome::Onboarding => html! {
            <Onboarding on_complete={business.set_business.clone()} />
        },
        GuardOutcome::Render => page(&navigator.route, &business),
    }
}

fn page(route: &Route, handle: &BusinessHandle) -> Html {
    match route {
        Route::Login => html! { <Login /> },
        Route::PublicBooking { slug } => html! { <PublicBooking slug={slug.clone()} /> },
        Route::NotFound => not_found(),
        protected => match &handle.business {
            Some(business) => html! {
                <AgendaLayout business={business.clone()}>
                    { protected_page(protected, business, handle) }
                </AgendaLayout>
            },
            None => html! { <LoadingScreen /> },
        },
    }
}

fn protected_page(route: &Route, business: &Rc<Business>, handle: &BusinessHandle) -> Html {
    let business = business.clone();
    match route {
        Route::Calendar => html! { <Calendar {business} /> },
        Route::Clients => html! { <Clients {business} /> },
        Route::Services => html! { <Services {business} /> },
        Route::Settings => html! {
            <Settings {business} on_update={handle.set_business.clone()} />
        },
        _ => html! { <Dashboard {business} /> },
    }
}

fn not_found() -> Html {
    html! {
        <div class="public-page centered">
            <div class="card not-found">
                <h2>{"Page not found"}</h2>
                <p class="muted">{"The page you are looking for does not exist."}</p>
                <Link to={Route::Dashboard} class={classes!("btn", "btn-secondary")}>{"Go to Dashboard"}</Link>
            </div>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
