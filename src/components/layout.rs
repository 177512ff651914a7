use std::rc::Rc;

use yew::prelude::*;

use super::link::Link;
use crate::hooks::use_navigator::use_navigator;
use crate::hooks::use_session::use_session;
use crate::models::business::Business;
use crate::router::Route;

#[derive(Properties, PartialEq)]
pub struct AgendaLayoutProps {
    pub business: Rc<Business>,
    #[prop_or_default]
    pub children: Html,
}

/// Sidebar navigation, top bar with the user menu, and the page body.
#[function_component(AgendaLayout)]
pub fn agenda_layout(props: &AgendaLayoutProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let sidebar_open = use_state(|| false);
    let menu_open = use_state(|| false);

    let open_sidebar = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |_| sidebar_open.set(true))
    };
    let close_sidebar = {
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |()| sidebar_open.set(false))
    };
    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_| menu_open.set(!*menu_open))
    };
    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_| menu_open.set(false))
    };
    let sign_out = {
        let logout = session.logout.clone();
        let replace = navigator.replace.clone();
        Callback::from(move |_| {
            logout.emit(());
            replace.emit(Route::Login);
        })
    };

    let (user_name, user_email, initial) = session.user.as_ref().map_or_else(
        || ("User".to_string(), String::new(), "U".to_string()),
        |u| (u.name.clone(), u.email.clone(), u.initial()),
    );

    let public_route = Route::PublicBooking {
        slug: props.business.slug.clone(),
    };

    html! {
        <div class="agenda-layout">
            if *sidebar_open {
                <div class="sidebar-backdrop" onclick={close_sidebar.reform(|_| ())}></div>
            }

            <aside class={classes!("sidebar", sidebar_open.then_some("open"))}>
                <div class="sidebar-brand">
                    <span class="brand-mark">{"C"}</span>
                    <span class="brand-name">{"Corella Agenda"}</span>
                </div>

                <div class="sidebar-business">
                    <div class="sidebar-label">{"Business"}</div>
                    <div class="sidebar-business-name">{&props.business.name}</div>
                </div>

                <nav class="sidebar-nav">
                    { for Route::navigation().into_iter().map(|(route, label)| {
                        let active = navigator.route == route;
                        html! {
                            <Link
                                to={route}
                                class={classes!("nav-item", active.then_some("active"))}
                                onclick={close_sidebar.clone()}
                            >
                                {label}
                            </Link>
                        }
                    }) }
                </nav>

                <div class="sidebar-footer">
                    <a class="public-link" href={public_route.path()} target="_blank">
                        {"View Public Booking Page"}
                    </a>
                </div>
            </aside>

            <div class="agenda-main">
                <header class="top-bar">
                    <button class="menu-button" onclick={open_sidebar} aria-label="Open menu">{"☰"}</button>
                    <div class="spacer"></div>
                    <div class="user-menu">
                        <button class="user-button" onclick={toggle_menu}>
                            <span class="avatar">{initial}</span>
                            <span class="user-name">{&user_name}</span>
                        </button>
                        if *menu_open {
                            <div class="menu-backdrop" onclick={close_menu}></div>
                            <div class="user-dropdown">
                                <div class="user-details">
                                    <div class="user-name">{&user_name}</div>
                                    <div class="user-email">{user_email}</div>
                                </div>
                                <button class="sign-out" onclick={sign_out}>{"Sign out"}</button>
                            </div>
                        }
                    </div>
                </header>

                <main class="page-content">
                    { props.children.clone() }
                </main>
            </div>
        </div>
    }
}
