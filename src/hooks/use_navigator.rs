use gloo::events::EventListener;
use yew::prelude::*;

use crate::router::Route;

/// Current route plus the callbacks that change it.
#[derive(Clone, PartialEq)]
pub struct Navigator {
    pub route: Route,
    /// Pushes a history entry
    pub push: Callback<Route>,
    /// Replaces the current history entry
    pub replace: Callback<Route>,
}

#[derive(Properties, PartialEq)]
pub struct RouterProviderProps {
    #[prop_or_default]
    pub children: Html,
}

/// Keeps the route in sync with the address bar, including back/forward.
#[function_component(RouterProvider)]
pub fn router_provider(props: &RouterProviderProps) -> Html {
    let route = use_state(current_route);

    // Effect: follow browser back/forward
    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let listener = EventListener::new(&gloo::utils::window(), "popstate", move |_event| {
                route.set(current_route());
            });
            move || drop(listener)
        });
    }

    let push = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            write_history(&next, false);
            route.set(next);
        })
    };

    let replace = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            write_history(&next, true);
            route.set(next);
        })
    };

    let navigator = Navigator {
        route: (*route).clone(),
        push,
        replace,
    };

    html! {
        <ContextProvider<Navigator> context={navigator}>
            { props.children.clone() }
        </ContextProvider<Navigator>>
    }
}

/// Navigator from the nearest [`RouterProvider`]. Outside of one, navigation
/// falls back to full page loads.
#[hook]
pub fn use_navigator() -> Navigator {
    use_context::<Navigator>().unwrap_or_else(|| {
        let load = Callback::from(|next: Route| {
            if let Err(e) = gloo::utils::window().location().set_href(&next.path()) {
                gloo::console::error!(format!("Navigation failed: {e:?}"));
            }
        });
        Navigator {
            route: current_route(),
            push: load.clone(),
            replace: load,
        }
    })
}

fn current_route() -> Route {
    let path = gloo::utils::window()
        .location()
        .pathname()
        .unwrap_or_default();
    Route::from_path(&path)
}

fn write_history(route: &Route, replace: bool) {
    let history = match gloo::utils::window().history() {
        Ok(history) => history,
        Err(e) => {
            gloo::console::warn!(format!("History unavailable: {e:?}"));
            return;
        }
    };

    let path = route.path();
    let result = if replace {
        history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path))
    } else {
        history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path))
    };
    if let Err(e) = result {
        gloo::console::warn!(format!("Failed to update history: {e:?}"));
    }
}

/// Drops the `#session_id=...` fragment once it has been consumed.
pub fn clear_fragment() {
    let window = gloo::utils::window();
    let path = window.location().pathname().unwrap_or_default();
    if let Ok(history) = window.history()
        && let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path))
    {
        gloo::console::warn!(format!("Failed to clear URL fragment: {e:?}"));
    }
}

/// Raw `location.hash` without the leading `#`.
pub fn current_fragment() -> String {
    gloo::utils::window()
        .location()
        .hash()
        .unwrap_or_default()
        .trim_start_matches('#')
        .to_string()
}
