use gloo::console;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::status::LoadingScreen;
use crate::hooks::use_navigator::{clear_fragment, use_navigator};
use crate::hooks::use_session::use_session;
use crate::router::Route;
use crate::services::api::AgendaClient;
use crate::utils::auth_fragment::session_id_from_fragment;

#[derive(Properties, PartialEq)]
pub struct AuthCallbackProps {
    /// URL fragment without the leading `#`
    pub fragment: AttrValue,
    /// Fired once the user has been sent on, signed in or not
    #[prop_or_default]
    pub on_finish: Callback<()>,
}

/// Exchanges the `session_id` handed back by the identity provider for a
/// session cookie, exactly once, then lands on the dashboard. Any failure
/// goes back to the login screen.
#[function_component(AuthCallback)]
pub fn auth_callback(props: &AuthCallbackProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();

    {
        let set_user = session.set_user.clone();
        let clear = session.clear.clone();
        let replace = navigator.replace.clone();
        let on_finish = props.on_finish.clone();
        use_effect_with(props.fragment.clone(), move |fragment| {
            let session_id = session_id_from_fragment(fragment).map(str::to_string);
            clear_fragment();

            match session_id {
                None => {
                    replace.emit(Route::Login);
                    on_finish.emit(());
                }
                Some(session_id) => spawn_local(async move {
                    let result = match AgendaClient::new() {
                        Ok(client) => client.exchange_session(&session_id).await,
                        Err(e) => Err(e),
                    };
                    match result {
                        Ok(user) => {
                            set_user.emit(user);
                            replace.emit(Route::Dashboard);
                        }
                        Err(e) => {
                            console::error!(format!("Session exchange failed: {e}"));
                            clear.emit(());
                            replace.emit(Route::Login);
                        }
                    }
                    on_finish.emit(());
                }),
            }
            || ()
        });
    }

    html! { <LoadingScreen label="Signing you in..." /> }
}
