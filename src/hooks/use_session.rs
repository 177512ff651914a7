use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo_storage::{SessionStorage, Storage};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::Config;
use crate::hooks::use_navigator::current_fragment;
use crate::models::user::User;
use crate::router::SessionStatus;
use crate::services::api::AgendaClient;
use crate::utils::auth_fragment::session_id_from_fragment;

/// The signed-in user for the whole application.
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    pub user: Option<Rc<User>>,
    pub loading: bool,
    /// Sends the browser to the identity provider
    pub login: Callback<()>,
    pub logout: Callback<()>,
    /// Installs the user returned by the session exchange
    pub set_user: Callback<User>,
    /// Drops the user locally, e.g. after a failed session exchange
    pub clear: Callback<()>,
}

impl SessionHandle {
    pub const fn status(&self) -> SessionStatus {
        match (&self.user, self.loading) {
            (Some(_), _) => SessionStatus::SignedIn,
            (None, true) => SessionStatus::Loading,
            (None, false) => SessionStatus::SignedOut,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Html,
}

/// Counts sign-in changes so a slow startup check cannot undo a newer one.
#[derive(Debug, Default)]
pub struct SessionEpoch(u32);

impl SessionEpoch {
    pub const fn current(&self) -> u32 {
        self.0
    }

    pub const fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// Whether a check started at `started` may still write its answer.
    pub const fn is_current(&self, started: u32) -> bool {
        self.0 == started
    }
}

/// Whether startup should ask `/auth/me`. A page carrying a fresh
/// `session_id` has no cookie yet; the auth callback settles it instead.
pub fn checks_cookie_on_mount(fragment: &str) -> bool {
    session_id_from_fragment(fragment).is_none()
}

/// Resolves the current user once at startup and owns it until sign-out.
///
/// A user cached by an earlier sign-in is shown immediately while
/// `/auth/me` confirms the cookie in the background.
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let user = use_state(|| load_cached_user().map(Rc::new));
    let loading = use_state(|| true);
    let epoch = use_mut_ref(SessionEpoch::default);

    // Effect: check the session cookie once
    {
        let user = user.clone();
        let loading = loading.clone();
        let epoch = Rc::clone(&epoch);
        use_effect_with((), move |_| {
            if checks_cookie_on_mount(&current_fragment()) {
                spawn_local(verify_cookie(user, loading, epoch));
            }
            || ()
        });
    }

    let login = Callback::from(|()| {
        let window = gloo::utils::window();
        let origin = window.location().origin().unwrap_or_default();
        let target = login_url(Config::AUTH_URL, &origin);
        if let Err(e) = window.location().set_href(&target) {
            console::error!(format!("Failed to start sign-in: {e:?}"));
        }
    });

    let logout = {
        let user = user.clone();
        Callback::from(move |()| {
            let user = user.clone();
            spawn_local(async move {
                let result = match AgendaClient::new() {
                    Ok(client) => client.logout().await,
                    Err(e) => Err(e),
                };
                if let Err(e) = result {
                    console::warn!(format!("Logout request failed: {e}"));
                }
                SessionStorage::delete(Config::SESSION_USER_KEY);
                user.set(None);
            });
        })
    };

    let set_user = {
        let user = user.clone();
        let loading = loading.clone();
        let epoch = Rc::clone(&epoch);
        Callback::from(move |next: User| {
            epoch.borrow_mut().advance();
            cache_user(&next);
            user.set(Some(Rc::new(next)));
            loading.set(false);
        })
    };

    let clear = {
        let user = user.clone();
        let loading = loading.clone();
        Callback::from(move |()| {
            epoch.borrow_mut().advance();
            SessionStorage::delete(Config::SESSION_USER_KEY);
            user.set(None);
            loading.set(false);
        })
    };

    let handle = SessionHandle {
        user: (*user).clone(),
        loading: *loading,
        login,
        logout,
        set_user,
        clear,
    };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            { props.children.clone() }
        </ContextProvider<SessionHandle>>
    }
}

/// Session from the nearest [`SessionProvider`]; signed out when there is none.
#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().unwrap_or_else(|| SessionHandle {
        user: None,
        loading: false,
        login: Callback::noop(),
        logout: Callback::noop(),
        set_user: Callback::noop(),
        clear: Callback::noop(),
    })
}

/// Identity provider URL that returns to the agenda root afterwards.
pub fn login_url(auth_url: &str, origin: &str) -> String {
    let redirect = format!("{}{}", origin.trim_end_matches('/'), crate::router::AGENDA_ROOT);
    let encoded = encode_query_value(&redirect);
    format!("{auth_url}?redirect={encoded}")
}

/// Percent-encodes a query value.
fn encode_query_value(value: &str) -> String {
    reqwest::Url::parse_with_params("http://localhost/", [("v", value)])
        .ok()
        .and_then(|url| url.query().map(|q| q.trim_start_matches("v=").to_string()))
        .unwrap_or_else(|| value.to_string())
}

async fn verify_cookie(
    user: UseStateHandle<Option<Rc<User>>>,
    loading: UseStateHandle<bool>,
    epoch: Rc<RefCell<SessionEpoch>>,
) {
    let started = epoch.borrow().current();
    let result = match AgendaClient::new() {
        Ok(client) => client.current_user().await,
        Err(e) => Err(e),
    };
    if !epoch.borrow().is_current(started) {
        return;
    }
    match result {
        Ok(current) => {
            cache_user(&current);
            user.set(Some(Rc::new(current)));
        }
        Err(e) => {
            if !e.is_auth() {
                console::warn!(format!("Session check failed: {e}"));
            }
            SessionStorage::delete(Config::SESSION_USER_KEY);
            user.set(None);
        }
    }
    loading.set(false);
}

fn load_cached_user() -> Option<User> {
    SessionStorage::get(Config::SESSION_USER_KEY).ok()
}

fn cache_user(user: &User) {
    if let Err(e) = SessionStorage::set(Config::SESSION_USER_KEY, user) {
        web_sys::console::warn_1(&format!("Failed to cache user: {e:?}").into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url_encodes_redirect() {
        assert_eq!(
            login_url("https://auth.example.com/", "https://app.example.com"),
            "https://auth.example.com/?redirect=https%3A%2F%2Fapp.example.com%2Fapp%2Fagenda"
        );
    }

    #[test]
    fn test_callback_page_skips_cookie_check() {
        assert!(!checks_cookie_on_mount("session_id=abc123"));
        assert!(!checks_cookie_on_mount("#state=x&session_id=abc123"));
        assert!(checks_cookie_on_mount(""));
        assert!(checks_cookie_on_mount("session_id="));
    }

    #[test]
    fn test_check_started_before_sign_in_is_stale() {
        let mut epoch = SessionEpoch::default();
        let started = epoch.current();
        assert!(epoch.is_current(started));

        // The exchange lands a user while `/auth/me` is still in flight
        epoch.advance();
        assert!(!epoch.is_current(started));
        assert!(epoch.is_current(epoch.current()));
    }
}
