use std::rc::Rc;

use gloo::console;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::business::Business;
use crate::models::user::User;
use crate::router::BusinessStatus;
use crate::services::api::AgendaClient;

/// The signed-in owner's business. The App is its only owner; views receive
/// it as a prop and hand changes back through `set_business`.
#[derive(Clone, PartialEq)]
pub struct BusinessHandle {
    pub business: Option<Rc<Business>>,
    pub loading: bool,
    pub set_business: Callback<Business>,
}

impl BusinessHandle {
    pub const fn status(&self) -> BusinessStatus {
        match (&self.business, self.loading) {
            (Some(_), _) => BusinessStatus::Ready,
            (None, true) => BusinessStatus::Loading,
            (None, false) => BusinessStatus::Missing,
        }
    }
}

/// Loads the first business of `user` whenever the signed-in user changes.
#[hook]
pub fn use_business(user: Option<Rc<User>>) -> BusinessHandle {
    let business = use_state(|| None::<Rc<Business>>);
    let loading = use_state(|| true);

    {
        let business = business.clone();
        let loading = loading.clone();
        let user_id = user.as_ref().map(|u| u.user_id.clone());
        use_effect_with(user_id, move |user_id| {
            if user_id.is_none() {
                business.set(None);
                loading.set(false);
            } else {
                loading.set(true);
                spawn_local(async move {
                    let result = match AgendaClient::new() {
                        Ok(client) => client.list_businesses().await,
                        Err(e) => Err(e),
                    };
                    match result {
                        Ok(list) => business.set(list.into_iter().next().map(Rc::new)),
                        Err(e) => {
                            console::error!(format!("Failed to fetch business: {e}"));
                            business.set(None);
                        }
                    }
                    loading.set(false);
                });
            }
            || ()
        });
    }

    let set_business = {
        let business = business.clone();
        Callback::from(move |next: Business| business.set(Some(Rc::new(next))))
    };

    BusinessHandle {
        business: (*business).clone(),
        loading: *loading,
        set_business,
    }
}
