use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use gloo::console;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::error::AppError;

#[derive(Debug, PartialEq)]
pub enum DataState<T> {
    Loading,
    Loaded(Rc<T>),
    Error(String),
}

// Derive would require `T: Clone`.
impl<T> Clone for DataState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Loading => Self::Loading,
            Self::Loaded(data) => Self::Loaded(Rc::clone(data)),
            Self::Error(msg) => Self::Error(msg.clone()),
        }
    }
}

impl<T> DataState<T> {
    /// Returns true if the state is loading
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the data if it is loaded
    pub const fn data(&self) -> Option<&Rc<T>> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Handle returned by [`use_resource`].
pub struct ResourceHandle<T> {
    pub state: DataState<T>,
    /// Fetches again, keeping the current data on screen until the answer arrives
    pub reload: Callback<()>,
}

impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            reload: self.reload.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for ResourceHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.reload == other.reload
    }
}

/// Runs `fetch` whenever `deps` change or `reload` is emitted.
///
/// Only the answer of the latest run is kept: an earlier run that finishes
/// late is dropped.
#[hook]
pub fn use_resource<T, D, F, Fut>(deps: D, fetch: F) -> ResourceHandle<T>
where
    T: 'static,
    D: PartialEq + Clone + 'static,
    F: FnOnce(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, AppError>> + 'static,
{
    let state = use_state(|| DataState::<T>::Loading);
    let version = use_state(|| 0u32);

    {
        let state = state.clone();
        use_effect_with((deps, *version), move |(deps, _)| {
            let superseded = Rc::new(Cell::new(false));

            if state.data().is_none() {
                state.set(DataState::Loading);
            }

            let request = fetch(deps.clone());
            {
                let superseded = Rc::clone(&superseded);
                spawn_local(async move {
                    let result = request.await;
                    if superseded.get() {
                        return;
                    }
                    match result {
                        Ok(data) => state.set(DataState::Loaded(Rc::new(data))),
                        Err(e) => {
                            console::error!(format!("Fetch failed: {e}"));
                            state.set(DataState::Error(e.message().to_string()));
                        }
                    }
                });
            }

            move || superseded.set(true)
        });
    }

    let reload = {
        let version = version.clone();
        Callback::from(move |()| version.set(version.wrapping_add(1)))
    };

    ResourceHandle {
        state: (*state).clone(),
        reload,
    }
}
