use crate::hooks::use_resource::DataState;
use crate::models::error::AppError;
use gloo::console;
use yew::prelude::*;

/// Logs a failed action and tells the user with a browser alert.
pub fn report_failure(action: &str, error: &AppError) {
    console::error!(format!("Failed to {action}: {error}"));
    gloo::dialogs::alert(&error.notice(action));
}

#[derive(Properties, PartialEq)]
pub struct SpinnerProps {
    #[prop_or(AttrValue::Static("Loading..."))]
    pub label: AttrValue,
}

#[function_component(Spinner)]
pub fn spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class="status loading">
            <div class="spinner"></div>
            <p>{&props.label}</p>
        </div>
    }
}

/// Full-page variant shown while the session or business is being resolved.
#[function_component(LoadingScreen)]
pub fn loading_screen(props: &SpinnerProps) -> Html {
    html! {
        <div class="loading-screen">
            <Spinner label={props.label.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorMessageProps {
    pub message: AttrValue,
}

/// Inline error text.
#[function_component(ErrorMessage)]
pub fn error_message(props: &ErrorMessageProps) -> Html {
    html! {
        <p class="form-error" role="alert">{&props.message}</p>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusProps<T: PartialEq> {
    pub state: DataState<T>,
}

/// Spinner or error for a resource that is not loaded yet; nothing once it is.
#[function_component(Status)]
pub fn status<T: PartialEq + 'static>(props: &StatusProps<T>) -> Html {
    match &props.state {
        DataState::Loading => html! { <Spinner /> },
        DataState::Loaded(_) => Html::default(),
        DataState::Error(msg) => html! {
            <div class="status error">
                <p>{"Error: "}{msg}</p>
            </div>
        },
    }
}
