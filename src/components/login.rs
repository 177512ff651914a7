use yew::prelude::*;

use crate::hooks::use_session::use_session;

#[function_component(Login)]
pub fn login() -> Html {
    let session = use_session();
    let onclick = {
        let login = session.login.clone();
        Callback::from(move |_| login.emit(()))
    };

    html! {
        <div class="login-page">
            <div class="card login-card">
                <span class="brand-mark large">{"C"}</span>
                <h1>{"Corella Agenda"}</h1>
                <p class="muted">{"Scheduling for your business, in one place."}</p>
                <button class="btn btn-primary btn-block" {onclick}>
                    {"Sign in with Google"}
                </button>
            </div>
        </div>
    }
}
