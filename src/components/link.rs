use yew::prelude::*;

use crate::hooks::use_navigator::use_navigator;
use crate::router::Route;

#[derive(Properties, PartialEq)]
pub struct LinkProps {
    pub to: Route,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub onclick: Option<Callback<()>>,
    #[prop_or_default]
    pub children: Html,
}

/// Anchor that navigates without a page load; modified clicks open normally.
#[function_component(Link)]
pub fn link(props: &LinkProps) -> Html {
    let navigator = use_navigator();

    let onclick = {
        let to = props.to.clone();
        let extra = props.onclick.clone();
        Callback::from(move |e: MouseEvent| {
            if e.ctrl_key() || e.meta_key() || e.shift_key() || e.button() != 0 {
                return;
            }
            e.prevent_default();
            navigator.push.emit(to.clone());
            if let Some(extra) = &extra {
                extra.emit(());
            }
        })
    };

    html! {
        <a href={props.to.path()} class={props.class.clone()} {onclick}>
            { props.children.clone() }
        </a>
    }
}
