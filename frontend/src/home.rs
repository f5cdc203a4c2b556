use yew::prelude::*;

use crate::guard::{Guard, Requirement};
use crate::loader::{protected_loader, render_loaded, LoadState};
use crate::models::UserSummary;
use crate::store::use_app;

#[derive(Properties, PartialEq)]
pub struct HomePageProps {
    pub user: UserSummary,
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    html! {
        <h1 class="welcome">{ format!("Bienvenue, {} !", props.user.username) }</h1>
    }
}

/// `/` : le loader générique suffit, il ne fait aucun appel réseau.
#[function_component(HomeRoute)]
pub fn home_route() -> Html {
    let app = use_app();
    let state: LoadState<UserSummary> = protected_loader(app.session()).into();

    render_loaded(&state, |user| html! {
        <Guard need={Requirement::Session}>
            <HomePage user={user.clone()} />
        </Guard>
    })
}
