use yew::prelude::*;

use crate::store::use_app;

/// Page réservée aux administrateurs (`isAdmin`), montée derrière le garde `Admin`.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let app = use_app();
    let name = app
        .session()
        .user
        .as_ref()
        .map(|u| u.username.clone())
        .unwrap_or_default();

    html! {
        <section class="dashboard">
            <h1>{ "Dashboard" }</h1>
            <p>{ format!("Connecté en tant qu'administrateur : {name}") }</p>
        </section>
    }
}
