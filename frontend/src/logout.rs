use yew::prelude::*;
use yew_router::prelude::*;

use crate::store::{use_app, AppAction};
use crate::Route;

#[function_component(Logout)]
pub fn logout() -> Html {
    let app       = use_app();
    let navigator = use_navigator();

    let onclick = Callback::from(move |_: MouseEvent| {
        // token vidé côté cookie (le cookie user reste), puis retour au login
        app.dispatch(AppAction::SignedOut);
        if let Some(nav) = &navigator {
            nav.push(&Route::Login);
        }
    });

    html! { <button class="logout" {onclick}>{ "Se déconnecter" }</button> }
}
