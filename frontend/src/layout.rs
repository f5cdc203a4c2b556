use yew::prelude::*;

use crate::nav::Nav;
use crate::store::use_app;

/// Écran d'attente pendant qu'un loader ou une requête s'exécute.
#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="loading">
            <div class="spinner"></div>
            <p>{ "Chargement en cours..." }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    #[prop_or_default]
    pub children: Children,
}

/// Barre de navigation + contenu des routes authentifiées.
#[function_component(MainLayout)]
pub fn main_layout(props: &MainLayoutProps) -> Html {
    let app = use_app();

    html! {
        <div class={classes!("app", app.state().dark_mode.then_some("dark"))}>
            <Nav />
            <main class="main-content">
                { for props.children.iter() }
            </main>
        </div>
    }
}
