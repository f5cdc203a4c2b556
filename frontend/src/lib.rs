use std::rc::Rc;

use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod error_page;
pub mod guard;
pub mod home;
pub mod layout;
pub mod loader;
pub mod logout;
pub mod models;
pub mod nav;
pub mod popup;
pub mod profile;
pub mod register;
pub mod search;
pub mod session;
pub mod store;

use config::AppConfig;
use error::RouteError;
use guard::{Guard, Requirement};
use layout::MainLayout;
use store::AppProvider;

/* -------------------- routing -------------------- */

#[derive(Routable, Clone, Debug, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/profile/:id")]
    Profile { id: String },
    // sans identifiant : le loader répond 400
    #[at("/profile")]
    ProfileMissing,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html!(<MainLayout><home::HomeRoute /></MainLayout>),
        Route::Login => html!(<auth::LoginPage />),
        Route::Register => html!(<register::RegisterPage />),
        Route::Profile { id } => html! {
            <MainLayout><profile::ProfileRoute id={Some(id)} /></MainLayout>
        },
        Route::ProfileMissing => html!(<MainLayout><profile::ProfileRoute /></MainLayout>),
        Route::Dashboard => html! {
            <MainLayout>
                <Guard need={Requirement::Admin}>
                    <dashboard::DashboardPage />
                </Guard>
            </MainLayout>
        },
        Route::NotFound => html!(<error_page::ErrorPage error={RouteError::NotFound} />),
    }
}

/* -------------------- entry point ---------------- */

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_build_env());

    html! {
        <AppProvider config={Rc::clone(&config)}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </AppProvider>
    }
}

pub fn run() {
    let config = AppConfig::from_build_env();
    // un second init (rechargement à chaud) n'est pas une erreur
    let _ = console_log::init_with_level(config.log_level);
    console_error_panic_hook::set_once();

    info!("démarrage, API sur {}", config.api_base);
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_paths_round_trip() {
        let route = Route::Profile { id: "42".into() };
        assert_eq!(route.to_path(), "/profile/42");
        assert_eq!(Route::recognize("/profile/42"), Some(route));
    }

    #[test]
    fn bare_profile_path_has_its_own_route() {
        assert_eq!(Route::recognize("/profile"), Some(Route::ProfileMissing));
        assert_eq!(Route::recognize("/dashboard"), Some(Route::Dashboard));
        assert_eq!(Route::Home.to_path(), "/");
    }
}
