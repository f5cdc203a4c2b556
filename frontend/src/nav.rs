use futures::future::Abortable;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::InFlight;
use crate::logout::Logout;
use crate::models::UserSummary;
use crate::search::{run_search, search_term, SearchBox, SearchEvent};
use crate::store::{use_app, AppAction};
use crate::Route;

/* délai avant de masquer les résultats, pour laisser passer le clic */
const BLUR_HIDE_MS: u32 = 200;

/// Les résultats restent visibles si le focus passe sur un autre champ.
fn hides_results_on_blur(next_focus_tag: Option<&str>) -> bool {
    !next_focus_tag.is_some_and(|tag| tag.eq_ignore_ascii_case("input"))
}

#[derive(Properties, PartialEq)]
struct AvatarProps {
    user: Option<UserSummary>,
}

#[function_component(Avatar)]
fn avatar(props: &AvatarProps) -> Html {
    let app = use_app();
    let picture = props.user.as_ref().and_then(|u| u.profile_picture.as_deref());
    match picture {
        Some(file) => html!(<img class="avatar" src={app.config.profile_picture_url(file)} alt="User Profile" />),
        None => html!(<img class="avatar" src="/assets/default_image.png" alt="Default user image" />),
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let app       = use_app();
    let navigator = use_navigator();
    let current   = use_route::<Route>();

    let term      = use_state(String::new);
    let search    = use_reducer(SearchBox::default);
    let menu_open = use_state(|| false);
    let pending   = use_mut_ref(|| None::<InFlight>);

    let user = app.session().user.clone();

    /* ---------------- recherche à la frappe ---------------- */
    let oninput = {
        let app     = app.clone();
        let term    = term.clone();
        let search  = search.clone();
        let pending = pending.clone();

        Callback::from(move |e: InputEvent| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let value = input.value();
            term.set(value.clone());

            // la frappe précédente n'a plus d'intérêt
            if let Some(previous) = pending.borrow_mut().take() {
                previous.abort();
            }
            search.dispatch(SearchEvent::Typed(value.clone()));
            if search_term(&value).is_none() {
                return;
            }

            let (flight, signal, registration) = InFlight::browser();
            *pending.borrow_mut() = Some(flight);

            let api    = app.api.with_signal(signal);
            let token  = app.session().token().unwrap_or_default().to_string();
            let search = search.clone();

            spawn_local(async move {
                let run = async move { run_search(&api, &token, &value).await };
                if let Ok(outcome) = Abortable::new(run, registration).await {
                    search.dispatch(SearchEvent::Finished(outcome));
                }
            });
        })
    };

    let onfocus = {
        let search = search.clone();
        Callback::from(move |_: FocusEvent| search.dispatch(SearchEvent::Shown(true)))
    };

    let onblur = {
        let search = search.clone();
        Callback::from(move |e: FocusEvent| {
            let next = e
                .related_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|el| el.tag_name());
            if !hides_results_on_blur(next.as_deref()) {
                return;
            }
            let search = search.clone();
            Timeout::new(BLUR_HIDE_MS, move || search.dispatch(SearchEvent::Shown(false))).forget();
        })
    };

    let on_pick = {
        let navigator = navigator.clone();
        let term      = term.clone();
        let search    = search.clone();
        Callback::from(move |id: i64| {
            if let Some(nav) = &navigator {
                nav.push(&Route::Profile { id: id.to_string() });
            }
            term.set(String::new());
            search.dispatch(SearchEvent::Typed(String::new()));
        })
    };

    /* ---------------- menu latéral ---------------- */
    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let toggle_dark = {
        let app = app.clone();
        Callback::from(move |_: MouseEvent| app.dispatch(AppAction::ToggleDarkMode))
    };

    let active = |route: &Route| -> Classes {
        classes!("menu-link", (current.as_ref() == Some(route)).then_some("active"))
    };

    let own_profile = user.as_ref().map(|u| Route::Profile { id: u.id.to_string() });

    /* ---------------- rendu ---------------- */
    html! {
        <>
            <nav class="navbar">
                <div class="navbar-left">
                    <button id="burger-button" onclick={toggle_menu.clone()}>{ "☰" }</button>
                    <div class="search">
                        <input
                            type="text"
                            placeholder="Rechercher un utilisateur..."
                            value={(*term).clone()}
                            {oninput}
                            {onfocus}
                            {onblur}
                        />
                        {
                            if search.show && !search.hits.is_empty() {
                                html! {
                                    <ul class="search-results">
                                        { for search.hits.iter().map(|hit| {
                                            let on_pick = on_pick.clone();
                                            let id = hit.id;
                                            html! {
                                                <li key={hit.id} onclick={Callback::from(move |_: MouseEvent| on_pick.emit(id))}>
                                                    { &hit.username }
                                                </li>
                                            }
                                        }) }
                                    </ul>
                                }
                            } else if search.show && !search.loading && search_term(&term).is_some() {
                                html!(<p class="search-empty">{ "Aucun utilisateur trouvé." }</p>)
                            } else {
                                Html::default()
                            }
                        }
                        {
                            match &search.error {
                                Some(msg) => html!(<p class="search-error">{ msg.clone() }</p>),
                                None => Html::default(),
                            }
                        }
                    </div>
                </div>
                {
                    match own_profile.clone() {
                        Some(to) => html! {
                            <Link<Route> {to} classes="navbar-user">
                                <Avatar user={user.clone()} />
                                <span class="username">{ user.as_ref().map(|u| u.username.clone()).unwrap_or_default() }</span>
                            </Link<Route>>
                        },
                        None => Html::default(),
                    }
                }
            </nav>

            <aside class={classes!("side-menu", (*menu_open).then_some("open"))}>
                <button class="side-menu-close" onclick={toggle_menu.clone()}>{ "✕" }</button>
                <div class="brand">
                    <img src="/sunlight-logo.png" alt="image of the social network" />
                    <p>{ "Sunlight" }</p>
                </div>
                <ul class="menu">
                    <li><Link<Route> to={Route::Home} classes={active(&Route::Home)}>{ "Accueil" }</Link<Route>></li>
                    {
                        match own_profile.clone() {
                            Some(to) => html! {
                                <li><Link<Route> to={to.clone()} classes={active(&to)}>{ "Profil" }</Link<Route>></li>
                            },
                            None => Html::default(),
                        }
                    }
                    {
                        if user.as_ref().is_some_and(|u| u.is_admin) {
                            html! {
                                <li><Link<Route> to={Route::Dashboard} classes={active(&Route::Dashboard)}>{ "Dashboard" }</Link<Route>></li>
                            }
                        } else {
                            Html::default()
                        }
                    }
                </ul>
                <div class="side-menu-footer">
                    <button class="dark-toggle" onclick={toggle_dark}>
                        { if app.state().dark_mode { "☀" } else { "☾" } }
                    </button>
                    <Logout />
                    <div class="user-card">
                        <Avatar user={user.clone()} />
                        <p>
                            <strong>{ user.as_ref().map(|u| u.username.clone()).unwrap_or_else(|| "Nom d'utilisateur".into()) }</strong>
                            <span>{ user.as_ref().map(|u| u.email.clone()).unwrap_or_else(|| "Adresse e-mail".into()) }</span>
                        </p>
                    </div>
                </div>
            </aside>

            {
                if *menu_open {
                    html!(<div class="menu-backdrop" onclick={toggle_menu}></div>)
                } else {
                    Html::default()
                }
            }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_towards_an_input_keeps_results() {
        assert!(!hides_results_on_blur(Some("INPUT")));
        assert!(!hides_results_on_blur(Some("input")));
    }

    #[test]
    fn blur_elsewhere_hides_results() {
        assert!(hides_results_on_blur(None));
        assert!(hides_results_on_blur(Some("BUTTON")));
        assert!(hides_results_on_blur(Some("LI")));
    }
}
