use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::SocialApi;
use crate::error::ApiError;
use crate::layout::Loading;
use crate::models::RegisterForm;
use crate::popup::Popup;
use crate::store::{use_app, AppAction};
use crate::Route;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/* -------------------------------------------------------------------------- */
/*                       validation + fin d'inscription                       */
/* -------------------------------------------------------------------------- */

/// Contrôles locaux, dans l'ordre où les messages doivent sortir.
pub fn validate_registration(form: &RegisterForm, tos_accepted: bool) -> Result<(), &'static str> {
    if form.email.is_empty() || form.password.is_empty() || form.username.is_empty() {
        return Err("Tous les champs sont obligatoires");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Le mot de passe doit contenir au moins 6 caractères");
    }
    if !EMAIL_RE.is_match(&form.email) {
        return Err("Adresse email invalide");
    }
    if !tos_accepted {
        return Err("Vous devez accepter les conditions d'utilisation");
    }
    Ok(())
}

/// `/register` ne renvoie qu'un token : l'utilisateur est relu via `/user`.
/// S'il est introuvable, seul le token est conservé.
pub async fn complete_registration<A: SocialApi + ?Sized>(api: &A, token: String) -> AppAction {
    match api.current_user(&token).await {
        Ok(user) => AppAction::SignedIn { token, user },
        Err(e) => {
            warn!("utilisateur introuvable après inscription : {e}");
            AppAction::TokenIssued(token)
        }
    }
}

fn registration_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Rejected(_) => err.to_string(),
        _ => "Erreur lors de l'inscription".into(),
    }
}

/* -------------------------------------------------------------------------- */
/*                              composant inscription                         */
/* -------------------------------------------------------------------------- */

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let app         = use_app();
    let navigator   = use_navigator();
    let form        = use_state(RegisterForm::default);
    let tos         = use_state(|| false);
    let error       = use_state(|| None::<String>);
    let loading     = use_state(|| false);
    let picture_ref = use_node_ref();

    let on_field = |apply: fn(&mut RegisterForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*form).clone();
                apply(&mut next, input.value());
                form.set(next);
            }
        })
    };

    let on_tos = {
        let tos = tos.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            tos.set(input.checked());
        })
    };

    let onsubmit = {
        let app         = app.clone();
        let form        = form.clone();
        let tos         = tos.clone();
        let error       = error.clone();
        let loading     = loading.clone();
        let picture_ref = picture_ref.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            error.set(None);

            if let Err(msg) = validate_registration(&form, *tos) {
                error.set(Some(msg.into()));
                return;
            }

            let picture = picture_ref
                .cast::<HtmlInputElement>()
                .and_then(|i| i.files())
                .and_then(|files| files.get(0));

            loading.set(true);
            let app       = app.clone();
            let navigator = navigator.clone();
            let form      = (*form).clone();
            let error     = error.clone();
            let loading   = loading.clone();

            spawn_local(async move {
                let issued = app
                    .api
                    .register(&form, picture)
                    .await
                    .and_then(|r| r.token.filter(|t| !t.is_empty()).ok_or(ApiError::MissingToken));

                match issued {
                    Ok(token) => {
                        info!("inscription de {}", form.username);
                        let action = complete_registration(&app.api, token).await;
                        app.dispatch(action);
                        if let Some(nav) = &navigator {
                            nav.push(&Route::Home);
                        }
                    }
                    Err(e) => {
                        warn!("inscription refusée : {e}");
                        error.set(Some(registration_error_message(&e)));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_close = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    if *loading {
        return html!(<Loading />);
    }

    html! {
        <div class={classes!("auth-page", app.state().dark_mode.then_some("dark"))}>
            {
                match &*error {
                    Some(msg) => html!(<Popup message={msg.clone()} {on_close} />),
                    None => Html::default(),
                }
            }
            <div class="auth-card">
                <h1>{ "Inscription" }</h1>
                <form {onsubmit}>
                    <label for="email">{ "Email:" }</label>
                    <input id="email" type="email" autocomplete="email" required=true
                        value={form.email.clone()} oninput={on_field(|f, v| f.email = v)} />

                    <label for="username">{ "Nom d'utilisateur:" }</label>
                    <input id="username" type="text" autocomplete="username" required=true
                        value={form.username.clone()} oninput={on_field(|f, v| f.username = v)} />

                    <label for="password">{ "Mot de passe:" }</label>
                    <input id="password" type="password" autocomplete="new-password" required=true
                        value={form.password.clone()} oninput={on_field(|f, v| f.password = v)} />

                    <label for="first_name">{ "Prénom:" }</label>
                    <input id="first_name" type="text" autocomplete="given-name"
                        value={form.first_name.clone()} oninput={on_field(|f, v| f.first_name = v)} />

                    <label for="last_name">{ "Nom:" }</label>
                    <input id="last_name" type="text" autocomplete="family-name"
                        value={form.last_name.clone()} oninput={on_field(|f, v| f.last_name = v)} />

                    <label for="profile_picture">{ "Photo de profil:" }</label>
                    <input id="profile_picture" ref={picture_ref} type="file" accept="image/*" />

                    <fieldset>
                        <input id="accept" type="checkbox" checked={*tos} onchange={on_tos} />
                        <label for="accept">
                            { "Accepter les " }
                            <Link<Route> to={Route::Login}>{ "conditions d'utilisation" }</Link<Route>>
                            { "." }
                        </label>
                    </fieldset>

                    <button type="submit" disabled={!*tos}>{ "S'inscrire" }</button>
                </form>
            </div>
        </div>
    }
}
