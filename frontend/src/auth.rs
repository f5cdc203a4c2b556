use log::{info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::SocialApi;
use crate::error::ApiError;
use crate::layout::Loading;
use crate::models::{Credentials, UserSummary};
use crate::popup::Popup;
use crate::store::{use_app, AppAction};
use crate::Route;

/* -------------------------------------------------------------------------- */
/*                           échange avec /login                              */
/* -------------------------------------------------------------------------- */

/// `POST /login` ; une réponse sans token (ou sans utilisateur) est un échec.
pub async fn sign_in<A: SocialApi + ?Sized>(
    api: &A,
    creds: &Credentials,
) -> Result<(String, UserSummary), ApiError> {
    let resp = api.login(creds).await?;
    match (resp.token.filter(|t| !t.is_empty()), resp.user) {
        (Some(token), Some(user)) => Ok((token, user)),
        (None, _) => Err(ApiError::MissingToken),
        (Some(_), None) => Err(ApiError::Decode("utilisateur absent de la réponse".into())),
    }
}

/* -------------------------------------------------------------------------- */
/*                               composant login                              */
/* -------------------------------------------------------------------------- */

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let app          = use_app();
    let navigator    = use_navigator();
    let email_ref    = use_node_ref();
    let password_ref = use_node_ref();
    let error        = use_state(|| None::<String>);
    let loading      = use_state(|| false);

    /* ------------------ callback du <form onsubmit=…> --------------------- */
    let onsubmit = {
        let app          = app.clone();
        let email_ref    = email_ref.clone();
        let password_ref = password_ref.clone();
        let error        = error.clone();
        let loading      = loading.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            error.set(None);

            let value = |r: &NodeRef| r.cast::<HtmlInputElement>().map(|i| i.value()).unwrap_or_default();
            let creds = Credentials { email: value(&email_ref), password: value(&password_ref) };

            loading.set(true);
            let app       = app.clone();
            let navigator = navigator.clone();
            let error     = error.clone();
            let loading   = loading.clone();

            spawn_local(async move {
                match sign_in(&app.api, &creds).await {
                    Ok((token, user)) => {
                        info!("connexion de {}", user.username);
                        app.dispatch(AppAction::SignedIn { token, user });
                        if let Some(nav) = &navigator {
                            nav.push(&Route::Home);
                        }
                    }
                    Err(e) => {
                        warn!("échec de connexion : {e}");
                        error.set(Some("Échec de la connexion. Veuillez vérifier vos identifiants.".into()));
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

    let toggle_dark = {
        let app = app.clone();
        Callback::from(move |_: MouseEvent| app.dispatch(AppAction::ToggleDarkMode))
    };

    if *loading {
        return html!(<Loading />);
    }

    /* ---------------------------- rendu ---------------------------------- */
    html! {
        <div class={classes!("auth-page", app.state().dark_mode.then_some("dark"))}>
            {
                match &*error {
                    Some(msg) => html!(<Popup message={msg.clone()} {on_close} />),
                    None => Html::default(),
                }
            }
            <div class="auth-card">
                <header>
                    <h1>{ "Connexion" }</h1>
                    <button class="dark-toggle" onclick={toggle_dark}>{ "☾ / ☀" }</button>
                </header>
                <form onsubmit={onsubmit}>
                    <label for="email">{ "Email:" }</label>
                    <input id="email" ref={email_ref} type="email" required=true />
                    <label for="password">{ "Mot de passe:" }</label>
                    <input id="password" ref={password_ref} type="password" required=true />
                    <button type="submit">{ "Se connecter" }</button>
                </form>
                <p>{ "Pas encore inscrit ?" }</p>
                <Link<Route> to={Route::Register} classes="secondary">{ "S'inscrire" }</Link<Route>>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::api::fake::FakeApi;
    use crate::models::{test_user, LoginResponse};

    fn creds() -> Credentials {
        Credentials { email: "lea@sunlight.test".into(), password: "secret1".into() }
    }

    #[test]
    fn login_returns_token_and_user() {
        let api = FakeApi {
            login: Some(LoginResponse { token: Some("t1".into()), user: Some(test_user(1, false)) }),
            ..FakeApi::default()
        };
        assert_eq!(block_on(sign_in(&api, &creds())), Ok(("t1".to_string(), test_user(1, false))));
    }

    #[test]
    fn login_without_token_fails() {
        let api = FakeApi {
            login: Some(LoginResponse { token: None, user: Some(test_user(1, false)) }),
            ..FakeApi::default()
        };
        assert_eq!(block_on(sign_in(&api, &creds())), Err(ApiError::MissingToken));
    }

    #[test]
    fn rejected_credentials_fail() {
        let api = FakeApi::default();
        let err = block_on(sign_in(&api, &creds())).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 401, .. }));
    }
}
