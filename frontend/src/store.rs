//! État applicatif explicite : session + préférence d'affichage, modifiés
//! uniquement par des `AppAction` typées.

use std::rc::Rc;

use log::{debug, info};
use yew::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::models::{Session, UserSummary};
use crate::session::{CookieJar, SessionStore};

/* ---------------- état + actions ---------------- */

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub session:   Session,
    /// Préférence locale, jamais écrite dans les cookies.
    pub dark_mode: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppAction {
    /// Connexion réussie (ou inscription suivie d'un `/user`).
    SignedIn { token: String, user: UserSummary },
    /// Inscription sans utilisateur récupéré : token seul.
    TokenIssued(String),
    /// Re-lecture de `/user` par une page, en mémoire seulement.
    UserRefreshed(UserSummary),
    SignedOut,
    ToggleDarkMode,
}

impl Reducible for AppState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AppAction::SignedIn { token, user } => {
                next.session = Session { token: Some(token), user: Some(user) };
            }
            AppAction::TokenIssued(token) => next.session.token = Some(token),
            AppAction::UserRefreshed(user) => next.session.user = Some(user),
            AppAction::SignedOut => next.session.token = None,
            AppAction::ToggleDarkMode => next.dark_mode = !next.dark_mode,
        }
        Rc::new(next)
    }
}

/// Écritures du Session Store associées à une action. Seuls connexion,
/// inscription et déconnexion touchent aux cookies.
pub fn persist<J: CookieJar>(action: &AppAction, store: &SessionStore<J>) {
    match action {
        AppAction::SignedIn { token, user } => store.write(token, user),
        AppAction::TokenIssued(token) => store.write_token(token),
        AppAction::SignedOut => store.clear(),
        AppAction::UserRefreshed(_) | AppAction::ToggleDarkMode => {}
    }
}

/* ---------------- handle partagé ---------------- */

/// Valeur passée dans le contexte : état courant, canal d'actions, client API.
#[derive(Clone, PartialEq)]
pub struct AppHandle {
    state:  UseReducerHandle<AppState>,
    pub api:    ApiClient,
    pub config: Rc<AppConfig>,
}

impl AppHandle {
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.state.session
    }

    pub fn dispatch(&self, action: AppAction) {
        debug!("action : {action:?}");
        persist(&action, &SessionStore::browser());
        self.state.dispatch(action);
    }
}

#[hook]
pub fn use_app() -> AppHandle {
    use_context::<AppHandle>().expect("AppProvider manquant")
}

#[derive(Properties, PartialEq)]
pub struct AppProviderProps {
    pub config: Rc<AppConfig>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(AppProvider)]
pub fn app_provider(props: &AppProviderProps) -> Html {
    let state = use_reducer(|| {
        let session = SessionStore::browser().read();
        info!("session restaurée : authentifiée = {}", session.is_authenticated());
        AppState { session, dark_mode: false }
    });

    let handle = AppHandle {
        state,
        api: ApiClient::new(props.config.api_base.clone()),
        config: props.config.clone(),
    };

    html! {
        <ContextProvider<AppHandle> context={handle}>
            { for props.children.iter() }
        </ContextProvider<AppHandle>>
    }
}
