//! Loaders de route : résolus avant le rendu de la page, ils renvoient soit
//! les données, soit une redirection, soit une `RouteError` pour `ErrorPage`.

use std::future::Future;

use futures::future::Abortable;
use log::{debug, error};
use web_sys::AbortSignal;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{InFlight, SocialApi};
use crate::error::{ApiError, RouteError};
use crate::models::{ProfileView, Session, UserSummary};
use crate::error_page::ErrorPage;
use crate::layout::Loading;
use crate::Route;

#[derive(Clone, Debug, PartialEq)]
pub enum LoaderOutcome<T> {
    Ready(T),
    Redirect(Route),
}

pub type LoaderResult<T> = Result<LoaderOutcome<T>, RouteError>;

/* -------------------------------------------------------------------------- */
/*                                  loaders                                   */
/* -------------------------------------------------------------------------- */

/// Route protégée générique : la session suffit, aucun appel réseau.
pub fn protected_loader(session: &Session) -> LoaderResult<UserSummary> {
    match session.authenticated_user() {
        Some(user) => Ok(LoaderOutcome::Ready(user.clone())),
        None => Ok(LoaderOutcome::Redirect(Route::Login)),
    }
}

/// `/profile/:id` : profil demandé + état d'abonnement, en séquence.
pub async fn profile_loader<A: SocialApi + ?Sized>(
    api: &A,
    session: &Session,
    id: Option<&str>,
) -> LoaderResult<ProfileView> {
    /* 1) session */
    let token = match (session.token(), session.user.as_ref()) {
        (Some(token), Some(_)) => token,
        _ => return Ok(LoaderOutcome::Redirect(Route::Login)),
    };

    /* 2) paramètre de route */
    let id = match id.map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => return Err(RouteError::BadRequest("ID utilisateur non valide".into())),
    };

    /* 3) données distantes */
    let fetched = async {
        let profile_user = api.user(token, id).await?;
        let status = api.follow_status(token, id).await?;
        Ok::<_, ApiError>(ProfileView { profile_user, is_following: status.is_following })
    };

    match fetched.await {
        Ok(view) => Ok(LoaderOutcome::Ready(view)),
        Err(e) => {
            error!("Erreur lors de la récupération des données utilisateur {id} : {e}");
            Err(RouteError::RemoteFailure(e))
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                         exécution côté composant                           */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Ready(T),
    Redirect(Route),
    Failed(RouteError),
}

impl<T> From<LoaderResult<T>> for LoadState<T> {
    fn from(result: LoaderResult<T>) -> Self {
        match result {
            Ok(LoaderOutcome::Ready(data)) => Self::Ready(data),
            Ok(LoaderOutcome::Redirect(to)) => Self::Redirect(to),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Lance `loader` une fois par valeur de `deps`. Chaque activation est une
/// tâche annulable : un changement de `deps` ou le démontage coupe ses
/// requêtes (le signal reçu est à poser sur le client) et abandonne le futur.
#[hook]
pub fn use_loader<T, D, F, Fut>(deps: D, loader: F) -> UseStateHandle<LoadState<T>>
where
    T: 'static,
    D: PartialEq + 'static,
    F: FnOnce(&D, Option<AbortSignal>) -> Fut + 'static,
    Fut: Future<Output = LoaderResult<T>> + 'static,
{
    let state = use_state(|| LoadState::Pending);
    {
        let state = state.clone();
        use_effect_with(deps, move |deps| {
            state.set(LoadState::Pending);
            let (flight, signal, registration) = InFlight::browser();
            let task = Abortable::new(loader(deps, signal), registration);
            spawn_local(async move {
                match task.await {
                    Ok(result) => state.set(result.into()),
                    Err(_) => debug!("loader abandonné par une navigation plus récente"),
                }
            });
            move || flight.abort()
        });
    }
    state
}

/// Traduit l'état d'un loader en rendu.
pub fn render_loaded<T>(state: &LoadState<T>, page: impl FnOnce(&T) -> Html) -> Html {
    match state {
        LoadState::Pending => html!(<Loading />),
        LoadState::Redirect(to) => html!(<Redirect<Route> to={to.clone()} />),
        LoadState::Failed(error) => html!(<ErrorPage error={error.clone()} />),
        LoadState::Ready(data) => page(data),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use futures::executor::block_on;
    use futures::future::AbortHandle;

    use super::*;
    use crate::api::fake::FakeApi;
    use crate::models::test_user;

    fn signed_in() -> Session {
        Session { token: Some("t1".into()), user: Some(test_user(1, false)) }
    }

    fn api_with_profile_42() -> FakeApi {
        FakeApi {
            users: HashMap::from([("42".to_string(), test_user(42, false))]),
            following: HashMap::from([("42".to_string(), true)]),
            ..FakeApi::default()
        }
    }

    #[test]
    fn protected_loader_redirects_without_session() {
        assert_eq!(protected_loader(&Session::default()), Ok(LoaderOutcome::Redirect(Route::Login)));
        let only_user = Session { token: None, user: Some(test_user(1, false)) };
        assert_eq!(protected_loader(&only_user), Ok(LoaderOutcome::Redirect(Route::Login)));
    }

    #[test]
    fn protected_loader_returns_cached_user() {
        assert_eq!(protected_loader(&signed_in()), Ok(LoaderOutcome::Ready(test_user(1, false))));
    }

    #[test]
    fn profile_without_session_redirects_without_calls() {
        let api = api_with_profile_42();
        let out = block_on(profile_loader(&api, &Session::default(), Some("42")));
        assert_eq!(out, Ok(LoaderOutcome::Redirect(Route::Login)));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn profile_without_id_is_bad_request_without_calls() {
        let api = api_with_profile_42();
        for id in [None, Some(""), Some("  ")] {
            let err = block_on(profile_loader(&api, &signed_in(), id)).unwrap_err();
            assert_eq!(err.status(), 400);
        }
        assert!(api.calls().is_empty());
    }

    #[test]
    fn profile_resolves_user_then_follow_status() {
        let api = api_with_profile_42();
        let out = block_on(profile_loader(&api, &signed_in(), Some("42")));
        assert_eq!(
            out,
            Ok(LoaderOutcome::Ready(ProfileView { profile_user: test_user(42, false), is_following: true }))
        );
        assert_eq!(api.calls(), vec!["GET /user/42 [t1]", "GET /user/following/42 [t1]"]);
    }

    #[test]
    fn profile_remote_failure_is_500() {
        let api = FakeApi { fail_all: true, ..api_with_profile_42() };
        let err = block_on(profile_loader(&api, &signed_in(), Some("42"))).unwrap_err();
        assert_eq!(err.status(), 500);
        assert!(matches!(err, RouteError::RemoteFailure(_)));
        assert_eq!(api.calls().len(), 1);
    }

    #[test]
    fn profile_missing_user_is_500_not_partial() {
        let api = api_with_profile_42();
        let err = block_on(profile_loader(&api, &signed_in(), Some("7"))).unwrap_err();
        assert_eq!(err.status(), 500);
        assert_eq!(api.calls(), vec!["GET /user/7 [t1]"]);
    }

    #[test]
    fn aborted_loader_never_resolves() {
        let api = api_with_profile_42();
        let session = signed_in();
        let (handle, registration) = AbortHandle::new_pair();
        let task = Abortable::new(profile_loader(&api, &session, Some("42")), registration);
        handle.abort();
        assert!(block_on(task).is_err());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn failed_state_renders_the_error_page() {
        let failed: LoadState<u8> = LoadState::Failed(RouteError::RemoteFailure(ApiError::MissingToken));
        let page = |_: &u8| html!(<p>{ "page" }</p>);
        assert!(render_loaded(&failed, page) == html!(<ErrorPage error={RouteError::NotFound} />));
        assert!(render_loaded(&failed, page) != html!(<Loading />));
        assert!(render_loaded(&LoadState::<u8>::Pending, page) == html!(<Loading />));
    }

    #[test]
    fn loader_result_maps_to_load_state() {
        let state: LoadState<u8> = Err(RouteError::NotFound).into();
        assert_eq!(state, LoadState::Failed(RouteError::NotFound));
        let state: LoadState<u8> = Ok(LoaderOutcome::Redirect(Route::Home)).into();
        assert_eq!(state, LoadState::Redirect(Route::Home));
    }
}
