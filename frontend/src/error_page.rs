use log::error;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::error::RouteError;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct ErrorPageProps {
    pub error: RouteError,
}

/// Code, titre et détail affichés : 404 à part, le reste par code + texte.
/// La cause d'un `RemoteFailure` reste dans les logs.
pub fn error_view(error: &RouteError) -> (u16, &'static str, String) {
    match error {
        RouteError::NotFound => (404, "Uh-oh!", "Cette page est introuvable...".to_string()),
        e @ (RouteError::Unauthenticated
        | RouteError::Unauthorized
        | RouteError::BadRequest(_)
        | RouteError::RemoteFailure(_)) => (e.status(), "Une erreur est survenue!", e.status_text()),
    }
}

/// Seul rendu des erreurs de navigation.
#[function_component(ErrorPage)]
pub fn error_page(props: &ErrorPageProps) -> Html {
    error!("erreur de route {} : {:?}", props.error.status(), props.error);

    let (code, title, detail) = error_view(&props.error);

    html! {
        <div class="error-page">
            <h1 class="error-code">{ code }</h1>
            <p class="error-title">{ title }</p>
            <p class="error-detail">{ detail }</p>
            <Link<Route> to={Route::Home} classes="error-back">{ "Retour" }</Link<Route>>
        </div>
    }
}
