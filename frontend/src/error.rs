//! Erreurs typées : appels API et erreurs de navigation.

use thiserror::Error;

/// Échec d'un appel à l'API distante.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("erreur réseau : {0}")]
    Network(String),
    #[error("HTTP {status} – {text}")]
    Status { status: u16, text: String },
    #[error("réponse illisible : {0}")]
    Decode(String),
    /// Refus de validation renvoyé par `/register` (`{ errors: [{ msg }] }`).
    #[error("{}", .0.join(", "))]
    Rejected(Vec<String>),
    #[error("token absent de la réponse")]
    MissingToken,
}

impl From<gloo_net::Error> for ApiError {
    fn from(value: gloo_net::Error) -> Self {
        match value {
            gloo_net::Error::SerdeError(e) => Self::Decode(e.to_string()),
            other => Self::Network(other.to_string()),
        }
    }
}

/// Erreur levée par un loader (ou par le routeur) et rendue par `ErrorPage`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RouteError {
    /// Jamais construit aujourd'hui : les gardes redirigent vers `/login` en silence.
    #[error("Session absente ou expirée")]
    Unauthenticated,
    /// Jamais construit aujourd'hui : un non-admin est renvoyé vers `/` en silence.
    #[error("Accès refusé")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("Page introuvable")]
    NotFound,
    #[error("Erreur lors de la récupération des données")]
    RemoteFailure(#[source] ApiError),
}

impl RouteError {
    pub fn status(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::Unauthorized => 403,
            Self::BadRequest(_) => 400,
            Self::NotFound => 404,
            Self::RemoteFailure(_) => 500,
        }
    }

    /// Texte affiché sous le code ; la cause d'un `RemoteFailure` n'apparaît pas.
    pub fn status_text(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_http_codes() {
        assert_eq!(RouteError::BadRequest("x".into()).status(), 400);
        assert_eq!(RouteError::Unauthenticated.status(), 401);
        assert_eq!(RouteError::Unauthorized.status(), 403);
        assert_eq!(RouteError::NotFound.status(), 404);
        assert_eq!(RouteError::RemoteFailure(ApiError::Network("down".into())).status(), 500);
    }

    #[test]
    fn remote_failure_hides_cause() {
        let err = RouteError::RemoteFailure(ApiError::Status { status: 502, text: "Bad Gateway".into() });
        assert!(!err.status_text().contains("502"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn rejected_joins_messages() {
        let err = ApiError::Rejected(vec!["Email déjà utilisé".into(), "Pseudo trop court".into()]);
        assert_eq!(err.to_string(), "Email déjà utilisé, Pseudo trop court");
    }
}
