//! Client HTTP de l'API Sunlight. Le token est toujours passé explicitement.

use async_trait::async_trait;
use futures::future::{AbortHandle, AbortRegistration};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use web_sys::{AbortController, AbortSignal, File, FormData};

use crate::error::ApiError;
use crate::models::{
    Credentials, FollowStatus, LoginResponse, RegisterForm, RegisterResponse, SearchHit,
    UserSummary,
};

/* ---------------- surface utilisée par loaders / actions ---------------- */

/// Appels consommés par les loaders, la recherche et les actions de profil.
#[async_trait(?Send)]
pub trait SocialApi {
    async fn login(&self, creds: &Credentials) -> Result<LoginResponse, ApiError>;
    async fn current_user(&self, token: &str) -> Result<UserSummary, ApiError>;
    async fn user(&self, token: &str, id: &str) -> Result<UserSummary, ApiError>;
    async fn follow_status(&self, token: &str, id: &str) -> Result<FollowStatus, ApiError>;
    async fn follow(&self, token: &str, id: &str) -> Result<(), ApiError>;
    async fn unfollow(&self, token: &str, id: &str) -> Result<(), ApiError>;
    async fn search_users(&self, token: &str, term: &str) -> Result<Vec<SearchHit>, ApiError>;
}

/* ---------------- client gloo-net ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base:   String,
    /// Posé sur chaque `fetch` ; l'abandon coupe la requête côté navigateur.
    signal: Option<AbortSignal>,
}

#[derive(Deserialize)]
struct ValidationErrors {
    errors: Vec<ValidationError>,
}

#[derive(Deserialize)]
struct ValidationError {
    msg: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into().trim_end_matches('/').to_string(), signal: None }
    }

    /// Même client, dont les requêtes suivent `signal`.
    pub fn with_signal(&self, signal: Option<AbortSignal>) -> Self {
        Self { base: self.base.clone(), signal }
    }

    pub fn signal(&self) -> Option<&AbortSignal> {
        self.signal.as_ref()
    }

    fn get(&self, path: &str) -> RequestBuilder {
        Request::get(&self.url(path)).abort_signal(self.signal())
    }

    fn post(&self, path: &str) -> RequestBuilder {
        Request::post(&self.url(path)).abort_signal(self.signal())
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        Request::delete(&self.url(path)).abort_signal(self.signal())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", &format!("Bearer {token}"))
    }

    /// Inscription en multipart ; ne fait pas partie de `SocialApi` car elle
    /// dépend d'un `File` du navigateur.
    pub async fn register(
        &self,
        form: &RegisterForm,
        picture: Option<File>,
    ) -> Result<RegisterResponse, ApiError> {
        let data = FormData::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;
        let fields = [
            ("email", &form.email),
            ("password", &form.password),
            ("username", &form.username),
            ("first_name", &form.first_name),
            ("last_name", &form.last_name),
        ];
        for (name, value) in fields {
            data.append_with_str(name, value)
                .map_err(|e| ApiError::Network(format!("{e:?}")))?;
        }
        if let Some(file) = picture {
            data.append_with_blob_and_filename("profile_picture", &file, &file.name())
                .map_err(|e| ApiError::Network(format!("{e:?}")))?;
        }

        // pas de Content-Type explicite : le navigateur pose la boundary
        let resp = self.post("/register").body(data)?.send().await?;
        if !resp.ok() {
            let status = resp.status();
            let text = resp.status_text();
            return match resp.json::<ValidationErrors>().await {
                Ok(v) if !v.errors.is_empty() => {
                    Err(ApiError::Rejected(v.errors.into_iter().map(|e| e.msg).collect()))
                }
                _ => Err(ApiError::Status { status, text }),
            };
        }
        Ok(resp.json().await?)
    }
}

/// Refuse les réponses non-2xx avant tout décodage.
fn ensure_ok(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(ApiError::Status { status: resp.status(), text: resp.status_text() })
    }
}

async fn read_json<U: DeserializeOwned>(builder: RequestBuilder) -> Result<U, ApiError> {
    let resp = ensure_ok(builder.send().await?)?;
    Ok(resp.json().await?)
}

async fn read_empty(builder: RequestBuilder) -> Result<(), ApiError> {
    ensure_ok(builder.send().await?).map(|_| ())
}

#[async_trait(?Send)]
impl SocialApi for ApiClient {
    async fn login(&self, creds: &Credentials) -> Result<LoginResponse, ApiError> {
        let resp = self.post("/login").json(creds)?.send().await?;
        Ok(ensure_ok(resp)?.json().await?)
    }

    async fn current_user(&self, token: &str) -> Result<UserSummary, ApiError> {
        read_json(Self::bearer(self.get("/user"), token)).await
    }

    async fn user(&self, token: &str, id: &str) -> Result<UserSummary, ApiError> {
        read_json(Self::bearer(self.get(&format!("/user/{id}")), token)).await
    }

    async fn follow_status(&self, token: &str, id: &str) -> Result<FollowStatus, ApiError> {
        read_json(Self::bearer(self.get(&format!("/user/following/{id}")), token)).await
    }

    async fn follow(&self, token: &str, id: &str) -> Result<(), ApiError> {
        read_empty(Self::bearer(self.post(&format!("/user/follow/{id}")), token)).await
    }

    async fn unfollow(&self, token: &str, id: &str) -> Result<(), ApiError> {
        read_empty(Self::bearer(self.delete(&format!("/user/unfollow/{id}")), token)).await
    }

    async fn search_users(&self, token: &str, term: &str) -> Result<Vec<SearchHit>, ApiError> {
        let builder = self.get("/search-users").query([("searchTerm", term)]);
        read_json(Self::bearer(builder, token)).await
    }
}

/* ---------------- requêtes annulables ---------------- */

/// Une activation en vol : le `fetch` est coupé par l'`AbortController`,
/// le futur Rust par l'`AbortHandle` (aucune mise à jour d'état après coup).
#[derive(Debug)]
pub struct InFlight {
    controller: Option<AbortController>,
    handle:     AbortHandle,
}

impl InFlight {
    /// Contrôleur du navigateur ; à passer à `ApiClient::with_signal`.
    pub fn browser() -> (Self, Option<AbortSignal>, AbortRegistration) {
        Self::with_controller(AbortController::new().ok())
    }

    pub fn with_controller(
        controller: Option<AbortController>,
    ) -> (Self, Option<AbortSignal>, AbortRegistration) {
        let signal = controller.as_ref().map(AbortController::signal);
        let (handle, registration) = AbortHandle::new_pair();
        (Self { controller, handle }, signal, registration)
    }

    pub fn abort(&self) {
        if let Some(controller) = &self.controller {
            controller.abort();
        }
        self.handle.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.handle.is_aborted()
    }
}

/* ---------------- double de test ---------------- */

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Réponses programmées + journal des appels (`"GET /user/42"`, …).
    #[derive(Default)]
    pub struct FakeApi {
        pub users:     HashMap<String, UserSummary>,
        pub following: HashMap<String, bool>,
        pub hits:      Vec<SearchHit>,
        pub login:     Option<LoginResponse>,
        pub fail_all:  bool,
        pub calls:     RefCell<Vec<String>>,
    }

    impl FakeApi {
        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: String) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            if self.fail_all {
                Err(ApiError::Network("connexion refusée".into()))
            } else {
                Ok(())
            }
        }

        fn not_found() -> ApiError {
            ApiError::Status { status: 404, text: "Not Found".into() }
        }
    }

    #[async_trait(?Send)]
    impl SocialApi for FakeApi {
        async fn login(&self, creds: &Credentials) -> Result<LoginResponse, ApiError> {
            self.record(format!("POST /login {}", creds.email))?;
            self.login.clone().ok_or(ApiError::Status { status: 401, text: "Unauthorized".into() })
        }

        async fn current_user(&self, token: &str) -> Result<UserSummary, ApiError> {
            self.record(format!("GET /user [{token}]"))?;
            self.users.get("me").cloned().ok_or_else(Self::not_found)
        }

        async fn user(&self, token: &str, id: &str) -> Result<UserSummary, ApiError> {
            self.record(format!("GET /user/{id} [{token}]"))?;
            self.users.get(id).cloned().ok_or_else(Self::not_found)
        }

        async fn follow_status(&self, token: &str, id: &str) -> Result<FollowStatus, ApiError> {
            self.record(format!("GET /user/following/{id} [{token}]"))?;
            let is_following = self.following.get(id).copied().unwrap_or(false);
            Ok(FollowStatus { is_following })
        }

        async fn follow(&self, token: &str, id: &str) -> Result<(), ApiError> {
            self.record(format!("POST /user/follow/{id} [{token}]"))
        }

        async fn unfollow(&self, token: &str, id: &str) -> Result<(), ApiError> {
            self.record(format!("DELETE /user/unfollow/{id} [{token}]"))
        }

        async fn search_users(&self, token: &str, term: &str) -> Result<Vec<SearchHit>, ApiError> {
            self.record(format!("GET /search-users?searchTerm={term} [{token}]"))?;
            Ok(self.hits.clone())
        }
    }
}
