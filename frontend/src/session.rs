//! Session Store : token + utilisateur en cache, persistés dans deux cookies
//! scopés sur `/`. Seul endroit du front qui lit ou écrit ces cookies.

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

use cookie::Cookie;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};

use crate::models::{Session, UserSummary};

pub const TOKEN_COOKIE: &str = "token";
pub const USER_COOKIE:  &str = "user";

/* ---------------- accès clé / valeur ---------------- */

/// Stockage clé / valeur façon `document.cookie`.
pub trait CookieJar {
    /// Valeur décodée du cookie `name`.
    fn get(&self, name: &str) -> Option<String>;
    /// Écrit `name=value; Path=/`.
    fn set(&self, name: &str, value: &str);
}

/// Cookies du document courant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DocumentCookies;

impl DocumentCookies {
    fn document() -> Option<HtmlDocument> {
        Some(window()?.document()?.unchecked_into::<HtmlDocument>())
    }
}

impl CookieJar for DocumentCookies {
    fn get(&self, name: &str) -> Option<String> {
        let raw = Self::document()?.cookie().ok()?;
        find_cookie(&raw, name)
    }

    fn set(&self, name: &str, value: &str) {
        let Some(doc) = Self::document() else {
            warn!("document indisponible, cookie {name} non écrit");
            return;
        };
        if let Err(e) = doc.set_cookie(&encode_cookie(name, value)) {
            warn!("écriture du cookie {name} impossible : {e:?}");
        }
    }
}

/// Jar en mémoire pour les tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryCookies {
    entries: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl CookieJar for MemoryCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.entries.borrow().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) {
        self.entries.borrow_mut().insert(name.to_string(), value.to_string());
    }
}

/// Cherche `name` dans une chaîne `a=1; b=2` et renvoie la valeur décodée.
fn find_cookie(raw: &str, name: &str) -> Option<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|kv| !kv.is_empty())
        .filter_map(|kv| Cookie::parse_encoded(kv).ok())
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

fn encode_cookie(name: &str, value: &str) -> String {
    Cookie::build(name, value)
        .path("/")
        .finish()
        .encoded()
        .to_string()
}

/* ---------------- store ---------------- */

#[derive(Clone, Debug, Default)]
pub struct SessionStore<J = DocumentCookies> {
    jar: J,
}

impl SessionStore<DocumentCookies> {
    pub fn browser() -> Self {
        Self { jar: DocumentCookies }
    }
}

impl<J: CookieJar> SessionStore<J> {
    pub fn new(jar: J) -> Self {
        Self { jar }
    }

    /// Ne lève jamais d'erreur : entrée absente, vide ou illisible → `None`.
    pub fn read(&self) -> Session {
        let token = self.jar.get(TOKEN_COOKIE).filter(|t| !t.is_empty());
        let user = self
            .jar
            .get(USER_COOKIE)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| match serde_json::from_str::<UserSummary>(&raw) {
                Ok(u) => Some(u),
                Err(e) => {
                    warn!("cookie {USER_COOKIE} illisible, ignoré : {e}");
                    None
                }
            });
        Session { token, user }
    }

    pub fn write(&self, token: &str, user: &UserSummary) {
        self.write_token(token);
        match serde_json::to_string(user) {
            Ok(json) => self.jar.set(USER_COOKIE, &json),
            Err(e) => warn!("sérialisation de l'utilisateur impossible : {e}"),
        }
    }

    pub fn write_token(&self, token: &str) {
        self.jar.set(TOKEN_COOKIE, token);
    }

    /// Vide le token. Le cookie `user` est laissé tel quel.
    pub fn clear(&self) {
        self.jar.set(TOKEN_COOKIE, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_user;

    fn store() -> SessionStore<MemoryCookies> {
        SessionStore::new(MemoryCookies::default())
    }

    #[test]
    fn empty_jar_reads_as_empty_session() {
        assert_eq!(store().read(), Session::default());
    }

    #[test]
    fn write_then_read_round_trips() {
        let s = store();
        let mut user = test_user(1, false);
        user.bio = Some("Bonjour; à tous = 100%".into());
        s.write("t1", &user);

        let session = s.read();
        assert_eq!(session.token.as_deref(), Some("t1"));
        assert_eq!(session.user, Some(user));
    }

    #[test]
    fn clear_only_erases_token() {
        let s = store();
        s.write("t1", &test_user(3, true));
        s.clear();

        let session = s.read();
        assert_eq!(session.token, None);
        assert_eq!(session.user.map(|u| u.id), Some(3));
        assert!(!s.read().is_authenticated());
    }

    #[test]
    fn garbage_user_cookie_is_ignored() {
        let jar = MemoryCookies::default();
        jar.set(TOKEN_COOKIE, "t1");
        jar.set(USER_COOKIE, "{pas du json");
        let session = SessionStore::new(jar).read();
        assert_eq!(session.token.as_deref(), Some("t1"));
        assert_eq!(session.user, None);
    }

    #[test]
    fn parses_document_cookie_string() {
        let user = test_user(9, false);
        let json = serde_json::to_string(&user).unwrap();
        let encoded = encode_cookie(USER_COOKIE, &json);
        let pair = encoded.split(';').next().unwrap();
        let raw = format!("theme=dark; token=abc; {pair}");

        assert_eq!(find_cookie(&raw, TOKEN_COOKIE).as_deref(), Some("abc"));
        assert_eq!(find_cookie(&raw, USER_COOKIE), Some(json));
        assert_eq!(find_cookie(&raw, "absent"), None);
    }

    #[test]
    fn encoded_cookie_is_scoped_to_root() {
        let c = encode_cookie(TOKEN_COOKIE, "a b");
        assert!(c.starts_with("token=a%20b"));
        assert!(c.contains("Path=/"));
    }
}
