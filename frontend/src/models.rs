//! Structures échangées avec l'API et view-models des pages.

use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/*                              utilisateurs                                  */
/* -------------------------------------------------------------------------- */

/// Instantané d'un utilisateur tel que renvoyé par `/login`, `/user` et `/user/:id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id:       i64,
    pub username: String,
    #[serde(default)]
    pub email:    String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio:      Option<String>,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    #[serde(rename = "isFollowing", default, skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
}

/// Ligne de résultat de `/search-users`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SearchHit {
    pub id:       i64,
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FollowStatus {
    #[serde(rename = "isFollowing")]
    pub is_following: bool,
}

/* -------------------------------------------------------------------------- */
/*                         authentification / inscription                     */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub email:    String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user:  Option<UserSummary>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Champs texte du formulaire d'inscription (la photo est passée à part).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterForm {
    pub email:      String,
    pub password:   String,
    pub username:   String,
    pub first_name: String,
    pub last_name:  String,
}

/* -------------------------------------------------------------------------- */
/*                                 session                                    */
/* -------------------------------------------------------------------------- */

/// Preuve d'authentification côté client + utilisateur en cache.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user:  Option<UserSummary>,
}

impl Session {
    /// Token non vide ET utilisateur présents. Un `user` seul ne suffit pas :
    /// aucun appel authentifié n'est possible sans token.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.user.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Utilisateur uniquement si la session est authentifiée.
    pub fn authenticated_user(&self) -> Option<&UserSummary> {
        if self.is_authenticated() {
            self.user.as_ref()
        } else {
            None
        }
    }
}

/// Données résolues par le loader de `/profile/:id`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileView {
    pub profile_user: UserSummary,
    pub is_following: bool,
}

/// Utilisateur factice partagé par les tests des autres modules.
#[cfg(test)]
pub(crate) fn test_user(id: i64, is_admin: bool) -> UserSummary {
    UserSummary {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@sunlight.test"),
        profile_picture: None,
        bio: None,
        is_admin,
        is_following: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, is_admin: bool) -> UserSummary {
        test_user(id, is_admin)
    }

    #[test]
    fn user_reads_api_field_names() {
        let raw = r#"{"id":7,"username":"lea","email":"lea@x.fr","isAdmin":true,"profile_picture":"7.png"}"#;
        let u: UserSummary = serde_json::from_str(raw).unwrap();
        assert!(u.is_admin);
        assert_eq!(u.profile_picture.as_deref(), Some("7.png"));
        assert_eq!(u.bio, None);
    }

    #[test]
    fn user_defaults_missing_flags() {
        let u: UserSummary = serde_json::from_str(r#"{"id":1,"username":"a"}"#).unwrap();
        assert!(!u.is_admin);
        assert_eq!(u.email, "");
        assert_eq!(u.is_following, None);
    }

    #[test]
    fn session_without_token_is_not_authenticated() {
        let s = Session { token: None, user: Some(user(1, false)) };
        assert!(!s.is_authenticated());
        assert!(s.authenticated_user().is_none());

        let s = Session { token: Some(String::new()), user: Some(user(1, false)) };
        assert!(!s.is_authenticated());

        let s = Session { token: Some("t1".into()), user: Some(user(1, false)) };
        assert!(s.is_authenticated());
        assert_eq!(s.authenticated_user().map(|u| u.id), Some(1));
    }
}
