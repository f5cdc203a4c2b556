use log::debug;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::models::Session;
use crate::store::use_app;
use crate::Route;

/// Condition d'accès d'une route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Session,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    Redirect(Route),
}

/// « pas connecté » → login, « connecté mais pas admin » → accueil.
pub fn decide(need: Requirement, session: &Session) -> GuardOutcome {
    let Some(user) = session.authenticated_user() else {
        return GuardOutcome::Redirect(Route::Login);
    };
    match need {
        Requirement::Admin if !user.is_admin => GuardOutcome::Redirect(Route::Home),
        _ => GuardOutcome::Render,
    }
}

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    pub need: Requirement,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Guard)]
pub fn guard(props: &GuardProps) -> Html {
    let app = use_app();
    match decide(props.need, &app.state().session) {
        GuardOutcome::Render => html! { <>{ for props.children.iter() }</> },
        GuardOutcome::Redirect(to) => {
            debug!("guard {:?} : redirection vers {}", props.need, to.to_path());
            html!(<Redirect<Route> {to} />)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_user;

    fn session(token: Option<&str>, is_admin: Option<bool>) -> Session {
        Session {
            token: token.map(str::to_string),
            user:  is_admin.map(|a| test_user(1, a)),
        }
    }

    #[test]
    fn no_token_goes_to_login_for_every_requirement() {
        for need in [Requirement::Session, Requirement::Admin] {
            assert_eq!(decide(need, &Session::default()), GuardOutcome::Redirect(Route::Login));
            assert_eq!(decide(need, &session(None, Some(true))), GuardOutcome::Redirect(Route::Login));
            assert_eq!(decide(need, &session(Some(""), Some(true))), GuardOutcome::Redirect(Route::Login));
        }
    }

    #[test]
    fn non_admin_on_dashboard_goes_home() {
        let s = session(Some("t1"), Some(false));
        assert_eq!(decide(Requirement::Admin, &s), GuardOutcome::Redirect(Route::Home));
        assert_eq!(decide(Requirement::Session, &s), GuardOutcome::Render);
    }

    #[test]
    fn admin_passes_both_guards() {
        let s = session(Some("t1"), Some(true));
        assert_eq!(decide(Requirement::Admin, &s), GuardOutcome::Render);
        assert_eq!(decide(Requirement::Session, &s), GuardOutcome::Render);
    }

    #[test]
    fn token_without_user_is_not_enough() {
        let s = session(Some("t1"), None);
        assert_eq!(decide(Requirement::Session, &s), GuardOutcome::Redirect(Route::Login));
    }
}
