use log::error;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::SocialApi;
use crate::error::ApiError;
use crate::guard::{Guard, Requirement};
use crate::loader::{profile_loader, render_loaded, use_loader};
use crate::models::{ProfileView, UserSummary};
use crate::popup::Popup;
use crate::store::{use_app, AppAction};
use crate::Route;

/* -------------------------------------------------------------------------- */
/*                               abonnement                                   */
/* -------------------------------------------------------------------------- */

/// Un seul appel ; l'état n'est à mettre à jour qu'en cas de succès.
pub async fn set_following<A: SocialApi + ?Sized>(
    api: &A,
    token: &str,
    id: &str,
    follow: bool,
) -> Result<bool, ApiError> {
    if follow {
        api.follow(token, id).await?;
    } else {
        api.unfollow(token, id).await?;
    }
    Ok(follow)
}

/* -------------------------------------------------------------------------- */
/*                         route : loader + garde                             */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
pub struct ProfileRouteProps {
    /// `None` pour `/profile` sans identifiant.
    #[prop_or_default]
    pub id: Option<String>,
}

#[function_component(ProfileRoute)]
pub fn profile_route(props: &ProfileRouteProps) -> Html {
    let app = use_app();

    let state = {
        let api     = app.api.clone();
        let session = app.session().clone();
        let deps    = (props.id.clone(), session.token.clone());
        use_loader(deps, move |(id, _): &(Option<String>, Option<String>), signal| {
            let id  = id.clone();
            let api = api.with_signal(signal);
            async move { profile_loader(&api, &session, id.as_deref()).await }
        })
    };

    render_loaded(&*state, |view| {
        let id = view.profile_user.id.to_string();
        html! {
            <Guard need={Requirement::Session}>
                <ProfilePage key={id.clone()} id={id.clone()} view={view.clone()} />
            </Guard>
        }
    })
}

/* -------------------------------------------------------------------------- */
/*                                  page                                      */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
pub struct ProfilePageProps {
    pub id:   String,
    pub view: ProfileView,
}

#[derive(Properties, PartialEq)]
struct ProfileCardProps {
    user: UserSummary,
}

#[function_component(ProfileCard)]
fn profile_card(props: &ProfileCardProps) -> Html {
    let app = use_app();
    let u = &props.user;
    let picture = match &u.profile_picture {
        Some(file) => html!(<img class="profile-picture" src={app.config.profile_picture_url(file)} alt={format!("Image de {}", u.username)} />),
        None => html!(<img class="profile-picture" src="/assets/default_image.png" alt="Default user image" />),
    };

    html! {
        <>
            { picture }
            <h5 class="profile-name">{ &u.username }</h5>
            {
                match &u.bio {
                    Some(bio) => html!(<p>{ bio }</p>),
                    None => Html::default(),
                }
            }
        </>
    }
}

#[function_component(ProfilePage)]
pub fn profile_page(props: &ProfilePageProps) -> Html {
    let app          = use_app();
    let navigator    = use_navigator();
    let me           = use_state(|| None::<UserSummary>);
    let is_following = use_state(|| props.view.is_following);
    let error        = use_state(|| None::<String>);

    let token = app.session().token().unwrap_or_default().to_string();

    /* ----- utilisateur courant : hors loader, la page s'affiche sans lui ----- */
    {
        let app       = app.clone();
        let me        = me.clone();
        let token     = token.clone();
        use_effect_with(props.id.clone(), move |_| {
            spawn_local(async move {
                match app.api.current_user(&token).await {
                    Ok(user) => {
                        me.set(Some(user.clone()));
                        app.dispatch(AppAction::UserRefreshed(user));
                    }
                    Err(e) => {
                        error!("Erreur lors de la récupération des données utilisateur : {e}");
                        if let Some(nav) = &navigator {
                            nav.push(&Route::Login);
                        }
                    }
                }
            });
            || ()
        });
    }

    let on_toggle = {
        let app          = app.clone();
        let id           = props.id.clone();
        let is_following = is_following.clone();
        let error        = error.clone();

        Callback::from(move |follow: bool| {
            let api          = app.api.clone();
            let token        = token.clone();
            let id           = id.clone();
            let is_following = is_following.clone();
            let error        = error.clone();
            spawn_local(async move {
                match set_following(&api, &token, &id, follow).await {
                    Ok(now) => is_following.set(now),
                    Err(e) => {
                        error!("abonnement {id} ({follow}) : {e}");
                        let msg = if follow {
                            "Erreur lors du suivi de l'utilisateur."
                        } else {
                            "Erreur lors de l'annulation du suivi de l'utilisateur."
                        };
                        error.set(Some(msg.into()));
                    }
                }
            });
        })
    };

    let on_close = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    let profile_user = &props.view.profile_user;
    let own = (*me).as_ref().filter(|u| u.id == profile_user.id);

    html! {
        <section class="profile">
            {
                match &*error {
                    Some(msg) => html!(<Popup message={msg.clone()} {on_close} />),
                    None => Html::default(),
                }
            }
            {
                match own {
                    Some(user) => html!(<ProfileCard user={user.clone()} />),
                    None => {
                        let follow = !*is_following;
                        let (label, class) = if follow {
                            ("Suivre", "follow")
                        } else {
                            ("Se désabonner", "unfollow")
                        };
                        let onclick = Callback::from(move |_: MouseEvent| on_toggle.emit(follow));
                        html! {
                            <>
                                <ProfileCard user={profile_user.clone()} />
                                <button {class} {onclick}>{ label }</button>
                            </>
                        }
                    }
                }
            }
        </section>
    }
}
