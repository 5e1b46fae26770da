//! Route guards over the session state. The decisions are pure functions of
//! [`SessionState`] so they can be tested without a DOM; the components wrap
//! screen content, show a placeholder while recovery is still in flight, and
//! redirect with `replace` so Back never returns to a screen the user could
//! not see.

use crate::components::Spinner;
use crate::features::auth::session::SessionState;
use crate::features::auth::state::use_auth;
use crate::features::auth::types::Role;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::{NavigateOptions, hooks::use_navigate};

/// What a guard decided for the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    Render,
    Loading,
    Redirect(&'static str),
}

/// Guarded screens: render when signed in, send to login otherwise.
pub fn require_session(state: &SessionState) -> GateOutcome {
    match state {
        SessionState::Unknown => GateOutcome::Loading,
        SessionState::Authenticated(_) => GateOutcome::Render,
        SessionState::Unauthenticated => GateOutcome::Redirect(paths::LOGIN),
    }
}

/// Entry screens (login/signup): the mirror image of [`require_session`].
pub fn require_no_session(state: &SessionState) -> GateOutcome {
    match state {
        SessionState::Unknown => GateOutcome::Loading,
        SessionState::Authenticated(_) => GateOutcome::Redirect(paths::DASHBOARD),
        SessionState::Unauthenticated => GateOutcome::Render,
    }
}

/// Role-restricted screens. A signed-in user with the wrong role goes to the
/// root — being signed in but unauthorized is not a login problem.
pub fn require_role(state: &SessionState, role: Role) -> GateOutcome {
    match require_session(state) {
        GateOutcome::Render => {
            if state.user().is_some_and(|user| user.role == role) {
                GateOutcome::Render
            } else {
                GateOutcome::Redirect(paths::ROOT)
            }
        }
        other => other,
    }
}

fn guarded(outcome: Memo<GateOutcome>, children: ChildrenFn) -> impl IntoView {
    let navigate = use_navigate();

    Effect::new(move |_| {
        if let GateOutcome::Redirect(target) = outcome.get() {
            navigate(
                target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    view! {
        {move || match outcome.get() {
            GateOutcome::Render => children(),
            GateOutcome::Loading => {
                view! {
                    <div class="flex justify-center py-16">
                        <Spinner />
                    </div>
                }
                    .into_any()
            }
            GateOutcome::Redirect(_) => ().into_any(),
        }}
    }
}

#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let outcome = Memo::new(move |_| auth.state.with(require_session));
    guarded(outcome, children)
}

#[component]
pub fn RequireNoSession(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let outcome = Memo::new(move |_| auth.state.with(require_no_session));
    guarded(outcome, children)
}

#[component]
pub fn RequireBarber(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let outcome = Memo::new(move |_| auth.state.with(|state| require_role(state, Role::Barber)));
    guarded(outcome, children)
}

#[cfg(test)]
mod tests {
    use super::{GateOutcome, require_no_session, require_role, require_session};
    use crate::features::auth::session::SessionState;
    use crate::features::auth::types::{Role, User};
    use crate::routes::paths;

    fn user_with_role(role: Role) -> User {
        User {
            id: "u1".to_string(),
            name: Some("Ann".to_string()),
            email: "a@x.com".to_string(),
            role,
            created_at: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn unknown_state_always_loads_and_never_redirects() {
        assert_eq!(require_session(&SessionState::Unknown), GateOutcome::Loading);
        assert_eq!(require_no_session(&SessionState::Unknown), GateOutcome::Loading);
        assert_eq!(
            require_role(&SessionState::Unknown, Role::Barber),
            GateOutcome::Loading
        );
    }

    #[test]
    fn require_session_redirects_signed_out_users_to_login() {
        assert_eq!(
            require_session(&SessionState::Unauthenticated),
            GateOutcome::Redirect(paths::LOGIN)
        );
        assert_eq!(
            require_session(&SessionState::Authenticated(user_with_role(Role::Customer))),
            GateOutcome::Render
        );
    }

    #[test]
    fn require_no_session_sends_signed_in_users_to_the_dashboard() {
        assert_eq!(
            require_no_session(&SessionState::Authenticated(user_with_role(Role::Customer))),
            GateOutcome::Redirect(paths::DASHBOARD)
        );
        assert_eq!(
            require_no_session(&SessionState::Unauthenticated),
            GateOutcome::Render
        );
    }

    #[test]
    fn role_mismatch_goes_to_the_root_not_to_login() {
        assert_eq!(
            require_role(
                &SessionState::Authenticated(user_with_role(Role::Customer)),
                Role::Barber
            ),
            GateOutcome::Redirect(paths::ROOT)
        );
        assert_eq!(
            require_role(
                &SessionState::Authenticated(user_with_role(Role::Barber)),
                Role::Barber
            ),
            GateOutcome::Render
        );
    }

    #[test]
    fn role_check_still_sends_signed_out_users_to_login() {
        assert_eq!(
            require_role(&SessionState::Unauthenticated, Role::Barber),
            GateOutcome::Redirect(paths::LOGIN)
        );
    }
}
