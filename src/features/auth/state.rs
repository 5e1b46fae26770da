//! Leptos bridge for the session. The composition root provides one
//! [`AuthContext`]; its signal is fed by a subscription on the session
//! manager's observer feed, so every transition re-renders guards and
//! screens synchronously.

use crate::features::auth::session::{SessionManager, SessionState};
use crate::features::auth::types::Role;
use leptos::prelude::*;
use std::rc::Rc;

/// Auth session context shared through Leptos.
#[derive(Clone, Copy)]
pub struct AuthContext {
    manager: StoredValue<Rc<SessionManager>, LocalStorage>,
    pub state: RwSignal<SessionState>,
    pub is_authenticated: Signal<bool>,
}

impl AuthContext {
    pub fn manager(&self) -> Rc<SessionManager> {
        self.manager.get_value()
    }

    /// Reactive check for a specific role on the signed-in user.
    pub fn has_role(&self, role: Role) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || {
            state.with(|state| state.user().is_some_and(|user| user.role == role))
        })
    }
}

/// Installs the session context. Called exactly once, from the app root.
pub fn provide_auth(manager: Rc<SessionManager>) -> AuthContext {
    let state = RwSignal::new(manager.session().state());
    manager
        .session()
        .subscribe(move |next| state.set(next.clone()));

    let is_authenticated = Signal::derive(move || state.with(SessionState::is_authenticated));
    let context = AuthContext {
        manager: StoredValue::new_local(manager),
        state,
        is_authenticated,
    };
    provide_context(context);
    context
}

/// Returns the context installed by the composition root.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext is provided at the app root")
}
