//! Session state machine for the NAAI client. [`SessionManager`] is the sole
//! writer: it recovers a persisted session at startup, runs login/signup/
//! logout, and owns the token store. Everything else — guards, the shell,
//! screens — observes [`SessionState`] through a [`SessionHandle`].
//!
//! Transitions notify observers synchronously and in registration order.
//! Session-mutating operations take a sequence number when issued; a
//! completion whose number is no longer the most recent is discarded, so a
//! slow login resolving after a logout cannot resurrect the session.

use crate::app_lib::{ApiClient, AppError, storage::TokenStore};
use crate::features::auth::client;
use crate::features::auth::types::{AuthResponse, LoginRequest, Role, SignupRequest, User};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// The single source of truth the route gate renders from.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    /// Startup recovery is still in flight; render a placeholder, never redirect.
    Unknown,
    Authenticated(User),
    Unauthenticated,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

type Observer = Rc<dyn Fn(&SessionState)>;

/// Handle returned by [`SessionHandle::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObserverId(u64);

struct SessionCell {
    state: RefCell<SessionState>,
    token: RefCell<Option<String>>,
    observers: RefCell<Vec<(ObserverId, Observer)>>,
    next_observer: Cell<u64>,
}

/// Cheap cloneable view of the session shared by the manager, the API
/// client's token source, and the UI bridge.
#[derive(Clone)]
pub struct SessionHandle {
    cell: Rc<SessionCell>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self {
            cell: Rc::new(SessionCell {
                state: RefCell::new(SessionState::Unknown),
                token: RefCell::new(None),
                observers: RefCell::new(Vec::new()),
                next_observer: Cell::new(0),
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.cell.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.cell.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.cell.state.borrow().is_authenticated()
    }

    /// Registers an observer called synchronously on every transition, in
    /// registration order. Transitions are not coalesced.
    pub fn subscribe(&self, observer: impl Fn(&SessionState) + 'static) -> ObserverId {
        let id = ObserverId(self.cell.next_observer.get());
        self.cell.next_observer.set(id.0 + 1);
        self.cell.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.cell.observers.borrow_mut().retain(|(other, _)| *other != id);
    }

    fn put_token(&self, token: Option<String>) {
        *self.cell.token.borrow_mut() = token;
    }

    fn set_state(&self, state: SessionState) {
        *self.cell.state.borrow_mut() = state.clone();
        // Snapshot first: an observer may subscribe or unsubscribe from
        // within its callback.
        let observers: Vec<Observer> = self
            .cell
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in observers {
            observer(&state);
        }
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the session: the only component that writes the state, the token,
/// and the credential store.
pub struct SessionManager {
    session: SessionHandle,
    api: ApiClient,
    store: Rc<dyn TokenStore>,
    issued: Cell<u64>,
    recovery_started: Cell<bool>,
}

impl SessionManager {
    /// Wires the manager up as the API client's invalidation callback and
    /// returns the shared handle the composition root distributes.
    pub fn new(session: SessionHandle, api: ApiClient, store: Rc<dyn TokenStore>) -> Rc<Self> {
        let manager = Rc::new(Self {
            session,
            api,
            store,
            issued: Cell::new(0),
            recovery_started: Cell::new(false),
        });

        let weak: Weak<Self> = Rc::downgrade(&manager);
        manager.api.set_unauthorized_handler(move || {
            if let Some(manager) = weak.upgrade() {
                manager.clear_session();
            }
        });

        manager
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Recovers a persisted session. Runs once per application lifetime;
    /// calling it again is a programming error and is ignored with a warning.
    pub async fn initialize(&self) {
        if self.recovery_started.replace(true) {
            tracing::warn!("session recovery already ran; ignoring repeat initialize");
            return;
        }

        let Some(token) = self.store.load() else {
            self.session.set_state(SessionState::Unauthenticated);
            return;
        };

        self.session.put_token(Some(token));
        let seq = self.begin_op();

        match client::me(&self.api).await {
            Ok(user) => {
                if self.is_current(seq) {
                    self.session.set_state(SessionState::Authenticated(user));
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "stored token rejected during recovery");
                if self.is_current(seq) {
                    self.store.clear();
                    self.session.put_token(None);
                    self.session.set_state(SessionState::Unauthenticated);
                }
            }
        }
    }

    /// Exchanges credentials for a session. On failure the state is left
    /// untouched and the server's message is returned for the form to show.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AppError> {
        let seq = self.begin_op();
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth = client::login(&self.api, &request).await?;
        self.complete_sign_in(seq, auth);
        Ok(())
    }

    /// Registers an account with the same success/failure semantics as
    /// [`SessionManager::login`]. The role is a closed enum, so an invalid
    /// role never gets this far.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
        role: Role,
    ) -> Result<(), AppError> {
        let seq = self.begin_op();
        let request = SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            name,
            role,
        };
        let auth = client::signup(&self.api, &request).await?;
        self.complete_sign_in(seq, auth);
        Ok(())
    }

    /// Synchronous teardown. A second call while already signed out is a
    /// no-op: no store write, no observer notification.
    pub fn logout(&self) {
        self.clear_session();
    }

    fn complete_sign_in(&self, seq: u64, auth: AuthResponse) {
        if !self.is_current(seq) {
            tracing::warn!("discarding sign-in superseded before it completed");
            return;
        }
        self.store.save(&auth.token);
        self.session.put_token(Some(auth.token));
        self.session.set_state(SessionState::Authenticated(auth.user));
    }

    fn clear_session(&self) {
        // Issue a sequence number even when signed out already, so an
        // in-flight sign-in is invalidated either way.
        self.begin_op();
        if matches!(self.session.state(), SessionState::Unauthenticated) {
            return;
        }
        self.store.clear();
        self.session.put_token(None);
        self.session.set_state(SessionState::Unauthenticated);
    }

    fn begin_op(&self) -> u64 {
        let seq = self.issued.get() + 1;
        self.issued.set(seq);
        seq
    }

    fn is_current(&self, seq: u64) -> bool {
        self.issued.get() == seq
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionHandle, SessionManager, SessionState};
    use crate::app_lib::api::testing::FakeBackend;
    use crate::app_lib::api::{ApiClient, Method};
    use crate::app_lib::errors::AppError;
    use crate::app_lib::storage::{MemoryTokenStore, TokenStore};
    use crate::features::auth::types::Role;
    use std::cell::RefCell;
    use std::rc::Rc;

    const USER: &str = r#"{"id":"u1","name":"Ann","email":"a@x.com","role":"customer","createdAt":"2024-05-01T10:00:00Z"}"#;

    fn me_body() -> String {
        format!(r#"{{"user":{USER}}}"#)
    }

    fn auth_body() -> String {
        format!(r#"{{"token":"tok-1","user":{USER}}}"#)
    }

    fn setup() -> (Rc<FakeBackend>, Rc<MemoryTokenStore>, Rc<SessionManager>) {
        let backend = FakeBackend::new();
        let store = Rc::new(MemoryTokenStore::default());
        let session = SessionHandle::new();
        let token_session = session.clone();
        let api = ApiClient::new(
            "https://api.test",
            backend.clone(),
            Rc::new(move || token_session.token()),
        );
        let manager = SessionManager::new(session, api, store.clone());
        (backend, store, manager)
    }

    fn record_transitions(manager: &SessionManager) -> Rc<RefCell<Vec<SessionState>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        manager
            .session()
            .subscribe(move |state| sink.borrow_mut().push(state.clone()));
        seen
    }

    #[tokio::test]
    async fn initialize_without_a_stored_token_stays_offline() {
        let (backend, _store, manager) = setup();
        assert_eq!(manager.session().state(), SessionState::Unknown);

        manager.initialize().await;

        assert_eq!(manager.session().state(), SessionState::Unauthenticated);
        assert_eq!(backend.request_count(), 0);
    }

    #[tokio::test]
    async fn initialize_recovers_a_session_the_server_accepts() {
        let (backend, store, manager) = setup();
        store.save("tok-9");
        backend.push_json(200, &me_body());

        manager.initialize().await;

        let request = backend.last_request().unwrap();
        assert_eq!(request.url, "https://api.test/auth/me");
        assert_eq!(request.bearer.as_deref(), Some("tok-9"));

        match manager.session().state() {
            SessionState::Authenticated(user) => assert_eq!(user.email, "a@x.com"),
            other => panic!("expected authenticated, got {other:?}"),
        }
        assert_eq!(store.load(), Some("tok-9".to_string()));
    }

    #[tokio::test]
    async fn initialize_cleans_up_a_rejected_token() {
        let (backend, store, manager) = setup();
        store.save("stale");
        backend.push_json(401, r#"{"error":"Token expired"}"#);

        manager.initialize().await;

        assert_eq!(manager.session().state(), SessionState::Unauthenticated);
        assert_eq!(store.load(), None);
        assert_eq!(manager.session().token(), None);
    }

    #[tokio::test]
    async fn initialize_cleans_up_on_a_network_failure_too() {
        let (backend, store, manager) = setup();
        store.save("tok-9");
        backend.push_error(AppError::Network("Unable to reach the server".to_string()));

        manager.initialize().await;

        assert_eq!(manager.session().state(), SessionState::Unauthenticated);
        assert_eq!(store.load(), None);
    }

    #[tokio::test]
    async fn initialize_runs_only_once() {
        let (backend, store, manager) = setup();
        store.save("tok-9");
        backend.push_json(200, &me_body());

        manager.initialize().await;
        manager.initialize().await;

        assert_eq!(backend.request_count(), 1);
    }

    #[tokio::test]
    async fn login_establishes_and_persists_the_session() {
        let (backend, store, manager) = setup();
        manager.initialize().await;
        backend.push_json(200, &auth_body());

        manager.login("a@x.com", "secret1").await.unwrap();

        let request = backend.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "https://api.test/auth/login");
        let payload: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(payload["email"], "a@x.com");
        assert_eq!(payload["password"], "secret1");

        assert!(manager.session().is_authenticated());
        assert_eq!(store.load(), Some("tok-1".to_string()));
        assert_eq!(manager.session().token(), Some("tok-1".to_string()));
    }

    #[tokio::test]
    async fn failed_login_reports_the_server_message_and_changes_nothing() {
        let (backend, store, manager) = setup();
        manager.initialize().await;
        let seen = record_transitions(&manager);
        backend.push_json(401, r#"{"error":"Invalid email or password"}"#);

        let result = manager.login("a@x.com", "wrong").await;

        match result {
            Err(AppError::Unauthorized(message)) => {
                assert_eq!(message, "Invalid email or password");
            }
            other => panic!("expected unauthorized, got {other:?}"),
        }
        assert_eq!(manager.session().state(), SessionState::Unauthenticated);
        assert_eq!(store.load(), None);
        // Already signed out, so the 401 produced no extra transition.
        assert!(seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn server_side_validation_failures_surface_verbatim() {
        let (backend, _store, manager) = setup();
        manager.initialize().await;
        backend.push_json(409, r#"{"error":"Email already registered"}"#);

        let result = manager
            .signup("a@x.com", "secret1", Some("Ann".to_string()), Role::Customer)
            .await;

        match result {
            Err(AppError::Server { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(message, "Email already registered");
            }
            other => panic!("expected server error, got {other:?}"),
        }
        assert_eq!(manager.session().state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn signup_establishes_a_session_the_me_endpoint_confirms() {
        let (backend, store, manager) = setup();
        manager.initialize().await;
        backend.push_json(200, &auth_body());

        manager
            .signup("a@x.com", "secret1", Some("Ann".to_string()), Role::Customer)
            .await
            .unwrap();

        let signup_request = backend.last_request().unwrap();
        assert_eq!(signup_request.url, "https://api.test/auth/signup");
        let payload: serde_json::Value =
            serde_json::from_str(signup_request.body.as_deref().unwrap()).unwrap();
        assert_eq!(payload["role"], "customer");
        assert_eq!(payload["name"], "Ann");

        match manager.session().state() {
            SessionState::Authenticated(user) => {
                assert_eq!(user.email, "a@x.com");
                assert_eq!(user.role, Role::Customer);
            }
            other => panic!("expected authenticated, got {other:?}"),
        }

        // A follow-up whoami with the stored token sees the same user.
        backend.push_json(200, &me_body());
        let user = crate::features::auth::client::me(manager.api()).await.unwrap();
        assert_eq!(user.email, "a@x.com");
        let me_request = backend.last_request().unwrap();
        assert_eq!(me_request.bearer, store.load());
    }

    #[tokio::test]
    async fn login_then_logout_ends_signed_out_with_an_empty_store() {
        let (backend, store, manager) = setup();
        manager.initialize().await;
        backend.push_json(200, &auth_body());

        manager.login("a@x.com", "secret1").await.unwrap();
        manager.logout();

        assert_eq!(manager.session().state(), SessionState::Unauthenticated);
        assert_eq!(store.load(), None);
        assert_eq!(manager.session().token(), None);
    }

    #[tokio::test]
    async fn second_logout_is_an_observable_no_op() {
        let (backend, _store, manager) = setup();
        manager.initialize().await;
        backend.push_json(200, &auth_body());
        manager.login("a@x.com", "secret1").await.unwrap();

        let seen = record_transitions(&manager);
        manager.logout();
        manager.logout();

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0], SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn a_401_on_any_endpoint_tears_the_session_down() {
        let (backend, store, manager) = setup();
        manager.initialize().await;
        backend.push_json(200, &auth_body());
        manager.login("a@x.com", "secret1").await.unwrap();

        backend.push_json(401, r#"{"error":"Token expired"}"#);
        let result: Result<serde_json::Value, AppError> = manager.api().get("/shops").await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert_eq!(manager.session().state(), SessionState::Unauthenticated);
        assert_eq!(store.load(), None);
    }

    #[tokio::test]
    async fn observers_see_every_transition_in_order() {
        let (backend, _store, manager) = setup();
        let seen = record_transitions(&manager);

        manager.initialize().await;
        backend.push_json(200, &auth_body());
        manager.login("a@x.com", "secret1").await.unwrap();
        manager.logout();

        let transitions = seen.borrow();
        assert_eq!(transitions.len(), 3);
        assert_eq!(transitions[0], SessionState::Unauthenticated);
        assert!(transitions[1].is_authenticated());
        assert_eq!(transitions[2], SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn unsubscribed_observers_stop_receiving() {
        let (_backend, _store, manager) = setup();
        let seen = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&seen);
        let id = manager.session().subscribe(move |_| *sink.borrow_mut() += 1);

        manager.initialize().await;
        assert_eq!(*seen.borrow(), 1);

        manager.session().unsubscribe(id);
        manager.logout();
        manager.logout();
        assert_eq!(*seen.borrow(), 1);
    }

    #[tokio::test]
    async fn a_login_resolving_after_logout_is_discarded() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let (backend, store, manager) = setup();
                manager.initialize().await;

                let release = backend.push_gated_json(200, &auth_body());
                let pending = tokio::task::spawn_local({
                    let manager = Rc::clone(&manager);
                    async move { manager.login("a@x.com", "secret1").await }
                });

                // Let the login reach the transport and park on the gate.
                for _ in 0..4 {
                    tokio::task::yield_now().await;
                }
                assert_eq!(backend.request_count(), 1);

                manager.logout();
                release.send(()).unwrap();
                pending.await.unwrap().unwrap();

                assert_eq!(manager.session().state(), SessionState::Unauthenticated);
                assert_eq!(store.load(), None);
                assert_eq!(manager.session().token(), None);
            })
            .await;
    }
}
