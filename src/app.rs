//! Composition root. Everything with authority over the session is built
//! here, once: the token store, the session handle, the API client reading
//! its token through that handle, and the manager that registers itself as
//! the 401 invalidation callback. Startup recovery is kicked off exactly
//! once before the router renders anything.

use crate::app_lib::{api, config::AppConfig, storage};
use crate::features::auth::session::{SessionHandle, SessionManager};
use crate::features::auth::state::provide_auth;
use crate::routes::AppRoutes;
use leptos::{prelude::*, task::spawn_local};
use leptos_router::components::Router;
use std::rc::Rc;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    let session = SessionHandle::new();
    let token_session = session.clone();
    let client = api::ApiClient::new(
        &config.api_base_url,
        api::default_backend(),
        Rc::new(move || token_session.token()),
    );
    let manager = SessionManager::new(session, client, storage::default_store());
    provide_auth(Rc::clone(&manager));

    spawn_local(async move {
        manager.initialize().await;
    });

    view! {
        <Router>
            <AppRoutes />
        </Router>
    }
}
