//! Fallback for unrecognized paths: replace straight to the root, whatever
//! the session state is.

use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::{NavigateOptions, hooks::use_navigate};

#[component]
pub fn RedirectHome() -> impl IntoView {
    let navigate = use_navigate();
    Effect::new(move |_| {
        navigate(
            paths::ROOT,
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    });
}
