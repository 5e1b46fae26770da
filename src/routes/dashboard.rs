use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::auth::RequireSession;
use crate::features::auth::client;
use crate::features::auth::state::use_auth;
use crate::features::auth::types::User;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <AppShell>
            <RequireSession>
                <DashboardContent />
            </RequireSession>
        </AppShell>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    // The profile is never cached durably, so re-fetch it on entry and fall
    // back to the session copy while the request is out.
    let profile = LocalResource::new(move || async move {
        let manager = auth.manager();
        client::me(manager.api()).await
    });

    let user = Signal::derive(move || {
        profile
            .get()
            .and_then(Result::ok)
            .or_else(|| auth.state.with(|state| state.user().cloned()))
    });

    let on_logout = move |_| {
        auth.manager().logout();
        navigate(paths::LOGIN, Default::default());
    };

    view! {
        <div class="max-w-2xl mx-auto bg-white rounded-xl border border-stone-200 p-8">
            <div class="flex items-center justify-between mb-8">
                <h1 class="text-2xl font-bold text-stone-900">"Welcome to Your Dashboard"</h1>
                <button
                    type="button"
                    class="px-4 py-2 rounded-lg border border-stone-300 text-stone-700 hover:bg-stone-100 text-sm"
                    on:click=on_logout
                >
                    "Logout"
                </button>
            </div>
            {move || match user.get() {
                Some(user) => view! { <ProfileDetails user=user /> }.into_any(),
                None => view! { <div class="py-8 text-center"><Spinner /></div> }.into_any(),
            }}
            {move || {
                profile
                    .get()
                    .and_then(Result::err)
                    .map(|err| {
                        view! {
                            <div class="mt-4">
                                <Alert kind=AlertKind::Error message=err.to_string() />
                            </div>
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn ProfileDetails(user: User) -> impl IntoView {
    view! {
        <dl class="space-y-3 text-sm">
            <div class="flex gap-2">
                <dt class="font-medium text-stone-500 w-32">"Name"</dt>
                <dd class="text-stone-900">
                    {user.name.clone().unwrap_or_else(|| "Not provided".to_string())}
                </dd>
            </div>
            <div class="flex gap-2">
                <dt class="font-medium text-stone-500 w-32">"Email"</dt>
                <dd class="text-stone-900">{user.email.clone()}</dd>
            </div>
            <div class="flex gap-2">
                <dt class="font-medium text-stone-500 w-32">"User ID"</dt>
                <dd class="text-stone-900">{user.id.clone()}</dd>
            </div>
            <div class="flex gap-2">
                <dt class="font-medium text-stone-500 w-32">"Role"</dt>
                <dd>
                    <span class="px-2 py-0.5 rounded-full bg-amber-100 text-amber-800 text-xs font-medium">
                        {user.role.label()}
                    </span>
                </dd>
            </div>
            <div class="flex gap-2">
                <dt class="font-medium text-stone-500 w-32">"Member Since"</dt>
                <dd class="text-stone-900">{user.created_at.clone()}</dd>
            </div>
        </dl>
    }
}
