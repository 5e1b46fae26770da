//! Shared layout wrapper with the top navigation bar. Links react to the
//! session state, and the shop-management link only shows for barbers.
//! Navigation is a UX concern here; the guards own access decisions.

use crate::app_lib::GIT_COMMIT_HASH;
use crate::features::auth::state::use_auth;
use crate::features::auth::types::Role;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

/// Wraps routes with a header and main content container.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;
    let is_barber = auth.has_role(Role::Barber);

    // Signing out from a guarded screen lands on the login redirect the
    // gate performs on the next render.
    let on_sign_out = move |_| {
        auth.manager().logout();
    };

    view! {
        <div class="min-h-screen flex flex-col bg-stone-50">
            <header class="bg-white border-b border-stone-200">
                <nav class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4">
                    <A
                        href={paths::ROOT}
                        {..}
                        class="text-xl font-semibold text-stone-900 whitespace-nowrap"
                    >
                        "✂️ NAAI"
                    </A>
                    <div class="flex items-center gap-5 font-medium text-sm">
                        <A href={paths::ROOT} {..} class="text-stone-700 hover:text-amber-700">
                            "Home"
                        </A>
                        <Show
                            when=move || is_authenticated.get()
                            fallback=move || {
                                view! {
                                    <A
                                        href={paths::LOGIN}
                                        {..}
                                        class="text-stone-700 hover:text-amber-700"
                                    >
                                        "Login"
                                    </A>
                                    <A
                                        href={paths::SIGNUP}
                                        {..}
                                        class="px-4 py-2 rounded-lg bg-amber-700 text-white hover:bg-amber-800"
                                    >
                                        "Sign Up"
                                    </A>
                                }
                            }
                        >
                            <Show when=move || is_barber.get()>
                                <A
                                    href={paths::BARBER_DASHBOARD}
                                    {..}
                                    class="text-stone-700 hover:text-amber-700"
                                >
                                    "My Shop"
                                </A>
                            </Show>
                            <A
                                href={paths::DASHBOARD}
                                {..}
                                class="text-stone-700 hover:text-amber-700"
                            >
                                "Dashboard"
                            </A>
                            <button
                                type="button"
                                class="px-4 py-2 rounded-lg border border-stone-300 text-stone-700 hover:bg-stone-100"
                                on:click=on_sign_out
                            >
                                "Logout"
                            </button>
                        </Show>
                    </div>
                </nav>
            </header>
            <main class="flex-1">
                <div class="container mx-auto p-4 mt-6">{children()}</div>
            </main>
            <footer class="py-4 text-center text-xs text-stone-400">
                "NAAI · build " {GIT_COMMIT_HASH}
            </footer>
        </div>
    }
}
