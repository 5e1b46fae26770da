use crate::components::AppShell;
use crate::routes::paths;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <AppShell>
            <div class="text-center py-16">
                <h1 class="text-3xl font-bold text-stone-900">"Welcome to NAAI"</h1>
                <p class="mt-3 text-stone-600">
                    "Find a chair you trust, or put your own shop on the map."
                </p>
                <div class="mt-8 flex justify-center gap-4">
                    <A
                        href={paths::LOGIN}
                        {..}
                        class="px-6 py-3 rounded-lg bg-amber-700 text-white hover:bg-amber-800 font-medium"
                    >
                        "Login"
                    </A>
                    <A
                        href={paths::SIGNUP}
                        {..}
                        class="px-6 py-3 rounded-lg border border-stone-300 text-stone-700 hover:bg-stone-100 font-medium"
                    >
                        "Sign Up"
                    </A>
                </div>
            </div>
        </AppShell>
    }
}
