use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::RequireNoSession;
use crate::features::auth::state::use_auth;
use crate::routes::paths;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

#[derive(Clone)]
struct LoginInput {
    email: String,
    password: String,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <AppShell>
            <RequireNoSession>
                <LoginForm />
            </RequireNoSession>
        </AppShell>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);

    let login_action = Action::new_local(move |input: &LoginInput| {
        let input = input.clone();
        async move { auth.manager().login(&input.email, &input.password).await }
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => navigate(paths::DASHBOARD, Default::default()),
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.trim().is_empty() {
            set_error.set(Some(AppError::Validation(
                "Email and password are required.".to_string(),
            )));
            return;
        }

        login_action.dispatch(LoginInput {
            email: email_value,
            password: password_value,
        });
    };

    view! {
        <form class="max-w-sm mx-auto" on:submit=on_submit>
            <h2 class="text-2xl font-bold text-stone-900 mb-6">"Login"</h2>
            <div class="mb-5">
                <label class="block mb-2 text-sm font-medium text-stone-900" for="email">
                    "Email"
                </label>
                <input
                    id="email"
                    type="email"
                    class="bg-white border border-stone-300 text-stone-900 text-sm rounded-lg focus:ring-amber-500 focus:border-amber-500 block w-full p-2.5"
                    autocomplete="email"
                    placeholder="Enter your email"
                    required
                    on:input=move |event| set_email.set(event_target_value(&event))
                />
            </div>
            <div class="mb-5">
                <label class="block mb-2 text-sm font-medium text-stone-900" for="password">
                    "Password"
                </label>
                <input
                    id="password"
                    type="password"
                    class="bg-white border border-stone-300 text-stone-900 text-sm rounded-lg focus:ring-amber-500 focus:border-amber-500 block w-full p-2.5"
                    autocomplete="current-password"
                    placeholder="Enter your password"
                    required
                    on:input=move |event| set_password.set(event_target_value(&event))
                />
            </div>
            <Button button_type="submit" disabled=login_action.pending()>
                {move || if login_action.pending().get() { "Logging in..." } else { "Login" }}
            </Button>
            {move || {
                login_action
                    .pending()
                    .get()
                    .then_some(view! { <div class="mt-4"><Spinner /></div> })
            }}
            {move || {
                error
                    .get()
                    .map(|err| {
                        view! {
                            <div class="mt-4">
                                <Alert kind=AlertKind::Error message=err.to_string() />
                            </div>
                        }
                    })
            }}
            <p class="mt-6 text-sm text-stone-600">
                "Don't have an account? "
                <A href={paths::SIGNUP} {..} class="text-amber-700 hover:underline">
                    "Sign Up"
                </A>
            </p>
        </form>
    }
}
