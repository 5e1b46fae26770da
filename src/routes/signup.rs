use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::RequireNoSession;
use crate::features::auth::state::use_auth;
use crate::features::auth::types::Role;
use crate::routes::paths;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use std::str::FromStr;

#[derive(Clone)]
struct SignupInput {
    name: Option<String>,
    email: String,
    password: String,
    role: Role,
}

/// Resolved locally by this screen; never reaches the session manager.
fn validate_passwords(password: &str, confirm: &str) -> Result<(), AppError> {
    if password != confirm {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    if password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    Ok(())
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    view! {
        <AppShell>
            <RequireNoSession>
                <SignUpForm />
            </RequireNoSession>
        </AppShell>
    }
}

#[component]
fn SignUpForm() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (role, set_role) = signal("customer".to_string());
    let (error, set_error) = signal::<Option<AppError>>(None);

    let mismatch = Signal::derive(move || {
        let confirm_value = confirm.get();
        !confirm_value.is_empty() && confirm_value != password.get()
    });

    let signup_action = Action::new_local(move |input: &SignupInput| {
        let SignupInput {
            name,
            email,
            password,
            role,
        } = input.clone();
        async move { auth.manager().signup(&email, &password, name, role).await }
    });

    Effect::new(move |_| {
        if let Some(result) = signup_action.value().get() {
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
        if email_value.is_empty() {
            set_error.set(Some(AppError::Validation("Email is required.".to_string())));
            return;
        }

        let password_value = password.get_untracked();
        if let Err(err) = validate_passwords(&password_value, &confirm.get_untracked()) {
            set_error.set(Some(err));
            return;
        }

        let role_value = match Role::from_str(&role.get_untracked()) {
            Ok(role) => role,
            Err(err) => {
                set_error.set(Some(err));
                return;
            }
        };

        let name_value = name.get_untracked().trim().to_string();
        signup_action.dispatch(SignupInput {
            name: (!name_value.is_empty()).then_some(name_value),
            email: email_value,
            password: password_value,
            role: role_value,
        });
    };

    view! {
        <form class="max-w-sm mx-auto" on:submit=on_submit>
            <h2 class="text-2xl font-bold text-stone-900 mb-6">"Sign Up"</h2>
            <div class="mb-5">
                <label class="block mb-2 text-sm font-medium text-stone-900" for="name">
                    "Name (Optional)"
                </label>
                <input
                    id="name"
                    type="text"
                    class="bg-white border border-stone-300 text-stone-900 text-sm rounded-lg focus:ring-amber-500 focus:border-amber-500 block w-full p-2.5"
                    placeholder="Enter your name"
                    on:input=move |event| set_name.set(event_target_value(&event))
                />
            </div>
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
                <span class="block mb-2 text-sm font-medium text-stone-900">"Register As"</span>
                <div class="flex gap-6">
                    <label class="flex items-center gap-2 text-sm text-stone-700">
                        <input
                            type="radio"
                            name="role"
                            value="customer"
                            prop:checked=move || role.get() == "customer"
                            on:change=move |_| set_role.set("customer".to_string())
                        />
                        "Customer"
                    </label>
                    <label class="flex items-center gap-2 text-sm text-stone-700">
                        <input
                            type="radio"
                            name="role"
                            value="barber"
                            prop:checked=move || role.get() == "barber"
                            on:change=move |_| set_role.set("barber".to_string())
                        />
                        "Barber"
                    </label>
                </div>
            </div>
            <div class="mb-5">
                <label class="block mb-2 text-sm font-medium text-stone-900" for="password">
                    "Password"
                </label>
                <input
                    id="password"
                    type="password"
                    class="bg-white border border-stone-300 text-stone-900 text-sm rounded-lg focus:ring-amber-500 focus:border-amber-500 block w-full p-2.5"
                    autocomplete="new-password"
                    placeholder="Enter your password (min. 6 characters)"
                    required
                    on:input=move |event| set_password.set(event_target_value(&event))
                />
            </div>
            <div class="mb-5">
                <label class="block mb-2 text-sm font-medium text-stone-900" for="confirm-password">
                    "Confirm Password"
                </label>
                <input
                    id="confirm-password"
                    type="password"
                    class="bg-white border border-stone-300 text-stone-900 text-sm rounded-lg focus:ring-amber-500 focus:border-amber-500 block w-full p-2.5"
                    autocomplete="new-password"
                    placeholder="Confirm your password"
                    required
                    on:input=move |event| set_confirm.set(event_target_value(&event))
                />
                <Show when=move || mismatch.get()>
                    <span class="text-xs text-red-600">"Passwords do not match"</span>
                </Show>
            </div>
            <Button button_type="submit" disabled=signup_action.pending()>
                {move || {
                    if signup_action.pending().get() { "Creating account..." } else { "Sign Up" }
                }}
            </Button>
            {move || {
                signup_action
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
                "Already have an account? "
                <A href={paths::LOGIN} {..} class="text-amber-700 hover:underline">
                    "Login"
                </A>
            </p>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::validate_passwords;
    use crate::app_lib::AppError;

    #[test]
    fn mismatched_passwords_fail_before_any_request() {
        let result = validate_passwords("secret1", "secret2");
        match result {
            Err(AppError::Validation(message)) => assert_eq!(message, "Passwords do not match"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn short_passwords_fail_validation() {
        let result = validate_passwords("abc12", "abc12");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn six_characters_is_enough() {
        assert!(validate_passwords("abc123", "abc123").is_ok());
    }
}
