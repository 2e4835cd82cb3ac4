use std::rc::Rc;

use ecoguard_core::{ProfileAttributes, ScreenId};
use leptos::*;

use crate::context::use_app;
use crate::validation::{validate_registration, validate_sign_in};

// Successful sign-in and sign-up are routed by the navigation controller when
// the gateway emits SIGNED_IN, so these forms only surface failures.

#[component]
pub fn LoginScreen() -> impl IntoView {
    let app = use_app();
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (loading, set_loading) = create_signal(false);

    let handle_submit = {
        let gateway = Rc::clone(&app.gateway);
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();

            let email_value = email.get();
            let password_value = password.get();
            if let Err(message) = validate_sign_in(&email_value, &password_value) {
                set_error.set(Some(message));
                return;
            }

            set_loading.set(true);
            set_error.set(None);

            let gateway = Rc::clone(&gateway);
            spawn_local(async move {
                if let Err(e) = gateway
                    .sign_in_with_password(email_value.trim(), &password_value)
                    .await
                {
                    tracing::warn!("Sign-in failed: {}", e);
                    set_error.set(Some(e.to_string()));
                    set_loading.set(false);
                }
            });
        }
    };

    view! {
        <div class="screen auth-screen">
            <form on:submit=handle_submit>
                <h2>"Welcome back"</h2>

                {move || error.get().map(|e| view! {
                    <div class="error-message">{e}</div>
                })}

                <input
                    type="email"
                    placeholder="Email"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    disabled=loading
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    disabled=loading
                />

                <button type="submit" disabled=loading>
                    {move || if loading.get() { "Signing in..." } else { "Log in" }}
                </button>
            </form>

            <button type="button" class="link" on:click=app.go(ScreenId::Register)>
                "Create an account"
            </button>
            <button type="button" class="link" on:click=app.go(ScreenId::Onboarding)>
                "Back"
            </button>
        </div>
    }
}

#[component]
pub fn RegisterScreen() -> impl IntoView {
    let app = use_app();
    let (full_name, set_full_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (accepted_terms, set_accepted_terms) = create_signal(false);
    let (error, set_error) = create_signal(Option::<String>::None);
    let (loading, set_loading) = create_signal(false);

    let handle_submit = {
        let gateway = Rc::clone(&app.gateway);
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();

            let name_value = full_name.get();
            let email_value = email.get();
            let password_value = password.get();
            if let Err(message) = validate_registration(
                &name_value,
                &email_value,
                &password_value,
                &confirm.get(),
                accepted_terms.get(),
            ) {
                set_error.set(Some(message));
                return;
            }

            set_loading.set(true);
            set_error.set(None);

            let gateway = Rc::clone(&gateway);
            spawn_local(async move {
                let profile = ProfileAttributes {
                    full_name: name_value.trim().to_string(),
                    avatar_url: None,
                };
                if let Err(e) = gateway
                    .sign_up(email_value.trim(), &password_value, profile)
                    .await
                {
                    tracing::warn!("Sign-up failed: {}", e);
                    set_error.set(Some(e.to_string()));
                    set_loading.set(false);
                }
            });
        }
    };

    view! {
        <div class="screen auth-screen">
            <form on:submit=handle_submit>
                <h2>"Join EcoGuard"</h2>

                {move || error.get().map(|e| view! {
                    <div class="error-message">{e}</div>
                })}

                <input
                    type="text"
                    placeholder="Full name"
                    prop:value=full_name
                    on:input=move |ev| set_full_name.set(event_target_value(&ev))
                    disabled=loading
                />
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    disabled=loading
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    disabled=loading
                />
                <input
                    type="password"
                    placeholder="Confirm password"
                    prop:value=confirm
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                    disabled=loading
                />

                <label class="terms-check">
                    <input
                        type="checkbox"
                        prop:checked=accepted_terms
                        on:change=move |ev| set_accepted_terms.set(event_target_checked(&ev))
                    />
                    "I accept the "
                    <button type="button" class="link" on:click=app.go(ScreenId::Terms)>
                        "terms"
                    </button>
                </label>

                <button type="submit" disabled=loading>
                    {move || if loading.get() { "Creating account..." } else { "Sign up" }}
                </button>
            </form>

            <button type="button" class="link" on:click=app.go(ScreenId::Login)>
                "I already have an account"
            </button>
        </div>
    }
}
