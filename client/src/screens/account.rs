use std::rc::Rc;

use ecoguard_core::{GatewayError, ProfileAttributes, ScreenId, SessionUser, Theme};
use leptos::*;

use crate::context::{use_app, AppContext};

/// Live account details for the session user.
fn account_resource(app: &AppContext) -> Resource<(), Result<Option<SessionUser>, GatewayError>> {
    let gateway = Rc::clone(&app.gateway);
    create_local_resource(
        || (),
        move |_| {
            let gateway = Rc::clone(&gateway);
            async move { gateway.current_user().await }
        },
    )
}

#[component]
pub fn ProfileScreen() -> impl IntoView {
    let app = use_app();
    let account = account_resource(&app);
    let fallback_name = app.navigator.user_data().name.clone();

    view! {
        <div class="screen profile-screen">
            <h2>"Profile"</h2>
            {move || {
                let fallback_name = fallback_name.clone();
                account.get().map(move |result| match result {
                    Ok(Some(user)) => {
                        let name = if user.profile.full_name.is_empty() {
                            fallback_name
                        } else {
                            user.profile.full_name
                        };
                        view! {
                            <div class="profile-card">
                                <h3>{name}</h3>
                                <p>{user.email}</p>
                            </div>
                        }
                        .into_view()
                    }
                    Ok(None) => view! { <p>{fallback_name}</p> }.into_view(),
                    Err(e) => view! { <div class="error-message">{e.to_string()}</div> }.into_view(),
                })
            }}
            <button on:click=app.go(ScreenId::EditProfile)>"Edit profile"</button>
            <button on:click=app.go(ScreenId::Friends)>"Friends"</button>
            <button on:click=app.go(ScreenId::Settings)>"Settings"</button>
        </div>
    }
}

#[component]
pub fn EditProfileScreen() -> impl IntoView {
    let app = use_app();
    let (full_name, set_full_name) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (saving, set_saving) = create_signal(false);

    let handle_submit = {
        let gateway = Rc::clone(&app.gateway);
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();

            let name_value = full_name.get().trim().to_string();
            if name_value.is_empty() {
                set_error.set(Some("Name cannot be empty".to_string()));
                return;
            }

            set_saving.set(true);
            set_error.set(None);

            let gateway = Rc::clone(&gateway);
            spawn_local(async move {
                let profile = ProfileAttributes {
                    full_name: name_value,
                    avatar_url: None,
                };
                // USER_UPDATED moves the app back home on success
                if let Err(e) = gateway.update_user(profile).await {
                    tracing::warn!("Profile update failed: {}", e);
                    set_error.set(Some(e.to_string()));
                    set_saving.set(false);
                }
            });
        }
    };

    view! {
        <div class="screen edit-profile-screen">
            <form on:submit=handle_submit>
                <h2>"Edit profile"</h2>

                {move || error.get().map(|e| view! {
                    <div class="error-message">{e}</div>
                })}

                <input
                    type="text"
                    placeholder=app.navigator.user_data().name.clone()
                    prop:value=full_name
                    on:input=move |ev| set_full_name.set(event_target_value(&ev))
                    disabled=saving
                />
                <button type="submit" disabled=saving>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </form>
            <button class="link" on:click=app.go(ScreenId::Profile)>"Cancel"</button>
        </div>
    }
}

#[component]
pub fn SettingsScreen() -> impl IntoView {
    let app = use_app();
    let (error, set_error) = create_signal(Option::<String>::None);

    let choose = |choice: Theme| {
        let theme = app.theme.clone();
        move |_: ev::MouseEvent| theme.set_theme(choice)
    };
    let is_chosen = |choice: Theme| {
        let theme = app.theme.clone();
        move || theme.theme() == choice
    };

    let sign_out = {
        let gateway = Rc::clone(&app.gateway);
        move |_: ev::MouseEvent| {
            let gateway = Rc::clone(&gateway);
            // SIGNED_OUT moves the app to login
            spawn_local(async move {
                if let Err(e) = gateway.sign_out().await {
                    set_error.set(Some(e.to_string()));
                }
            });
        }
    };

    view! {
        <div class="screen settings-screen">
            <h2>"Settings"</h2>

            {move || error.get().map(|e| view! {
                <div class="error-message">{e}</div>
            })}

            <div class="setting-row appearance">
                <span>"Appearance"</span>
                <button class:active=is_chosen(Theme::Light) on:click=choose(Theme::Light)>
                    "Light"
                </button>
                <button class:active=is_chosen(Theme::Dark) on:click=choose(Theme::Dark)>
                    "Dark"
                </button>
            </div>
            <button class="setting-row" on:click=app.go(ScreenId::Notifications)>
                "Notifications"
            </button>
            <button class="setting-row" on:click=app.go(ScreenId::Terms)>
                "Terms of use"
            </button>
            <button class="setting-row danger" on:click=sign_out>"Sign out"</button>
            <button class="link" on:click=app.go(ScreenId::Profile)>"Back"</button>
        </div>
    }
}
