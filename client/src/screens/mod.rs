mod account;
mod auth;
mod home;
mod intro;
mod sections;

use ecoguard_core::ScreenId;
use leptos::*;

use crate::context::{distinct, use_app};
use account::{EditProfileScreen, ProfileScreen, SettingsScreen};
use auth::{LoginScreen, RegisterScreen};
use home::HomeScreen;
use intro::{OnboardingScreen, SplashScreen};
use sections::SectionScreen;

fn render_screen(screen: ScreenId) -> View {
    match screen {
        ScreenId::Splash => view! { <SplashScreen/> }.into_view(),
        ScreenId::Onboarding => view! { <OnboardingScreen/> }.into_view(),
        ScreenId::Login => view! { <LoginScreen/> }.into_view(),
        ScreenId::Register => view! { <RegisterScreen/> }.into_view(),
        ScreenId::Home => view! { <HomeScreen/> }.into_view(),
        ScreenId::Profile => view! { <ProfileScreen/> }.into_view(),
        ScreenId::EditProfile => view! { <EditProfileScreen/> }.into_view(),
        ScreenId::Settings => view! { <SettingsScreen/> }.into_view(),
        ScreenId::Challenges => view! {
            <SectionScreen
                title="Challenges"
                back=ScreenId::Home
                links=vec![
                    ("Create a challenge", ScreenId::CreateChallenge),
                    ("Photo challenge", ScreenId::PhotoChallenge),
                ]
            />
        }
        .into_view(),
        ScreenId::Statistics => {
            view! { <SectionScreen title="Statistics" back=ScreenId::Home/> }.into_view()
        }
        ScreenId::Community => view! {
            <SectionScreen
                title="Community"
                back=ScreenId::Home
                links=vec![("Friends", ScreenId::Friends), ("Chat", ScreenId::Chat)]
            />
        }
        .into_view(),
        ScreenId::Notifications => {
            view! { <SectionScreen title="Notifications" back=ScreenId::Home/> }.into_view()
        }
        ScreenId::EcoTips => {
            view! { <SectionScreen title="Eco Tips" back=ScreenId::Home/> }.into_view()
        }
        ScreenId::Terms => {
            view! { <SectionScreen title="Terms" back=ScreenId::Register/> }.into_view()
        }
        ScreenId::PhotoChallenge => view! {
            <SectionScreen title="Photo Challenge" back=ScreenId::Challenges/>
        }
        .into_view(),
        ScreenId::Friends => view! {
            <SectionScreen
                title="Friends"
                back=ScreenId::Community
                links=vec![("Chat", ScreenId::Chat)]
            />
        }
        .into_view(),
        ScreenId::Chat => {
            view! { <SectionScreen title="Chat" back=ScreenId::Friends/> }.into_view()
        }
        ScreenId::CreateChallenge => view! {
            <SectionScreen title="Create Challenge" back=ScreenId::Challenges/>
        }
        .into_view(),
    }
}

/// Renders whichever screen the navigator currently points at.
#[component]
pub fn ScreenOutlet() -> impl IntoView {
    let app = use_app();
    let screen = distinct(move || app.navigator.current_screen());
    move || render_screen(screen.get())
}
