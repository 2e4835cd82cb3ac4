use ecoguard_core::ScreenId;
use leptos::*;

use crate::context::use_app;

#[component]
pub fn SplashScreen() -> impl IntoView {
    view! {
        <div class="screen splash-screen">
            <div class="logo">"EcoGuard"</div>
            <p class="tagline">"Small habits, big impact"</p>
        </div>
    }
}

const SLIDES: [(&str, &str); 3] = [
    ("Track your habits", "Log recycling, energy and travel choices as you go."),
    ("Take on challenges", "Join weekly challenges and prove them with a photo."),
    ("Grow together", "Compare progress with friends and your community."),
];

#[component]
pub fn OnboardingScreen() -> impl IntoView {
    let app = use_app();
    let (step, set_step) = create_signal(0usize);

    let advance = {
        let navigator = app.navigator.clone();
        move |_: ev::MouseEvent| {
            if step.get() + 1 < SLIDES.len() {
                set_step.update(|s| *s += 1);
            } else {
                navigator.navigate_to(ScreenId::Register);
            }
        }
    };

    view! {
        <div class="screen onboarding-screen">
            {move || {
                let (title, body) = SLIDES[step.get()];
                view! {
                    <div class="slide">
                        <h2>{title}</h2>
                        <p>{body}</p>
                    </div>
                }
            }}
            <div class="dots">
                {(0..SLIDES.len())
                    .map(|i| view! { <span class="dot" class:active=move || step.get() == i></span> })
                    .collect_view()}
            </div>
            <button class="primary" on:click=advance>
                {move || if step.get() + 1 < SLIDES.len() { "Next" } else { "Get started" }}
            </button>
            <button class="link" on:click=app.go(ScreenId::Login)>"Skip"</button>
        </div>
    }
}
