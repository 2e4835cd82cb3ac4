use ecoguard_core::ScreenId;
use leptos::*;

use crate::context::use_app;

#[component]
pub fn HomeScreen() -> impl IntoView {
    let app = use_app();
    let summary = app.navigator.user_data().clone();
    let theme = app.theme.clone();
    let toggle_theme = {
        let theme = app.theme.clone();
        move |_: ev::MouseEvent| theme.toggle_theme()
    };

    view! {
        <div class="screen home-screen">
            <header class="home-header">
                <div>
                    <p class="greeting">"Hello,"</p>
                    <h2>{summary.name.clone()}</h2>
                </div>
                <button class="icon-button" on:click=toggle_theme>
                    <span class=move || {
                        if theme.theme().is_dark() { "icon icon-sun" } else { "icon icon-moon" }
                    }></span>
                </button>
                <button class="icon-button" on:click=app.go(ScreenId::Notifications)>
                    <span class="icon icon-bell"></span>
                </button>
            </header>

            <section class="level-card">
                <span>{format!("Level {}", summary.level)}</span>
                <span>{format!("{} pts", summary.points)}</span>
            </section>

            <section class="impact-grid">
                <div class="impact">
                    <strong>{summary.recycled_items}</strong>
                    <span>"items recycled"</span>
                </div>
                <div class="impact">
                    <strong>{format!("{:.1} kWh", summary.energy_saved_kwh)}</strong>
                    <span>"energy saved"</span>
                </div>
                <div class="impact">
                    <strong>{format!("{:.1} kg", summary.co2_reduced_kg)}</strong>
                    <span>"CO2 reduced"</span>
                </div>
            </section>

            <section class="quick-actions">
                <button on:click=app.go(ScreenId::PhotoChallenge)>"Photo challenge"</button>
                <button on:click=app.go(ScreenId::CreateChallenge)>"New challenge"</button>
                <button on:click=app.go(ScreenId::EcoTips)>"Eco tips"</button>
            </section>
        </div>
    }
}
