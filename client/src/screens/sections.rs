//! Thin list/detail screens. Each owns its own data fetching; here they only
//! carry their place in the navigation graph.

use ecoguard_core::ScreenId;
use leptos::*;

use crate::context::use_app;

/// Titled page with a back target and optional onward links.
#[component]
pub fn SectionScreen(
    title: &'static str,
    back: ScreenId,
    #[prop(optional)] links: Vec<(&'static str, ScreenId)>,
) -> impl IntoView {
    let app = use_app();

    view! {
        <div class=format!("screen section-screen screen-{}", title.to_lowercase().replace(' ', "-"))>
            <header class="section-header">
                <button class="icon-button back" on:click=app.go(back)>
                    <span class="icon icon-back"></span>
                </button>
                <h2>{title}</h2>
            </header>
            <div class="section-links">
                {links
                    .into_iter()
                    .map(|(label, target)| view! {
                        <button on:click=app.go(target)>{label}</button>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
