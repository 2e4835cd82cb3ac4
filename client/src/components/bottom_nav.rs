use ecoguard_core::NAV_TABS;
use leptos::*;

use crate::context::use_app;

#[component]
pub fn BottomNav() -> impl IntoView {
    let app = use_app();
    let navigator = app.navigator.clone();
    let visible = move || navigator.current_screen().shows_bottom_nav();

    view! {
        <Show when=visible>
            <nav class="bottom-nav">
                {NAV_TABS
                    .into_iter()
                    .map(|tab| {
                        let navigator = app.navigator.clone();
                        let reader = navigator.clone();
                        view! {
                            <button
                                class="nav-item"
                                class:active=move || tab.is_active(reader.current_screen())
                                on:click=move |_| navigator.navigate_to(tab.screen)
                            >
                                <span class=format!("icon icon-{}", tab.icon)></span>
                                <span class="label">{tab.label}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </Show>
    }
}
