use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use std::rc::Rc;
use wasm_bindgen::JsCast;

use ecoguard_core::{
    ControllerConfig, NavigationController, ScreenId, ThemeStore, UserSummary,
};

mod api;
mod components;
mod context;
mod gateway;
mod screens;
mod validation;

use api::ApiClient;
use components::bottom_nav::BottomNav;
use context::{AppContext, DocumentTheme, SignalCell, WasmSpawner};
use gateway::{HttpSessionGateway, LocalSessionStore};
use screens::ScreenOutlet;

#[component]
fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="EcoGuard"/>
        <Meta name="viewport" content="width=device-width, initial-scale=1.0"/>

        <Router>
            <Routes>
                <Route path="/" view=EcoGuard/>
                <Route path="/*any" view=NotFound/>
            </Routes>
        </Router>
    }
}

/// Owns the navigation controller for the lifetime of the page.
#[component]
fn EcoGuard() -> impl IntoView {
    let config = ControllerConfig::default();
    let gateway = Rc::new(HttpSessionGateway::new(ApiClient::new(), LocalSessionStore));
    let theme = ThemeStore::new(SignalCell::new(config.initial_theme), Rc::new(DocumentTheme));

    let mut controller = NavigationController::mount(
        &config,
        SignalCell::new(ScreenId::Splash),
        UserSummary::default(),
        Rc::clone(&gateway),
        &WasmSpawner,
    );

    provide_context(AppContext {
        navigator: controller.navigator(),
        theme,
        gateway,
    });

    on_cleanup(move || controller.teardown());

    view! {
        <div class="app-container">
            <main>
                <ScreenOutlet/>
            </main>
            <BottomNav/>
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h2>"404 - Page Not Found"</h2>
            <a href="/">"Go Home"</a>
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    // Initialize tracing for WASM
    tracing_wasm::set_as_global_default();

    // Mount the app to the #app div
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let Some(app_div) = document.get_element_by_id("app") {
                leptos::mount_to(app_div.unchecked_into(), || view! { <App/> });
            }
        }
    }
}
