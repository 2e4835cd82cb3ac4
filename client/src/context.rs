//! Browser bindings for the core stores and the context every screen reads.

use std::rc::Rc;
use std::time::Duration;

use ecoguard_core::theme::{DARK_CLASS, THEME_ATTRIBUTE};
use ecoguard_core::{
    Navigator, PresentationTarget, ScreenId, SessionGateway, Spawner, StateCell, Theme,
    ThemeStore,
};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use leptos::*;

/// Reactive state cell: reads subscribe the calling view to changes.
pub struct SignalCell<T: 'static>(RwSignal<T>);

impl<T: 'static> SignalCell<T> {
    pub fn new(value: T) -> Self {
        Self(create_rw_signal(value))
    }
}

impl<T: 'static> Clone for SignalCell<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for SignalCell<T> {}

impl<T: Clone + 'static> StateCell<T> for SignalCell<T> {
    fn get(&self) -> T {
        self.0.get()
    }

    fn set(&self, value: T) {
        self.0.set(value);
    }
}

/// Writes the theme onto `<html>`.
pub struct DocumentTheme;

impl PresentationTarget for DocumentTheme {
    fn apply_theme(&self, theme: Theme) {
        let root = gloo_utils::document_element();
        if let Err(e) = root.set_attribute(THEME_ATTRIBUTE, theme.as_str()) {
            tracing::warn!("Failed to set theme attribute: {:?}", e);
        }
        if let Err(e) = root.class_list().toggle_with_force(DARK_CLASS, theme.is_dark()) {
            tracing::warn!("Failed to toggle theme class: {:?}", e);
        }
    }
}

#[derive(Clone, Copy)]
pub struct WasmSpawner;

impl Spawner for WasmSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::sleep(duration).boxed_local()
    }
}

/// Shared state handed to every screen.
///
/// Screens read through these handles and mutate only via the navigator,
/// the theme store and the gateway's operations.
#[derive(Clone)]
pub struct AppContext {
    pub navigator: Navigator<SignalCell<ScreenId>>,
    pub theme: ThemeStore<SignalCell<Theme>>,
    pub gateway: Rc<dyn SessionGateway>,
}

impl AppContext {
    /// Click handler that moves to `screen`.
    pub fn go(&self, screen: ScreenId) -> impl Fn(ev::MouseEvent) + Clone + 'static {
        let navigator = self.navigator.clone();
        move |_| navigator.navigate_to(screen)
    }
}

/// Memoized read: writes of an equal value do not wake dependents, so
/// re-setting the current screen does not remount it.
pub fn distinct<T, F>(read: F) -> Memo<T>
where
    T: PartialEq + 'static,
    F: Fn() -> T + 'static,
{
    create_memo(move |_| read())
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
