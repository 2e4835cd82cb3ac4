use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use crate::cell::StateCell;

/// Root attribute carrying the active theme name.
pub const THEME_ATTRIBUTE: &str = "data-theme";
/// Root class present while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The one place a theme change reaches rendering.
///
/// In the browser this is the document root element; styling keys off the
/// attribute and class set there instead of props threaded through screens.
pub trait PresentationTarget {
    fn apply_theme(&self, theme: Theme);
}

/// Owner of the active theme.
///
/// Clones are handles onto the same cell; screens read through `theme()` and
/// mutate only via `toggle_theme`/`set_theme`.
pub struct ThemeStore<C> {
    theme: C,
    target: Rc<dyn PresentationTarget>,
}

impl<C: Clone> Clone for ThemeStore<C> {
    fn clone(&self) -> Self {
        Self {
            theme: self.theme.clone(),
            target: Rc::clone(&self.target),
        }
    }
}

impl<C: StateCell<Theme>> ThemeStore<C> {
    /// Wraps `theme` and pushes its current value to `target`.
    pub fn new(theme: C, target: Rc<dyn PresentationTarget>) -> Self {
        target.apply_theme(theme.get());
        Self { theme, target }
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn toggle_theme(&self) {
        let next = self.theme.get().toggled();
        tracing::debug!(theme = %next, "toggling theme");
        self.theme.set(next);
        self.target.apply_theme(next);
    }

    pub fn set_theme(&self, theme: Theme) {
        if self.theme.get() == theme {
            return;
        }
        self.theme.set(theme);
        self.target.apply_theme(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::LocalCell;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingTarget {
        applied: RefCell<Vec<Theme>>,
    }

    impl PresentationTarget for RecordingTarget {
        fn apply_theme(&self, theme: Theme) {
            self.applied.borrow_mut().push(theme);
        }
    }

    fn store(initial: Theme) -> (ThemeStore<LocalCell<Theme>>, Rc<RecordingTarget>) {
        let target = Rc::new(RecordingTarget::default());
        let store = ThemeStore::new(LocalCell::new(initial), target.clone());
        (store, target)
    }

    #[test]
    fn test_initial_theme_is_applied() {
        let (store, target) = store(Theme::Dark);
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(*target.applied.borrow(), vec![Theme::Dark]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let (store, target) = store(Theme::Light);
        store.toggle_theme();
        assert_eq!(store.theme(), Theme::Dark);
        store.toggle_theme();
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(
            *target.applied.borrow(),
            vec![Theme::Light, Theme::Dark, Theme::Light]
        );
    }

    #[test]
    fn test_clones_share_theme() {
        let (store, _target) = store(Theme::Light);
        let reader = store.clone();
        store.toggle_theme();
        assert!(reader.theme().is_dark());
    }

    #[test]
    fn test_set_same_theme_does_not_reapply() {
        let (store, target) = store(Theme::Light);
        store.set_theme(Theme::Light);
        assert_eq!(target.applied.borrow().len(), 1);
        store.set_theme(Theme::Dark);
        assert_eq!(target.applied.borrow().len(), 2);
    }
}
