//! Light/dark theme state machine
//!
//! The controller owns the current [`Theme`]; the page is only ever a
//! rendering of it.

use serde::{Deserialize, Serialize};

use crate::settings::{PreferenceStore, Preferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a stored value; anything other than `dark`/`light` is `None`
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Initial theme: the stored choice wins, otherwise follow the OS
    pub fn resolve(stored: Option<Theme>, os_prefers_dark: bool) -> Self {
        match stored {
            Some(theme) => theme,
            None if os_prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }
}

/// Where a theme gets displayed
pub trait ThemeView {
    /// Dark: body class on, light icon shown, dark icon hidden.
    /// Light: the reverse.
    fn render(&mut self, theme: Theme);
}

pub struct ThemeController<S: PreferenceStore, V: ThemeView> {
    theme: Theme,
    prefs: Preferences,
    store: S,
    view: V,
}

impl<S: PreferenceStore, V: ThemeView> ThemeController<S, V> {
    /// Resolve the initial theme and render it. Nothing is persisted until
    /// the first toggle, so an unset preference keeps following the OS.
    pub fn init(store: S, mut view: V, os_prefers_dark: bool) -> Self {
        let prefs = Preferences::load(&store);
        let theme = Theme::resolve(prefs.theme, os_prefers_dark);
        view.render(theme);
        log::debug!(
            "Initial theme {} (stored: {:?}, os dark: {})",
            theme.as_str(),
            prefs.theme,
            os_prefers_dark
        );
        Self {
            theme,
            prefs,
            store,
            view,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flip, render and persist; returns the new theme
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.view.render(self.theme);
        self.prefs.theme = Some(self.theme);
        if let Err(e) = self.prefs.save(&mut self.store) {
            log::warn!("Theme preference not saved: {e}");
        }
        log::info!("Theme switched to {}", self.theme.as_str());
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MemoryStore, PreferenceStore};

    /// Mirrors the page: body class plus two icons
    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    struct FakePage {
        body_dark: bool,
        dark_icon_hidden: bool,
        light_icon_hidden: bool,
        renders: usize,
    }

    impl ThemeView for FakePage {
        fn render(&mut self, theme: Theme) {
            self.body_dark = theme.is_dark();
            self.dark_icon_hidden = theme.is_dark();
            self.light_icon_hidden = !theme.is_dark();
            self.renders += 1;
        }
    }

    fn stored(store: &MemoryStore) -> Option<String> {
        store.get("theme")
    }

    #[test]
    fn test_resolve_initial_theme() {
        assert_eq!(Theme::resolve(Some(Theme::Dark), false), Theme::Dark);
        assert_eq!(Theme::resolve(Some(Theme::Light), true), Theme::Light);
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!(Theme::from_str("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_str("light"), Some(Theme::Light));
        assert_eq!(Theme::from_str("Dark"), None);
        assert_eq!(Theme::from_str(""), None);
    }

    #[test]
    fn test_first_load_follows_os_dark() {
        let controller = ThemeController::init(MemoryStore::default(), FakePage::default(), true);
        assert_eq!(controller.theme(), Theme::Dark);
        assert!(controller.view().body_dark);
        assert!(!controller.view().light_icon_hidden);
        assert!(controller.view().dark_icon_hidden);
        // Nothing persisted until the user chooses
        assert_eq!(stored(controller.store()), None);
    }

    #[test]
    fn test_stored_light_beats_os_dark() {
        let store = MemoryStore::with_entry("theme", "light");
        let controller = ThemeController::init(store, FakePage::default(), true);
        assert_eq!(controller.theme(), Theme::Light);
        assert!(!controller.view().body_dark);
        assert!(!controller.view().dark_icon_hidden);
    }

    #[test]
    fn test_toggle_persists_and_renders() {
        let mut controller =
            ThemeController::init(MemoryStore::default(), FakePage::default(), false);
        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(stored(controller.store()).as_deref(), Some("dark"));
        assert!(controller.view().body_dark);
        assert_eq!(controller.view().renders, 2);
    }

    #[test]
    fn test_two_toggles_return_to_dark() {
        let store = MemoryStore::with_entry("theme", "dark");
        let mut controller = ThemeController::init(store, FakePage::default(), false);
        let before = controller.view().clone();

        controller.toggle();
        assert_eq!(controller.theme(), Theme::Light);
        assert_eq!(stored(controller.store()).as_deref(), Some("light"));
        controller.toggle();

        assert_eq!(controller.theme(), Theme::Dark);
        assert_eq!(stored(controller.store()).as_deref(), Some("dark"));
        let after = controller.view();
        assert_eq!(after.body_dark, before.body_dark);
        assert_eq!(after.dark_icon_hidden, before.dark_icon_hidden);
        assert_eq!(after.light_icon_hidden, before.light_icon_hidden);
    }

    #[test]
    fn test_icons_always_complementary() {
        let mut controller =
            ThemeController::init(MemoryStore::default(), FakePage::default(), true);
        for _ in 0..5 {
            controller.toggle();
            let page = controller.view();
            assert_ne!(page.dark_icon_hidden, page.light_icon_hidden);
        }
    }
}
