use super::store::PreferenceStore;
use super::theme::Theme;
use dioxus_logger::tracing::warn;
use std::str::FromStr;

/// Key under which the theme preference is persisted unless configured otherwise.
pub const DEFAULT_THEME_KEY: &str = "theme";

/// Typed access to the user's persisted preferences.
///
/// Store failures never reach the caller. A read that fails, or a stored
/// value that is neither `"light"` nor `"dark"`, counts as "no preference".
#[derive(Debug, Clone)]
pub struct UserPrefs<S> {
    store: S,
    theme_key: String,
}

impl<S: PreferenceStore> UserPrefs<S> {
    pub fn new(store: S) -> Self {
        Self::with_theme_key(store, DEFAULT_THEME_KEY)
    }

    pub fn with_theme_key(store: S, theme_key: impl Into<String>) -> Self {
        Self {
            store,
            theme_key: theme_key.into(),
        }
    }

    pub fn theme_key(&self) -> &str {
        &self.theme_key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The explicit theme preference, if one is stored.
    pub fn theme(&self) -> Option<Theme> {
        let raw = match self.store.get(&self.theme_key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("{e}");
                return None;
            }
        };
        match Theme::from_str(&raw) {
            Ok(theme) => Some(theme),
            Err(_) => {
                warn!("ignoring unrecognized stored theme {raw:?}");
                None
            }
        }
    }

    pub fn has_explicit_theme(&self) -> bool {
        self.theme().is_some()
    }

    pub fn set_theme(&self, theme: Theme) {
        if let Err(e) = self.store.set(&self.theme_key, theme.as_str()) {
            warn!("{e}");
        }
    }

    pub fn clear_theme(&self) {
        if let Err(e) = self.store.remove(&self.theme_key) {
            warn!("{e}");
        }
    }
}
