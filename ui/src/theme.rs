//! Light/dark theme: startup resolution, the toggle button, and reaction to
//! the system color-scheme changing underneath us.
//!
//! The document root carries the dark marker class exactly while the dark
//! theme is in effect, and the toggle icon always shows the glyph for the
//! *other* theme. A stored preference always beats the platform signal.

use crate::config::ThemeConfig;
use crate::dom::{self, ColorSchemeSignal, Element, Page};
use api::prefs::theme::resolve_theme;
use api::{PreferenceStore, Theme, UserPrefs};
use dioxus_logger::tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct ThemeParts<E> {
    pub root: E,
    pub toggle: E,
    pub icon: E,
    /// Not required; without it the stored choice can only be flipped.
    pub reset: Option<E>,
}

pub struct ThemeController<E, S, M> {
    parts: Option<ThemeParts<E>>,
    prefs: UserPrefs<S>,
    signal: M,
    config: ThemeConfig,
}

impl<E, S, M> ThemeController<E, S, M>
where
    E: Element,
    S: PreferenceStore,
    M: ColorSchemeSignal,
{
    pub fn new(parts: Option<ThemeParts<E>>, store: S, signal: M, config: ThemeConfig) -> Self {
        let prefs = UserPrefs::with_theme_key(store, config.storage_key.clone());
        Self {
            parts,
            prefs,
            signal,
            config,
        }
    }

    pub fn from_page<P: Page<Element = E>>(page: &P, store: S, signal: M, config: ThemeConfig) -> Self {
        let root = page.root();
        let toggle = dom::lookup(page, &config.toggle);
        let icon = toggle.as_ref().and_then(|t| t.query_within(&config.icon));
        let parts = match (root, toggle, icon) {
            (Some(root), Some(toggle), Some(icon)) => {
                let reset = dom::lookup(page, &config.reset);
                info!("theme: active (reset control: {})", reset.is_some());
                Some(ThemeParts {
                    root,
                    toggle,
                    icon,
                    reset,
                })
            }
            (None, _, _) => {
                info!("theme: inert, missing document root");
                None
            }
            (_, None, _) => {
                info!("theme: inert, missing {}", config.toggle);
                None
            }
            (_, _, None) => {
                info!("theme: inert, missing {} inside {}", config.icon, config.toggle);
                None
            }
        };
        Self::new(parts, store, signal, config)
    }

    pub fn is_active(&self) -> bool {
        self.parts.is_some()
    }

    pub fn parts(&self) -> Option<&ThemeParts<E>> {
        self.parts.as_ref()
    }

    pub fn prefs(&self) -> &UserPrefs<S> {
        &self.prefs
    }

    /// The theme currently in effect, read back from the root marker class.
    pub fn current(&self) -> Option<Theme> {
        let parts = self.parts.as_ref()?;
        Some(Theme::from_prefers_dark(
            parts.root.has_class(&self.config.dark_class),
        ))
    }

    /// Resolves and applies the startup theme.
    pub fn init(&self) -> Option<Theme> {
        self.parts.as_ref()?;
        let stored = self.prefs.theme();
        let theme = resolve_theme(stored, self.signal.prefers_dark());
        if stored.is_some() || self.config.persist_resolved_default {
            self.apply(theme);
        } else {
            self.render(theme);
        }
        debug!("theme: startup {theme} (stored: {stored:?})");
        Some(theme)
    }

    fn render(&self, theme: Theme) {
        let Some(parts) = &self.parts else {
            return;
        };
        parts.root.set_class(&self.config.dark_class, theme.is_dark());
        let (show, hide) = match theme {
            Theme::Light => (&self.config.light_icon_class, &self.config.dark_icon_class),
            Theme::Dark => (&self.config.dark_icon_class, &self.config.light_icon_class),
        };
        parts.icon.remove_class(hide);
        parts.icon.add_class(show);
    }

    /// Shows `theme` and records it as the user's preference.
    ///
    /// Applying the theme already in effect is a no-op on the page.
    pub fn apply(&self, theme: Theme) {
        if self.parts.is_none() {
            return;
        }
        self.render(theme);
        self.prefs.set_theme(theme);
    }

    /// Flips the theme in effect and persists the result.
    pub fn toggle(&self) -> Option<Theme> {
        let next = self.current()?.toggled();
        self.apply(next);
        debug!("theme: toggled to {next}");
        Some(next)
    }

    /// The platform color-scheme changed. Ignored while a preference is stored.
    pub fn system_preference_changed(&self, prefers_dark: bool) -> Option<Theme> {
        self.parts.as_ref()?;
        if self.prefs.has_explicit_theme() {
            debug!("theme: system change ignored, preference is stored");
            return None;
        }
        let theme = Theme::from_prefers_dark(prefers_dark);
        if self.config.persist_resolved_default {
            self.apply(theme);
        } else {
            self.render(theme);
        }
        debug!("theme: following system to {theme}");
        Some(theme)
    }

    /// Forgets the stored preference and follows the platform signal again.
    pub fn reset_to_system(&self) -> Option<Theme> {
        self.parts.as_ref()?;
        self.prefs.clear_theme();
        let theme = Theme::from_prefers_dark(self.signal.prefers_dark());
        self.render(theme);
        debug!("theme: reset to system {theme}");
        Some(theme)
    }
}
