//! The binary display theme and its resolution rules.

/// The effective display theme of the page.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Debug,
    Default,
    strum::EnumIs,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The literal value written to the preference store.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Returns the opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Maps the platform "prefers dark" signal onto a theme.
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

/// Picks the effective theme at startup.
///
/// A stored preference always wins. Without one, the platform color-scheme
/// signal decides.
pub fn resolve_theme(stored: Option<Theme>, prefers_dark: bool) -> Theme {
    stored.unwrap_or_else(|| Theme::from_prefers_dark(prefers_dark))
}
