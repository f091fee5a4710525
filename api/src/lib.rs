//! Shared, platform-independent preference model for the folio page.
//!
//! Nothing in here touches the DOM; the browser-facing pieces live in `ui`.

pub mod prefs;

pub use prefs::store::MemoryStore;
pub use prefs::store::PreferenceStore;
pub use prefs::store::PrefsError;
pub use prefs::theme::resolve_theme;
pub use prefs::theme::Theme;
pub use prefs::user_prefs::UserPrefs;
