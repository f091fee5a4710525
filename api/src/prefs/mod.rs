pub mod store;
pub mod theme;
pub mod user_prefs;
