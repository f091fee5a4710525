//! Interactive behaviors for the folio static page: the project popup, the
//! collapsible navigation, the light/dark theme toggle and scroll effects.
//!
//! Controllers are written against the small `dom` traits so they run
//! unchanged in the browser (feature `web`) and against in-memory fakes in
//! tests.

pub mod config;
pub mod dom;
pub mod error;
pub mod frame;
pub mod nav;
pub mod popup;
pub mod scroll;
pub mod theme;

#[cfg(feature = "web")]
pub mod compat;
#[cfg(feature = "web")]
mod wiring;

#[cfg(feature = "web")]
pub use wiring::{load_config, on_page_ready, run, start};

#[cfg(test)]
mod testing;

pub use config::PageConfig;
