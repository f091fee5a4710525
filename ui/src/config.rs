//! Page configuration: where each feature finds its elements and which
//! marker classes it toggles.
//!
//! The defaults describe the stock page markup. A page can override any
//! subset of fields with an inline JSON block:
//!
//! ```html
//! <script type="application/json" id="folio-config">
//!   { "scroll": { "threshold": 80 } }
//! </script>
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use serde::Serialize;

/// Id of the optional inline JSON config block.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub popup: PopupConfig,
    pub nav: NavConfig,
    pub theme: ThemeConfig,
    pub scroll: ScrollConfig,
}

impl PageConfig {
    /// Parses a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// The single overlay element.
    pub container: String,
    /// Region inside the overlay that receives template content.
    pub content: String,
    /// Attribute on trigger elements naming the project to show.
    pub trigger_attribute: String,
    /// Selector for dedicated close controls.
    pub close_selector: String,
    /// Template element id is `{project id}{template_suffix}`.
    pub template_suffix: String,
    pub open_class: String,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            container: "#project-modal".into(),
            content: "#modal-body".into(),
            trigger_attribute: "data-project".into(),
            close_selector: ".modal-close".into(),
            template_suffix: "-template".into(),
            open_class: "active".into(),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub trigger: String,
    pub menu: String,
    pub link_selector: String,
    pub open_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            trigger: "#nav-toggle".into(),
            menu: "#nav-menu".into(),
            link_selector: ".nav-link".into(),
            open_class: "active".into(),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub toggle: String,
    /// Icon, looked up inside the toggle element.
    pub icon: String,
    /// Optional control that forgets the stored choice and follows the
    /// system color scheme again.
    pub reset: String,
    /// Class on the document root while the dark theme is active.
    pub dark_class: String,
    /// Icon class shown while light is active (offers the switch to dark).
    pub light_icon_class: String,
    /// Icon class shown while dark is active.
    pub dark_icon_class: String,
    pub storage_key: String,
    /// Whether the startup-derived theme is written to the store even though
    /// the user never chose it. Once written, system changes stop applying.
    pub persist_resolved_default: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            toggle: "#theme-toggle".into(),
            icon: "i".into(),
            reset: "#theme-reset".into(),
            dark_class: "dark-theme".into(),
            light_icon_class: "fa-moon".into(),
            dark_icon_class: "fa-sun".into(),
            storage_key: api::prefs::user_prefs::DEFAULT_THEME_KEY.into(),
            persist_resolved_default: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub header: String,
    /// Same-page links whose clicks are turned into smooth scrolls.
    pub anchor_selector: String,
    pub scrolled_class: String,
    /// Offset beyond which (strictly) the header counts as scrolled.
    pub threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header: "header".into(),
            anchor_selector: "a[href^=\"#\"]".into(),
            scrolled_class: "scrolled".into(),
            threshold: 50.0,
        }
    }
}
