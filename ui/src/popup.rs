//! The project popup: one shared overlay filled from inline templates.

use crate::config::PopupConfig;
use crate::dom::{self, Element, Page};
use dioxus_logger::tracing::{debug, info};

const ARIA_HIDDEN: &str = "aria-hidden";

/// Elements the popup needs. All of them, or the feature is off.
#[derive(Clone, Debug)]
pub struct PopupParts<E> {
    pub container: E,
    pub content: E,
    /// Receives the scroll lock while the popup is open.
    pub body: E,
}

/// Template lookups are deferred until a trigger is clicked, so the
/// controller keeps the page around.
pub struct PopupController<P: Page> {
    page: P,
    parts: Option<PopupParts<P::Element>>,
    config: PopupConfig,
}

impl<P: Page> PopupController<P> {
    /// Builds a controller over explicit parts; `None` gives an inert one.
    pub fn new(page: P, parts: Option<PopupParts<P::Element>>, config: PopupConfig) -> Self {
        if let Some(parts) = &parts {
            parts.container.set_attribute(ARIA_HIDDEN, "true");
        }
        Self {
            page,
            parts,
            config,
        }
    }

    pub fn from_page(page: P, config: PopupConfig) -> Self {
        let container = dom::lookup(&page, &config.container);
        let content = dom::lookup(&page, &config.content);
        let body = page.body();
        let parts = match (container, content, body) {
            (Some(container), Some(content), Some(body)) => {
                info!("popup: active");
                Some(PopupParts {
                    container,
                    content,
                    body,
                })
            }
            (container, content, _) => {
                let missing = if container.is_none() {
                    config.container.as_str()
                } else if content.is_none() {
                    config.content.as_str()
                } else {
                    "body"
                };
                info!("popup: inert, missing {missing}");
                None
            }
        };
        Self::new(page, parts, config)
    }

    pub fn is_active(&self) -> bool {
        self.parts.is_some()
    }

    pub fn parts(&self) -> Option<&PopupParts<P::Element>> {
        self.parts.as_ref()
    }

    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.parts
            .as_ref()
            .is_some_and(|p| p.container.has_class(&self.config.open_class))
    }

    /// Elements that open the popup when clicked.
    pub fn triggers(&self) -> Vec<P::Element> {
        if !self.is_active() {
            return Vec::new();
        }
        self.page
            .query_all(&format!("[{}]", self.config.trigger_attribute))
    }

    /// Dedicated close controls.
    pub fn close_controls(&self) -> Vec<P::Element> {
        if !self.is_active() {
            return Vec::new();
        }
        self.page.query_all(&self.config.close_selector)
    }

    /// The project id carried by a trigger element.
    pub fn project_id_of(&self, trigger: &P::Element) -> Option<String> {
        trigger
            .attribute(&self.config.trigger_attribute)
            .filter(|id| !id.is_empty())
    }

    fn template_for(&self, project_id: &str) -> Option<P::Element> {
        let id = format!("{project_id}{}", self.config.template_suffix);
        self.page.element_by_id(&id)
    }

    /// Shows the template for `project_id`.
    ///
    /// An unknown id changes nothing and returns `false`.
    pub fn open(&self, project_id: &str) -> bool {
        let Some(parts) = &self.parts else {
            return false;
        };
        let Some(template) = self.template_for(project_id) else {
            debug!("popup: no template for {project_id:?}");
            return false;
        };
        parts.content.replace_children_with_copy_of(&template);
        parts.container.add_class(&self.config.open_class);
        parts.container.set_attribute(ARIA_HIDDEN, "false");
        parts.body.set_style("overflow", "hidden");
        debug!("popup: opened {project_id:?}");
        true
    }

    /// Hides the popup and releases the scroll lock. Content stays in place.
    pub fn close(&self) {
        let Some(parts) = &self.parts else {
            return;
        };
        parts.container.remove_class(&self.config.open_class);
        parts.container.set_attribute(ARIA_HIDDEN, "true");
        parts.body.remove_style("overflow");
    }

    /// A click that landed on the overlay itself, outside its dialog.
    pub fn backdrop_clicked(&self, target: &P::Element) {
        if self.parts.as_ref().is_some_and(|p| p.container == *target) {
            self.close();
        }
    }

    pub fn key_pressed(&self, key: &str) {
        if dom::is_escape(key) && self.is_open() {
            self.close();
        }
    }
}
