//! Collapsible navigation menu for narrow layouts.

use crate::config::NavConfig;
use crate::dom::{self, Element, Page};
use dioxus_logger::tracing::{debug, info};

const ARIA_EXPANDED: &str = "aria-expanded";

#[derive(Clone, Debug)]
pub struct NavParts<E> {
    pub trigger: E,
    pub menu: E,
}

pub struct NavController<E> {
    parts: Option<NavParts<E>>,
    links: Vec<E>,
    open_class: String,
}

impl<E: Element> NavController<E> {
    pub fn new(parts: Option<NavParts<E>>, links: Vec<E>, open_class: impl Into<String>) -> Self {
        if let Some(parts) = &parts {
            parts.trigger.set_attribute(ARIA_EXPANDED, "false");
        }
        Self {
            parts,
            links,
            open_class: open_class.into(),
        }
    }

    pub fn from_page<P: Page<Element = E>>(page: &P, config: &NavConfig) -> Self {
        let trigger = dom::lookup(page, &config.trigger);
        let menu = dom::lookup(page, &config.menu);
        let parts = match (trigger, menu) {
            (Some(trigger), Some(menu)) => {
                info!("nav: active");
                Some(NavParts { trigger, menu })
            }
            (None, _) => {
                info!("nav: inert, missing {}", config.trigger);
                None
            }
            (_, None) => {
                info!("nav: inert, missing {}", config.menu);
                None
            }
        };
        let links = if parts.is_some() {
            page.query_all(&config.link_selector)
        } else {
            Vec::new()
        };
        Self::new(parts, links, config.open_class.clone())
    }

    pub fn is_active(&self) -> bool {
        self.parts.is_some()
    }

    pub fn parts(&self) -> Option<&NavParts<E>> {
        self.parts.as_ref()
    }

    pub fn links(&self) -> &[E] {
        &self.links
    }

    pub fn is_open(&self) -> bool {
        self.parts
            .as_ref()
            .is_some_and(|p| p.menu.has_class(&self.open_class))
    }

    fn set_open(&self, open: bool) {
        let Some(parts) = &self.parts else {
            return;
        };
        parts.menu.set_class(&self.open_class, open);
        parts
            .trigger
            .set_attribute(ARIA_EXPANDED, if open { "true" } else { "false" });
    }

    pub fn toggle(&self) {
        let open = !self.is_open();
        self.set_open(open);
        debug!("nav: {}", if open { "opened" } else { "closed" });
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    /// Every closing path ends here. Closing a closed menu does nothing.
    pub fn close(&self) {
        if self.is_open() {
            self.set_open(false);
            debug!("nav: closed");
        }
    }

    pub fn link_selected(&self) {
        self.close();
    }

    /// A click anywhere on the page; closes the menu when it landed outside.
    pub fn document_clicked(&self, target: &E) {
        let Some(parts) = &self.parts else {
            return;
        };
        if self.is_open() && !parts.menu.contains(target) && !parts.trigger.contains(target) {
            self.close();
        }
    }

    pub fn key_pressed(&self, key: &str) {
        if dom::is_escape(key) {
            self.close();
        }
    }
}
