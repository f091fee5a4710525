//! Smooth same-page anchor scrolling and the scroll-reactive header.

use crate::config::ScrollConfig;
use crate::dom::{self, Element, Page};
use crate::frame::{FrameScheduler, FrameThrottle};
use dioxus_logger::tracing::{debug, info};
use std::rc::Rc;

/// What the click handler should do with the browser's default navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIs)]
pub enum AnchorOutcome {
    /// We scrolled; suppress the default jump.
    Intercepted,
    /// Leave the click alone.
    Default,
}

pub struct AnchorScroller<P> {
    page: P,
    selector: String,
}

impl<P: Page> AnchorScroller<P> {
    pub fn new(page: P, config: &ScrollConfig) -> Self {
        Self {
            page,
            selector: config.anchor_selector.clone(),
        }
    }

    /// Same-page links present on the page.
    pub fn anchors(&self) -> Vec<P::Element> {
        self.page.query_all(&self.selector)
    }

    /// Scrolls to the element named by `href`'s fragment, if there is one.
    pub fn follow(&self, href: &str) -> AnchorOutcome {
        let Some(fragment) = href.strip_prefix('#') else {
            return AnchorOutcome::Default;
        };
        if fragment.is_empty() {
            return AnchorOutcome::Default;
        }
        match self.page.element_by_id(fragment) {
            Some(target) => {
                target.scroll_into_view();
                debug!("scroll: to #{fragment}");
                AnchorOutcome::Intercepted
            }
            None => AnchorOutcome::Default,
        }
    }
}

/// Marks the header once the page has scrolled past the threshold.
#[derive(Clone, Debug)]
pub struct HeaderStyle<E> {
    header: E,
    class: String,
    threshold: f64,
}

impl<E: Element> HeaderStyle<E> {
    pub fn new(header: E, config: &ScrollConfig) -> Self {
        Self {
            header,
            class: config.scrolled_class.clone(),
            threshold: config.threshold,
        }
    }

    /// Strictly past the threshold; sitting exactly on it does not count.
    pub fn is_scrolled(&self, offset: f64) -> bool {
        offset > self.threshold
    }

    pub fn apply(&self, offset: f64) {
        self.header.set_class(&self.class, self.is_scrolled(offset));
    }

    pub fn header(&self) -> &E {
        &self.header
    }
}

/// Recomputes the header style at most once per animation frame.
pub struct HeaderWatcher<P: Page, F> {
    page: Rc<P>,
    style: Option<Rc<HeaderStyle<P::Element>>>,
    throttle: FrameThrottle<F>,
}

impl<P: Page, F: FrameScheduler> HeaderWatcher<P, F> {
    pub fn from_page(page: Rc<P>, frames: F, config: &ScrollConfig) -> Self {
        let style = match dom::lookup(&*page, &config.header) {
            Some(header) => {
                info!("header: active");
                Some(Rc::new(HeaderStyle::new(header, config)))
            }
            None => {
                info!("header: inert, missing {}", config.header);
                None
            }
        };
        Self {
            page,
            style,
            throttle: FrameThrottle::new(frames),
        }
    }

    pub fn is_active(&self) -> bool {
        self.style.is_some()
    }

    /// Immediate recompute. Run once at startup so a page loaded mid-scroll
    /// gets the right header.
    pub fn refresh(&self) {
        if let Some(style) = &self.style {
            style.apply(self.page.scroll_offset());
        }
    }

    /// Called for every scroll event. Returns whether a new frame was queued.
    pub fn on_scroll(&self) -> bool {
        let Some(style) = &self.style else {
            return false;
        };
        let style = Rc::clone(style);
        let page = Rc::clone(&self.page);
        self.throttle
            .schedule(move || style.apply(page.scroll_offset()))
    }

    pub fn is_pending(&self) -> bool {
        self.throttle.is_pending()
    }
}
