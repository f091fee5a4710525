//! The structural contract between the controllers and the page.
//!
//! Controllers only ever see these traits. The browser implementation lives in
//! `compat`; tests use the in-memory fakes from `testing`.

/// A handle to one element of the page.
///
/// Handles are cheap to clone and compare by identity: two handles are equal
/// when they point at the same node.
pub trait Element: Clone + PartialEq + 'static {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    /// Adds or removes `class` depending on `on`.
    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);

    fn set_style(&self, property: &str, value: &str);
    fn remove_style(&self, property: &str);
    fn style(&self, property: &str) -> Option<String>;

    /// First descendant matching `selector`.
    fn query_within(&self, selector: &str) -> Option<Self>;

    /// True when `other` is this element or one of its descendants.
    fn contains(&self, other: &Self) -> bool;

    /// Drops all children, then appends a deep copy of `template`'s content.
    ///
    /// For a `<template>` element the content is its document fragment; for any
    /// other element it is its child nodes.
    fn replace_children_with_copy_of(&self, template: &Self);

    /// Smoothly scrolls the viewport so this element is at the top.
    fn scroll_into_view(&self);
}

/// Lookups against the live page.
pub trait Page: 'static {
    type Element: Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// The document root (`<html>`).
    fn root(&self) -> Option<Self::Element>;
    fn body(&self) -> Option<Self::Element>;

    /// Current vertical scroll offset of the viewport.
    fn scroll_offset(&self) -> f64;
}

impl<T: Page> Page for std::rc::Rc<T> {
    type Element = T::Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element> {
        (**self).element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Self::Element> {
        (**self).query(selector)
    }

    fn query_all(&self, selector: &str) -> Vec<Self::Element> {
        (**self).query_all(selector)
    }

    fn root(&self) -> Option<Self::Element> {
        (**self).root()
    }

    fn body(&self) -> Option<Self::Element> {
        (**self).body()
    }

    fn scroll_offset(&self) -> f64 {
        (**self).scroll_offset()
    }
}

/// The platform color-scheme signal.
pub trait ColorSchemeSignal {
    /// Does the system currently prefer a dark presentation?
    fn prefers_dark(&self) -> bool;
}

impl<T: ColorSchemeSignal + ?Sized> ColorSchemeSignal for std::rc::Rc<T> {
    fn prefers_dark(&self) -> bool {
        (**self).prefers_dark()
    }
}

/// Resolves a selector that names a single element.
///
/// `#id` goes through `element_by_id`, anything else through `query`. An
/// empty selector names nothing.
pub fn lookup<P: Page>(page: &P, selector: &str) -> Option<P::Element> {
    if selector.trim().is_empty() {
        return None;
    }
    match selector.strip_prefix('#') {
        Some(id) if !id.is_empty() && !id.contains([' ', '.', '[', '>']) => {
            page.element_by_id(id)
        }
        _ => page.query(selector),
    }
}

/// Key name reported for the Escape key.
pub const ESCAPE: &str = "Escape";

/// Older engines report `"Esc"`.
pub fn is_escape(key: &str) -> bool {
    key == ESCAPE || key == "Esc"
}

/// `document.readyState` while the HTML is still being parsed.
pub const READY_STATE_LOADING: &str = "loading";

/// True until `DOMContentLoaded` has fired.
pub fn is_still_parsing(ready_state: &str) -> bool {
    ready_state == READY_STATE_LOADING
}
