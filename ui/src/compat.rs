// Browser implementations of the page, store, signal and frame ports.

use crate::dom::{self, ColorSchemeSignal, Element, Page};
use crate::error::WireError;
use crate::frame::FrameScheduler;
use api::{MemoryStore, PreferenceStore, PrefsError};
use dioxus_logger::tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, HtmlTemplateElement, MediaQueryList, Node,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Storage, Window,
};

/// Media query backing the platform color-scheme signal.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Best-effort readable text for a thrown JS value.
pub fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

fn check<T>(result: Result<T, JsValue>, what: &str) {
    if let Err(e) = result {
        warn!("{what}: {}", js_error(&e));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WebElement(pub web_sys::Element);

impl WebElement {
    pub fn as_element(&self) -> &web_sys::Element {
        &self.0
    }

    pub fn text(&self) -> Option<String> {
        self.0.text_content()
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }

    fn append_copy(&self, node: &Node) {
        match node.clone_node_with_deep(true) {
            Ok(copy) => check(self.0.append_child(&copy), "append template copy"),
            Err(e) => warn!("clone template node: {}", js_error(&e)),
        }
    }
}

impl From<web_sys::Element> for WebElement {
    fn from(el: web_sys::Element) -> Self {
        Self(el)
    }
}

impl Element for WebElement {
    fn add_class(&self, class: &str) {
        check(self.0.class_list().add_1(class), "add class");
    }

    fn remove_class(&self, class: &str) {
        check(self.0.class_list().remove_1(class), "remove class");
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        check(self.0.set_attribute(name, value), "set attribute");
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(html) = self.html() {
            check(html.style().set_property(property, value), "set style");
        }
    }

    fn remove_style(&self, property: &str) {
        if let Some(html) = self.html() {
            check(html.style().remove_property(property), "remove style");
        }
    }

    fn style(&self, property: &str) -> Option<String> {
        let value = self.html()?.style().get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn query_within(&self, selector: &str) -> Option<Self> {
        match self.0.query_selector(selector) {
            Ok(found) => found.map(WebElement),
            Err(e) => {
                warn!("bad selector {selector:?}: {}", js_error(&e));
                None
            }
        }
    }

    fn contains(&self, other: &Self) -> bool {
        let node: &Node = &other.0;
        self.0.contains(Some(node))
    }

    fn replace_children_with_copy_of(&self, template: &Self) {
        self.0.set_inner_html("");
        if let Some(template) = template.0.dyn_ref::<HtmlTemplateElement>() {
            self.append_copy(&template.content());
            return;
        }
        let children = template.0.child_nodes();
        for i in 0..children.length() {
            if let Some(child) = children.get(i) {
                self.append_copy(&child);
            }
        }
    }

    fn scroll_into_view(&self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        self.0
            .scroll_into_view_with_scroll_into_view_options(&options);
    }
}

pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn new() -> Result<Self, WireError> {
        let window = web_sys::window().ok_or(WireError::NoWindow)?;
        let document = window.document().ok_or(WireError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Still parsing, i.e. `DOMContentLoaded` has not fired yet.
    pub fn is_loading(&self) -> bool {
        dom::is_still_parsing(&self.document.ready_state())
    }
}

impl Page for WebPage {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement)
    }

    fn query(&self, selector: &str) -> Option<WebElement> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(WebElement),
            Err(e) => {
                warn!("bad selector {selector:?}: {}", js_error(&e));
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<WebElement> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                warn!("bad selector {selector:?}: {}", js_error(&e));
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement)
            .collect()
    }

    fn root(&self) -> Option<WebElement> {
        self.document.document_element().map(WebElement)
    }

    fn body(&self) -> Option<WebElement> {
        self.document
            .body()
            .map(|body| WebElement(body.unchecked_into()))
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

/// `window.localStorage`.
pub struct LocalStorage(Storage);

impl LocalStorage {
    pub fn open(window: &Window) -> Result<Self, PrefsError> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self(storage)),
            Ok(None) => Err(PrefsError::Unavailable("localStorage is disabled".into())),
            Err(e) => Err(PrefsError::Unavailable(js_error(&e))),
        }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        self.0.get_item(key).map_err(|e| PrefsError::Read {
            key: key.to_owned(),
            reason: js_error(&e),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.0.set_item(key, value).map_err(|e| PrefsError::Write {
            key: key.to_owned(),
            reason: js_error(&e),
        })
    }

    fn remove(&self, key: &str) -> Result<(), PrefsError> {
        self.0.remove_item(key).map_err(|e| PrefsError::Write {
            key: key.to_owned(),
            reason: js_error(&e),
        })
    }
}

/// `localStorage` when the browser allows it, otherwise a per-page-view
/// memory store so the toggle keeps working.
pub enum HostStore {
    Local(LocalStorage),
    Memory(MemoryStore),
}

impl HostStore {
    pub fn open(window: &Window) -> Self {
        match LocalStorage::open(window) {
            Ok(local) => Self::Local(local),
            Err(e) => {
                warn!("{e}; theme choice will not survive reload");
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

impl PreferenceStore for HostStore {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        match self {
            Self::Local(s) => s.get(key),
            Self::Memory(s) => s.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        match self {
            Self::Local(s) => s.set(key, value),
            Self::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), PrefsError> {
        match self {
            Self::Local(s) => s.remove(key),
            Self::Memory(s) => s.remove(key),
        }
    }
}

/// `matchMedia("(prefers-color-scheme: dark)")`. Reads as "light" where the
/// query is unsupported.
pub struct MediaQuerySignal(Option<MediaQueryList>);

impl MediaQuerySignal {
    pub fn open(window: &Window) -> Self {
        match window.match_media(PREFERS_DARK_QUERY) {
            Ok(list) => Self(list),
            Err(e) => {
                warn!("{}", WireError::MediaQuery {
                    query: PREFERS_DARK_QUERY.into(),
                    reason: js_error(&e),
                });
                Self(None)
            }
        }
    }

    pub fn list(&self) -> Option<&MediaQueryList> {
        self.0.as_ref()
    }
}

impl ColorSchemeSignal for MediaQuerySignal {
    fn prefers_dark(&self) -> bool {
        self.0.as_ref().is_some_and(MediaQueryList::matches)
    }
}

/// `requestAnimationFrame`.
pub struct AnimationFrames(Window);

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self(window)
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> bool {
        let callback = Closure::once_into_js(move |_timestamp: f64| callback());
        match self.0.request_animation_frame(callback.unchecked_ref()) {
            Ok(_) => true,
            Err(e) => {
                warn!("request animation frame: {}", js_error(&e));
                false
            }
        }
    }
}
