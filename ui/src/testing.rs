//! In-memory stand-ins for the page, the color-scheme signal and the frame
//! clock. Just enough DOM to drive the controllers natively.

use crate::dom::ColorSchemeSignal;
use crate::dom::Element;
use crate::dom::Page;
use crate::frame::FrameScheduler;
use std::cell::Cell;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::rc::Weak;

#[derive(Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    children: Vec<FakeElement>,
    parent: Weak<RefCell<Node>>,
    scrolls: usize,
}

#[derive(Clone)]
pub struct FakeElement(Rc<RefCell<Node>>);

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        write!(f, "<{}", node.tag)?;
        if let Some(id) = node.attrs.get("id") {
            write!(f, " id={id:?}")?;
        }
        write!(f, ">")
    }
}

impl FakeElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(Node {
            tag: tag.to_owned(),
            ..Node::default()
        })))
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.0.borrow_mut().text = text.to_owned();
        self
    }

    pub fn with_child(self, child: FakeElement) -> Self {
        self.append(child);
        self
    }

    pub fn append(&self, child: FakeElement) {
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child);
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn children(&self) -> Vec<FakeElement> {
        self.0.borrow().children.clone()
    }

    /// Own text followed by the text of all descendants.
    pub fn text_content(&self) -> String {
        let node = self.0.borrow();
        let mut out = node.text.clone();
        for child in &node.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// How many times `scroll_into_view` was called.
    pub fn scroll_count(&self) -> usize {
        self.0.borrow().scrolls
    }

    fn parent(&self) -> Option<FakeElement> {
        self.0.borrow().parent.upgrade().map(FakeElement)
    }

    fn deep_copy(&self) -> FakeElement {
        let node = self.0.borrow();
        let copy = FakeElement(Rc::new(RefCell::new(Node {
            tag: node.tag.clone(),
            classes: node.classes.clone(),
            attrs: node.attrs.clone(),
            styles: node.styles.clone(),
            text: node.text.clone(),
            ..Node::default()
        })));
        for child in &node.children {
            copy.append(child.deep_copy());
        }
        copy
    }

    fn descendants(&self, out: &mut Vec<FakeElement>) {
        for child in self.children() {
            out.push(child.clone());
            child.descendants(out);
        }
    }

    /// Supports compound simple selectors (`a.b#c[d^="e"]`) joined by the
    /// descendant combinator.
    pub fn matches(&self, selector: &str) -> bool {
        let parts: Vec<Compound> = selector.split_whitespace().map(Compound::parse).collect();
        let Some((last, ancestors)) = parts.split_last() else {
            return false;
        };
        if !last.matches(self) {
            return false;
        }
        let mut cursor = self.parent();
        for part in ancestors.iter().rev() {
            loop {
                match cursor {
                    None => return false,
                    Some(el) => {
                        cursor = el.parent();
                        if part.matches(&el) {
                            break;
                        }
                    }
                }
            }
        }
        true
    }
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) {
        let mut node = self.0.borrow_mut();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_owned());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_owned(), value.to_owned());
    }

    fn remove_style(&self, property: &str) {
        self.0.borrow_mut().styles.remove(property);
    }

    fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    fn query_within(&self, selector: &str) -> Option<Self> {
        let mut all = Vec::new();
        self.descendants(&mut all);
        all.into_iter().find(|el| el.matches(selector))
    }

    fn contains(&self, other: &Self) -> bool {
        let mut cursor = Some(other.clone());
        while let Some(el) = cursor {
            if el == *self {
                return true;
            }
            cursor = el.parent();
        }
        false
    }

    fn replace_children_with_copy_of(&self, template: &Self) {
        let old = std::mem::take(&mut self.0.borrow_mut().children);
        for child in old {
            child.0.borrow_mut().parent = Weak::new();
        }
        for child in template.children() {
            self.append(child.deep_copy());
        }
    }

    fn scroll_into_view(&self) {
        self.0.borrow_mut().scrolls += 1;
    }
}

struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

enum AttrTest {
    Present(String),
    Equals(String, String),
    Prefix(String, String),
}

impl Compound {
    fn parse(src: &str) -> Self {
        let mut out = Compound {
            tag: None,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
        };
        let mut rest = src;
        let name_end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
        if name_end > 0 {
            out.tag = Some(rest[..name_end].to_owned());
        }
        rest = &rest[name_end..];
        while let Some(c) = rest.chars().next() {
            if c == '[' {
                let end = rest.find(']').unwrap_or(rest.len());
                out.attrs.push(AttrTest::parse(&rest[1..end]));
                rest = rest.get(end + 1..).unwrap_or("");
            } else {
                let body = &rest[1..];
                let end = body.find(['#', '.', '[']).unwrap_or(body.len());
                let name = body[..end].to_owned();
                if c == '#' {
                    out.id = Some(name);
                } else {
                    out.classes.push(name);
                }
                rest = &body[end..];
            }
        }
        out
    }

    fn matches(&self, el: &FakeElement) -> bool {
        if let Some(tag) = &self.tag {
            if &el.tag() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attribute("id").as_deref() != Some(id) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.has_class(c)) && self.attrs.iter().all(|a| a.matches(el))
    }
}

impl AttrTest {
    fn parse(src: &str) -> Self {
        let unquote = |v: &str| v.trim_matches(|c: char| c == '"' || c == '\'').to_owned();
        if let Some((name, value)) = src.split_once("^=") {
            AttrTest::Prefix(name.to_owned(), unquote(value))
        } else if let Some((name, value)) = src.split_once('=') {
            AttrTest::Equals(name.to_owned(), unquote(value))
        } else {
            AttrTest::Present(src.to_owned())
        }
    }

    fn matches(&self, el: &FakeElement) -> bool {
        match self {
            AttrTest::Present(name) => el.attribute(name).is_some(),
            AttrTest::Equals(name, value) => el.attribute(name).as_deref() == Some(value),
            AttrTest::Prefix(name, prefix) => el
                .attribute(name)
                .is_some_and(|v| v.starts_with(prefix.as_str())),
        }
    }
}

/// A document: `<html>` with a `<body>` child.
pub struct FakePage {
    root: FakeElement,
    body: FakeElement,
    scroll: Cell<f64>,
}

impl Default for FakePage {
    fn default() -> Self {
        let body = FakeElement::new("body");
        let root = FakeElement::new("html").with_child(body.clone());
        Self {
            root,
            body,
            scroll: Cell::new(0.0),
        }
    }
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `el` to the body and hands it back.
    pub fn add(&self, el: FakeElement) -> FakeElement {
        self.body.append(el.clone());
        el
    }

    pub fn set_scroll_offset(&self, offset: f64) {
        self.scroll.set(offset);
    }

    fn all(&self) -> Vec<FakeElement> {
        let mut out = vec![self.root.clone()];
        self.root.descendants(&mut out);
        out
    }
}

impl Page for FakePage {
    type Element = FakeElement;

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        self.all()
            .into_iter()
            .find(|el| el.attribute("id").as_deref() == Some(id))
    }

    fn query(&self, selector: &str) -> Option<FakeElement> {
        self.all().into_iter().find(|el| el.matches(selector))
    }

    fn query_all(&self, selector: &str) -> Vec<FakeElement> {
        self.all()
            .into_iter()
            .filter(|el| el.matches(selector))
            .collect()
    }

    fn root(&self) -> Option<FakeElement> {
        Some(self.root.clone())
    }

    fn body(&self) -> Option<FakeElement> {
        Some(self.body.clone())
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll.get()
    }
}

#[derive(Default)]
pub struct FakeSignal {
    dark: Cell<bool>,
}

impl FakeSignal {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            dark: Cell::new(prefers_dark),
        }
    }

    pub fn set(&self, prefers_dark: bool) {
        self.dark.set(prefers_dark);
    }
}

impl ColorSchemeSignal for FakeSignal {
    fn prefers_dark(&self) -> bool {
        self.dark.get()
    }
}

/// Frame clock advanced by hand.
#[derive(Default)]
pub struct ManualFrames {
    queue: RefCell<Vec<Box<dyn FnOnce()>>>,
    refuse: Cell<bool>,
}

impl ManualFrames {
    /// The next request is refused, as a throwing `requestAnimationFrame` would.
    pub fn refuse_next(&self) {
        self.refuse.set(true);
    }

    pub fn queued(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs every callback queued before this call.
    pub fn run_frame(&self) {
        let callbacks = std::mem::take(&mut *self.queue.borrow_mut());
        for callback in callbacks {
            callback();
        }
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> bool {
        if self.refuse.replace(false) {
            return false;
        }
        self.queue.borrow_mut().push(callback);
        true
    }
}

/// A host whose frame requests always fail.
pub struct RefusingFrames;

impl FrameScheduler for RefusingFrames {
    fn request_frame(&self, _callback: Box<dyn FnOnce()>) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_cover_the_page_contract() {
        let page = FakePage::new();
        let toggle = page.add(
            FakeElement::new("button")
                .with_id("theme-toggle")
                .with_child(FakeElement::new("i").with_class("fa-moon")),
        );
        let anchor = page.add(FakeElement::new("a").with_attr("href", "#about"));
        page.add(FakeElement::new("a").with_attr("href", "https://example.com"));
        let card = page.add(FakeElement::new("div").with_class("card").with_attr("data-project", "p1"));

        assert_eq!(page.query("#theme-toggle"), Some(toggle.clone()));
        assert_eq!(page.query("#theme-toggle i"), toggle.children().first().cloned());
        assert_eq!(page.query_all("a[href^=\"#\"]"), vec![anchor]);
        assert_eq!(page.query_all("[data-project]"), vec![card.clone()]);
        assert_eq!(page.query("div.card[data-project=\"p1\"]"), Some(card));
        assert!(page.query("#nope i").is_none());
    }

    #[test]
    fn contains_walks_ancestors() {
        let inner = FakeElement::new("span");
        let outer = FakeElement::new("div").with_child(inner.clone());
        assert!(outer.contains(&outer));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn copying_template_content_is_deep_and_fresh() {
        let template = FakeElement::new("template")
            .with_child(FakeElement::new("h2").with_text("Title"))
            .with_child(FakeElement::new("p").with_child(FakeElement::new("em").with_text("body")));
        let target = FakeElement::new("div").with_child(FakeElement::new("p").with_text("old"));

        target.replace_children_with_copy_of(&template);
        assert_eq!(target.text_content(), "Titlebody");
        assert_eq!(template.text_content(), "Titlebody");
        assert_ne!(target.children()[0], template.children()[0]);
    }
}
