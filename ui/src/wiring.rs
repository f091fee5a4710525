//! Attaches the controllers to the live page.
//!
//! Every feature is wired independently: one that fails to attach is logged
//! and the rest carry on. Listeners live as long as the page, so their
//! closures are leaked with `Closure::forget`.

use crate::compat::{self, AnimationFrames, HostStore, MediaQuerySignal, WebElement, WebPage};
use crate::config::{NavConfig, PageConfig, PopupConfig, ScrollConfig, ThemeConfig, CONFIG_ELEMENT_ID};
use crate::dom::{Element, Page};
use crate::error::WireError;
use crate::nav::NavController;
use crate::popup::PopupController;
use crate::scroll::{AnchorOutcome, AnchorScroller, HeaderWatcher};
use crate::theme::ThemeController;
use dioxus_logger::tracing::{info, warn};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent, MediaQueryListEvent};

fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), WireError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| WireError::Listen {
            event,
            reason: compat::js_error(&e),
        })?;
    closure.forget();
    Ok(())
}

fn event_element(event: &Event) -> Option<WebElement> {
    event
        .target()?
        .dyn_into::<web_sys::Element>()
        .ok()
        .map(WebElement)
}

fn event_key(event: &Event) -> Option<String> {
    event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key)
}

/// Runs `f` once the document has been parsed.
pub fn on_page_ready(f: impl FnOnce() + 'static) -> Result<(), WireError> {
    let page = WebPage::new()?;
    if !page.is_loading() {
        f();
        return Ok(());
    }
    let callback = Closure::once_into_js(f);
    page.document()
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(|e| WireError::Listen {
            event: "DOMContentLoaded",
            reason: compat::js_error(&e),
        })
}

/// Reads the optional inline JSON config block, falling back to defaults.
pub fn load_config(page: &WebPage) -> PageConfig {
    let Some(json) = page.element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text()) else {
        return PageConfig::default();
    };
    PageConfig::from_json(&json).unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        PageConfig::default()
    })
}

/// Waits for the page, then starts every feature.
pub fn run() -> Result<(), WireError> {
    on_page_ready(|| match WebPage::new() {
        Ok(page) => {
            let config = load_config(&page);
            start(Rc::new(page), config);
        }
        Err(e) => warn!("{e}"),
    })
}

pub fn start(page: Rc<WebPage>, config: PageConfig) {
    let PageConfig {
        popup,
        nav,
        theme,
        scroll,
    } = config;
    let results = [
        ("popup", wire_popup(&page, popup)),
        ("nav", wire_nav(&page, &nav)),
        ("theme", wire_theme(&page, theme)),
        ("scroll", wire_scroll(&page, &scroll)),
    ];
    for (feature, result) in results {
        if let Err(e) = result {
            warn!("{feature}: {e}");
        }
    }
    info!("page behaviors started");
}

fn wire_popup(page: &Rc<WebPage>, config: PopupConfig) -> Result<(), WireError> {
    let popup = Rc::new(PopupController::from_page(Rc::clone(page), config));
    let Some(parts) = popup.parts().cloned() else {
        return Ok(());
    };

    for trigger in popup.triggers() {
        let popup = Rc::clone(&popup);
        let el = trigger.clone();
        listen(trigger.as_element(), "click", move |_| {
            if let Some(id) = popup.project_id_of(&el) {
                popup.open(&id);
            }
        })?;
    }

    for control in popup.close_controls() {
        let popup = Rc::clone(&popup);
        listen(control.as_element(), "click", move |_| popup.close())?;
    }

    {
        let popup = Rc::clone(&popup);
        listen(parts.container.as_element(), "click", move |event| {
            if let Some(target) = event_element(&event) {
                popup.backdrop_clicked(&target);
            }
        })?;
    }

    listen(page.document(), "keydown", move |event| {
        if let Some(key) = event_key(&event) {
            popup.key_pressed(&key);
        }
    })
}

fn wire_nav(page: &Rc<WebPage>, config: &NavConfig) -> Result<(), WireError> {
    let nav = Rc::new(NavController::from_page(&**page, config));
    let Some(parts) = nav.parts().cloned() else {
        return Ok(());
    };

    {
        let nav = Rc::clone(&nav);
        listen(parts.trigger.as_element(), "click", move |_| nav.toggle())?;
    }

    for link in nav.links() {
        let nav = Rc::clone(&nav);
        listen(link.as_element(), "click", move |_| nav.link_selected())?;
    }

    {
        let nav = Rc::clone(&nav);
        listen(page.document(), "click", move |event| {
            if let Some(target) = event_element(&event) {
                nav.document_clicked(&target);
            }
        })?;
    }

    listen(page.document(), "keydown", move |event| {
        if let Some(key) = event_key(&event) {
            nav.key_pressed(&key);
        }
    })
}

fn wire_theme(page: &Rc<WebPage>, config: ThemeConfig) -> Result<(), WireError> {
    let store = HostStore::open(page.window());
    let signal = Rc::new(MediaQuerySignal::open(page.window()));
    let theme = Rc::new(ThemeController::from_page(
        &**page,
        store,
        Rc::clone(&signal),
        config,
    ));
    let Some(parts) = theme.parts().cloned() else {
        return Ok(());
    };
    theme.init();

    {
        let theme = Rc::clone(&theme);
        listen(parts.toggle.as_element(), "click", move |_| {
            theme.toggle();
        })?;
    }

    if let Some(reset) = &parts.reset {
        let theme = Rc::clone(&theme);
        listen(reset.as_element(), "click", move |_| {
            theme.reset_to_system();
        })?;
    }

    let Some(list) = signal.list() else {
        return Ok(());
    };
    listen(list, "change", move |event| {
        if let Some(change) = event.dyn_ref::<MediaQueryListEvent>() {
            theme.system_preference_changed(change.matches());
        }
    })
}

fn wire_scroll(page: &Rc<WebPage>, config: &ScrollConfig) -> Result<(), WireError> {
    let scroller = Rc::new(AnchorScroller::new(Rc::clone(page), config));
    for anchor in scroller.anchors() {
        let scroller = Rc::clone(&scroller);
        let el = anchor.clone();
        listen(anchor.as_element(), "click", move |event| {
            let Some(href) = el.attribute("href") else {
                return;
            };
            if scroller.follow(&href) == AnchorOutcome::Intercepted {
                event.prevent_default();
            }
        })?;
    }

    let frames = AnimationFrames::new(page.window().clone());
    let watcher = HeaderWatcher::from_page(Rc::clone(page), frames, config);
    if !watcher.is_active() {
        return Ok(());
    }
    watcher.refresh();
    listen(page.window(), "scroll", move |_| {
        watcher.on_scroll();
    })
}
