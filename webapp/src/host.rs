use std::rc::Rc;

use common::dom::{
    ClickHandler, Click, Document, Element, Events, Flow, Intersection, IntersectionHandler,
    IntersectionOptions, Key, KeyHandler, Rect, ScrollHandler, Scheduler, Viewport,
};
use gloo_timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};
use web_sys::{
    Event, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, ScrollBehavior, ScrollToOptions, Window,
};

pub fn js_error(err: JsValue) -> anyhow::Error {
    anyhow::Error::msg(format!("{err:?}"))
}

// dom calls on a live element essentially never fail, and when they do
// there is nothing better to do than note it and carry on
fn warn_on_err<T>(result: Result<T, JsValue>, op: &str) -> Option<T> {
    result
        .map_err(|err| warn!("{op} failed: {err:?}"))
        .ok()
}

#[derive(Clone, Debug, PartialEq)]
pub struct WebElement(pub web_sys::Element);

impl Element for WebElement {
    fn add_class(&self, class: &str) {
        warn_on_err(self.0.class_list().add_1(class), "classList.add");
    }

    fn remove_class(&self, class: &str) {
        warn_on_err(self.0.class_list().remove_1(class), "classList.remove");
    }

    fn toggle_class(&self, class: &str) -> bool {
        warn_on_err(self.0.class_list().toggle(class), "classList.toggle").unwrap_or(false)
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        warn_on_err(self.0.set_attribute(name, value), "setAttribute");
    }

    fn query(&self, selector: &str) -> Option<Self> {
        warn_on_err(self.0.query_selector(selector), "querySelector")
            .flatten()
            .map(WebElement)
    }

    fn offset_top(&self) -> f64 {
        self.0
            .dyn_ref::<HtmlElement>()
            .map(|e| f64::from(e.offset_top()))
            .unwrap_or(0.0)
    }

    fn bounding_rect(&self) -> Rect {
        let rect = self.0.get_bounding_client_rect();

        Rect {
            top: rect.top(),
            left: rect.left(),
            bottom: rect.bottom(),
            right: rect.right(),
        }
    }
}

pub struct WebPage {
    window: Window,
    document: web_sys::Document,
}

impl WebPage {
    pub fn new() -> anyhow::Result<Self> {
        let window = web_sys::window().ok_or_else(|| anyhow::Error::msg("no global window exists"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::Error::msg("window has no document"))?;

        Ok(WebPage { window, document })
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Document for WebPage {
    type Element = WebElement;

    fn query(&self, selector: &str) -> Option<WebElement> {
        warn_on_err(self.document.query_selector(selector), "querySelector")
            .flatten()
            .map(WebElement)
    }

    fn query_all(&self, selector: &str) -> Vec<WebElement> {
        let Some(nodes) = warn_on_err(self.document.query_selector_all(selector), "querySelectorAll")
        else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement)
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement)
    }

    // window.inner* first, then the root element's client size
    fn viewport(&self) -> Viewport {
        let root = self.document.document_element();

        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .filter(|w| *w > 0.0)
            .or_else(|| root.as_ref().map(|e| f64::from(e.client_width())))
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .filter(|h| *h > 0.0)
            .or_else(|| root.as_ref().map(|e| f64::from(e.client_height())))
            .unwrap_or(0.0);

        Viewport { width, height }
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);

        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn set_body_overflow(&self, value: &str) {
        if let Some(body) = self.document.body() {
            warn_on_err(body.style().set_property("overflow", value), "style.setProperty");
        }
    }

    fn pathname(&self) -> String {
        warn_on_err(self.window.location().pathname(), "location.pathname").unwrap_or_default()
    }
}

// a listener is removed from its target when dropped
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

// owns every closure handed to the browser, so the page behaviors live
// exactly as long as this does
pub struct WebEvents {
    page: Rc<WebPage>,
    listeners: Vec<Listener>,
    observers: Vec<Observer>,
}

impl WebEvents {
    pub fn new(page: Rc<WebPage>) -> Self {
        WebEvents {
            page,
            listeners: Vec::new(),
            observers: Vec::new(),
        }
    }

    fn listen(&mut self, target: EventTarget, kind: &'static str, callback: Closure<dyn FnMut(Event)>) {
        match target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref()) {
            Ok(()) => self.listeners.push(Listener {
                target,
                kind,
                callback,
            }),
            Err(err) => warn!("failed to add {kind} listener: {err:?}"),
        }
    }
}

impl Events<WebElement> for WebEvents {
    fn on_click(&mut self, target: &WebElement, mut handler: ClickHandler<WebElement>) {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(origin) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };

            let click = Click {
                target: WebElement(origin),
            };
            if handler(&click) == Flow::Prevent {
                event.prevent_default();
            }
        });

        self.listen(target.0.clone().into(), "click", callback);
    }

    fn on_keydown(&mut self, mut handler: KeyHandler) {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                handler(&Key::from(event.key().as_str()));
            }
        });

        self.listen(self.page.document.clone().into(), "keydown", callback);
    }

    fn on_scroll(&mut self, mut handler: ScrollHandler) {
        let window = self.page.window.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            handler(window.scroll_y().unwrap_or(0.0));
        });

        self.listen(self.page.window.clone().into(), "scroll", callback);
    }

    fn observe_intersection(
        &mut self,
        targets: &[WebElement],
        options: IntersectionOptions,
        mut handler: IntersectionHandler<WebElement>,
    ) {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _: IntersectionObserver| {
                let batch: Vec<Intersection<WebElement>> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| Intersection {
                        target: WebElement(entry.target()),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();

                handler(&batch);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => observer,
                Err(err) => {
                    warn!("failed to create intersection observer: {err:?}");
                    return;
                }
            };

        for target in targets {
            observer.observe(&target.0);
        }

        self.observers.push(Observer {
            observer,
            _callback: callback,
        });
    }
}

// browser timers; dropping a gloo Timeout clears it
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    type Handle = Timeout;

    fn schedule(&self, wait_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(wait_ms, callback)
    }
}
