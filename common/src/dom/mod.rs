#[cfg(test)]
pub mod fake;

// page abstraction
//
// every behavior in this crate is written against these traits rather than
// against web-sys directly.  the webapp crate provides the browser host, and
// the fake module provides an in-memory page for the unit tests
//
// the html and css are owned by the server, so the only things we ever do
// to an element are read its attributes/geometry and flip classes on it

// bounding box relative to the viewport, in css pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

// the subset of KeyboardEvent.key values that anything here cares about
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl From<&str> for Key {
    fn from(key: &str) -> Key {
        match key {
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

// returned by click handlers; Prevent suppresses the browser default action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Default,
    Prevent,
}

// the element the click started on, which is not necessarily the element
// the handler was attached to (clicks bubble up to ancestors)
#[derive(Clone, Debug)]
pub struct Click<E> {
    pub target: E,
}

#[derive(Clone, Debug)]
pub struct Intersection<E> {
    pub target: E,
    pub is_intersecting: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionOptions {
    pub threshold: f64,
    pub root_margin: String,
}

pub trait Element: Clone + PartialEq + 'static {
    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    // returns whether the class is present afterwards
    fn toggle_class(&self, class: &str) -> bool;

    fn has_class(&self, class: &str) -> bool;

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    // first descendant matching the selector
    fn query(&self, selector: &str) -> Option<Self>;

    fn offset_top(&self) -> f64;

    fn bounding_rect(&self) -> Rect;
}

pub trait Document: 'static {
    type Element: Element;

    fn query(&self, selector: &str) -> Option<Self::Element>;

    // all matches, in document order
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn viewport(&self) -> Viewport;

    // animated scroll of the window to a vertical offset
    fn smooth_scroll_to(&self, top: f64);

    fn set_body_overflow(&self, value: &str);

    fn pathname(&self) -> String;
}

pub type ClickHandler<E> = Box<dyn FnMut(&Click<E>) -> Flow>;
pub type KeyHandler = Box<dyn FnMut(&Key)>;
pub type ScrollHandler = Box<dyn FnMut(f64)>;
pub type IntersectionHandler<E> = Box<dyn FnMut(&[Intersection<E>])>;

// listener registration
//
// the registry owns every handler it is given, so dropping it is what tears
// the page behavior down.  handlers for the same event on the same element
// run in registration order
pub trait Events<E: Element> {
    fn on_click(&mut self, target: &E, handler: ClickHandler<E>);

    // document-level
    fn on_keydown(&mut self, handler: KeyHandler);

    // window-level, the handler receives the current vertical scroll offset
    fn on_scroll(&mut self, handler: ScrollHandler);

    fn observe_intersection(
        &mut self,
        targets: &[E],
        options: IntersectionOptions,
        handler: IntersectionHandler<E>,
    );
}

// one-shot timers, where dropping the handle cancels the pending callback
pub trait Scheduler {
    type Handle: 'static;

    fn schedule(&self, wait_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}
