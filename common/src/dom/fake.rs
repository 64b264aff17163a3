use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet},
    fmt,
    rc::{Rc, Weak},
};

use super::*;

// in-memory page used by the unit tests
//
// there is no selector engine: each element is created with the list of
// selectors it should answer to, and queries are plain string matches
// against that list
pub struct FakeNode {
    selectors: Vec<String>,
    parent: Option<Weak<FakeNode>>,
    children: RefCell<Vec<FakeElement>>,
    classes: RefCell<BTreeSet<String>>,
    attributes: RefCell<BTreeMap<String, String>>,
    offset_top: Cell<f64>,
    rect: Cell<Rect>,
}

#[derive(Clone)]
pub struct FakeElement(Rc<FakeNode>);

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeElement")
            .field("selectors", &self.0.selectors)
            .field("classes", &self.0.classes.borrow())
            .finish()
    }
}

impl FakeElement {
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_offset_top(self, top: f64) -> Self {
        self.0.offset_top.set(top);
        self
    }

    pub fn with_rect(self, rect: Rect) -> Self {
        self.0.rect.set(rect);
        self
    }

    fn matches(&self, selector: &str) -> bool {
        self.0.selectors.iter().any(|s| s == selector)
    }

    // the element itself followed by its ancestors, innermost first
    pub fn ancestors(&self) -> Vec<FakeElement> {
        let mut chain = vec![self.clone()];
        let mut next = self.0.parent.as_ref().and_then(Weak::upgrade);

        while let Some(node) = next {
            next = node.parent.as_ref().and_then(Weak::upgrade);
            chain.push(FakeElement(node));
        }

        chain
    }

    fn descendants(&self) -> Vec<FakeElement> {
        let mut found = Vec::new();

        for child in self.0.children.borrow().iter() {
            found.push(child.clone());
            found.extend(child.descendants());
        }

        found
    }
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) {
        self.0.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.classes.borrow_mut().remove(class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        let mut classes = self.0.classes.borrow_mut();

        if classes.remove(class) {
            false
        } else {
            classes.insert(class.to_string());
            true
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn query(&self, selector: &str) -> Option<Self> {
        self.descendants().into_iter().find(|e| e.matches(selector))
    }

    fn offset_top(&self) -> f64 {
        self.0.offset_top.get()
    }

    fn bounding_rect(&self) -> Rect {
        self.0.rect.get()
    }
}

pub struct FakePage {
    elements: RefCell<Vec<FakeElement>>,
    viewport: Cell<Viewport>,
    pathname: RefCell<String>,
    body_overflow: RefCell<String>,
    scrolls: RefCell<Vec<f64>>,
}

impl FakePage {
    pub fn new() -> Self {
        FakePage {
            elements: RefCell::new(Vec::new()),
            viewport: Cell::new(Viewport {
                width: 1024.0,
                height: 768.0,
            }),
            pathname: RefCell::new(String::from("/")),
            body_overflow: RefCell::new(String::new()),
            scrolls: RefCell::new(Vec::new()),
        }
    }

    // appends an element in document order
    pub fn add(&self, selectors: &[&str], parent: Option<&FakeElement>) -> FakeElement {
        let element = FakeElement(Rc::new(FakeNode {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            parent: parent.map(|p| Rc::downgrade(&p.0)),
            children: RefCell::new(Vec::new()),
            classes: RefCell::new(BTreeSet::new()),
            attributes: RefCell::new(BTreeMap::new()),
            offset_top: Cell::new(0.0),
            rect: Cell::new(Rect::default()),
        }));

        if let Some(parent) = parent {
            parent.0.children.borrow_mut().push(element.clone());
        }

        self.elements.borrow_mut().push(element.clone());
        element
    }

    pub fn set_pathname(&self, pathname: &str) {
        *self.pathname.borrow_mut() = pathname.to_string();
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }

    pub fn body_overflow(&self) -> String {
        self.body_overflow.borrow().clone()
    }

    pub fn scrolls(&self) -> Vec<f64> {
        self.scrolls.borrow().clone()
    }
}

impl Document for FakePage {
    type Element = FakeElement;

    fn query(&self, selector: &str) -> Option<FakeElement> {
        self.elements
            .borrow()
            .iter()
            .find(|e| e.matches(selector))
            .cloned()
    }

    fn query_all(&self, selector: &str) -> Vec<FakeElement> {
        self.elements
            .borrow()
            .iter()
            .filter(|e| e.matches(selector))
            .cloned()
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        self.elements
            .borrow()
            .iter()
            .find(|e| e.attribute("id").as_deref() == Some(id))
            .cloned()
    }

    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn smooth_scroll_to(&self, top: f64) {
        self.scrolls.borrow_mut().push(top);
    }

    fn set_body_overflow(&self, value: &str) {
        *self.body_overflow.borrow_mut() = value.to_string();
    }

    fn pathname(&self) -> String {
        self.pathname.borrow().clone()
    }
}

// listener registry that dispatches synthetic events
#[derive(Default)]
pub struct FakeEvents {
    clicks: Vec<(FakeElement, ClickHandler<FakeElement>)>,
    keys: Vec<KeyHandler>,
    scrolls: Vec<ScrollHandler>,
    observers: Vec<(
        Vec<FakeElement>,
        IntersectionOptions,
        IntersectionHandler<FakeElement>,
    )>,
}

impl FakeEvents {
    // bubbles from the target up through its ancestors
    pub fn click(&mut self, target: &FakeElement) -> Flow {
        let click = Click {
            target: target.clone(),
        };
        let mut flow = Flow::Default;

        for node in target.ancestors() {
            for (element, handler) in self.clicks.iter_mut() {
                if *element == node && handler(&click) == Flow::Prevent {
                    flow = Flow::Prevent;
                }
            }
        }

        flow
    }

    pub fn key(&mut self, key: Key) {
        for handler in self.keys.iter_mut() {
            handler(&key);
        }
    }

    pub fn scroll(&mut self, scroll_y: f64) {
        for handler in self.scrolls.iter_mut() {
            handler(scroll_y);
        }
    }

    pub fn intersect(&mut self, target: &FakeElement, is_intersecting: bool) {
        let entry = Intersection {
            target: target.clone(),
            is_intersecting,
        };

        for (targets, _, handler) in self.observers.iter_mut() {
            if targets.contains(target) {
                handler(std::slice::from_ref(&entry));
            }
        }
    }

    pub fn observer_options(&self) -> Vec<IntersectionOptions> {
        self.observers.iter().map(|(_, o, _)| o.clone()).collect()
    }

    pub fn click_listeners(&self) -> usize {
        self.clicks.len()
    }

    pub fn key_listeners(&self) -> usize {
        self.keys.len()
    }

    pub fn scroll_listeners(&self) -> usize {
        self.scrolls.len()
    }
}

impl Events<FakeElement> for FakeEvents {
    fn on_click(&mut self, target: &FakeElement, handler: ClickHandler<FakeElement>) {
        self.clicks.push((target.clone(), handler));
    }

    fn on_keydown(&mut self, handler: KeyHandler) {
        self.keys.push(handler);
    }

    fn on_scroll(&mut self, handler: ScrollHandler) {
        self.scrolls.push(handler);
    }

    fn observe_intersection(
        &mut self,
        targets: &[FakeElement],
        options: IntersectionOptions,
        handler: IntersectionHandler<FakeElement>,
    ) {
        self.observers.push((targets.to_vec(), options, handler));
    }
}

// virtual clock for the timer tests
//
// nothing runs until advance() is called, at which point every callback due
// by the new time fires in due order
#[derive(Clone, Default)]
pub struct FakeClock {
    state: Rc<RefCell<ClockState>>,
}

#[derive(Default)]
struct ClockState {
    now: u64,
    next_id: u64,
    pending: Vec<(u64, u64, Box<dyn FnOnce()>)>,
}

pub struct FakeTimeout {
    id: u64,
    state: Weak<RefCell<ClockState>>,
}

impl Drop for FakeTimeout {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().pending.retain(|(id, _, _)| *id != self.id);
        }
    }
}

impl FakeClock {
    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn advance(&self, ms: u64) {
        let until = self.state.borrow().now + ms;

        loop {
            // the state borrow must be released before the callback runs, since
            // callbacks are free to schedule or cancel timers themselves
            let due = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, at, _))| *at <= until)
                    .min_by_key(|(_, (id, at, _))| (*at, *id))
                    .map(|(idx, _)| idx);

                match next {
                    Some(idx) => {
                        let (_, at, callback) = state.pending.remove(idx);
                        state.now = at;
                        Some(callback)
                    }
                    None => None,
                }
            };

            match due {
                Some(callback) => callback(),
                None => break,
            }
        }

        self.state.borrow_mut().now = until;
    }
}

impl Scheduler for FakeClock {
    type Handle = FakeTimeout;

    fn schedule(&self, wait_ms: u32, callback: Box<dyn FnOnce()>) -> FakeTimeout {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        let at = state.now + u64::from(wait_ms);

        state.next_id += 1;
        state.pending.push((id, at, callback));

        FakeTimeout {
            id,
            state: Rc::downgrade(&self.state),
        }
    }
}
