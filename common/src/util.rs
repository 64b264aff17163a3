use std::{cell::RefCell, rc::Rc};

use crate::dom::{Document, Element, Rect, Scheduler, Viewport};

// trailing-edge debounce
//
// each call restarts the wait; the wrapped function only runs once the calls
// have stopped for wait_ms, and it sees the arguments of the last call
pub struct Debounced<S: Scheduler, A> {
    scheduler: S,
    wait_ms: u32,
    func: Rc<RefCell<dyn FnMut(A)>>,
    pending: RefCell<Option<S::Handle>>,
}

pub fn debounce<S, A, F>(scheduler: S, wait_ms: u32, func: F) -> Debounced<S, A>
where
    S: Scheduler,
    A: 'static,
    F: FnMut(A) + 'static,
{
    Debounced {
        scheduler,
        wait_ms,
        func: Rc::new(RefCell::new(func)),
        pending: RefCell::new(None),
    }
}

impl<S: Scheduler, A: 'static> Debounced<S, A> {
    pub fn call(&self, args: A) {
        let func = self.func.clone();

        let handle = self.scheduler.schedule(
            self.wait_ms,
            Box::new(move || (*func.borrow_mut())(args)),
        );

        // replacing the handle drops, and therefore cancels, the previous timer
        let previous = self.pending.replace(Some(handle));
        drop(previous);
    }

    pub fn cancel(&self) {
        self.pending.take();
    }
}

// true iff the box lies entirely inside the viewport on all four edges
pub fn rect_in_viewport(rect: &Rect, viewport: &Viewport) -> bool {
    rect.top >= 0.0
        && rect.left >= 0.0
        && rect.bottom <= viewport.height
        && rect.right <= viewport.width
}

pub fn is_in_viewport<D: Document>(doc: &D, element: &D::Element) -> bool {
    rect_in_viewport(&element.bounding_rect(), &doc.viewport())
}
