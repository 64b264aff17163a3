use std::{cell::Cell, rc::Rc};

use tracing::debug;

use crate::dom::Document;

// body scroll lock
//
// both the mobile menu and the lightbox want the page behind them frozen
// while they are open.  instead of each of them writing body overflow
// directly (where whoever closes last wins), they hold guards from a shared
// counter and the body stays locked until the last guard is dropped
pub struct ScrollLock<D: Document> {
    doc: Rc<D>,
    held: Rc<Cell<usize>>,
}

impl<D: Document> Clone for ScrollLock<D> {
    fn clone(&self) -> Self {
        ScrollLock {
            doc: self.doc.clone(),
            held: self.held.clone(),
        }
    }
}

impl<D: Document> ScrollLock<D> {
    pub fn new(doc: Rc<D>) -> Self {
        ScrollLock {
            doc,
            held: Rc::new(Cell::new(0)),
        }
    }

    pub fn acquire(&self) -> ScrollLockGuard<D> {
        let held = self.held.get() + 1;
        self.held.set(held);

        if held == 1 {
            debug!("locking page scroll");
            self.doc.set_body_overflow("hidden");
        }

        ScrollLockGuard { lock: self.clone() }
    }

    pub fn is_locked(&self) -> bool {
        self.held.get() > 0
    }
}

pub struct ScrollLockGuard<D: Document> {
    lock: ScrollLock<D>,
}

impl<D: Document> Drop for ScrollLockGuard<D> {
    fn drop(&mut self) {
        let held = self.lock.held.get().saturating_sub(1);
        self.lock.held.set(held);

        if held == 0 {
            debug!("unlocking page scroll");
            self.lock.doc.set_body_overflow("");
        }
    }
}

// a component's single claim on the lock, so that repeated opens or closes
// never stack or underflow
pub struct LockSlot<D: Document> {
    lock: ScrollLock<D>,
    guard: Option<ScrollLockGuard<D>>,
}

impl<D: Document> LockSlot<D> {
    pub fn new(lock: ScrollLock<D>) -> Self {
        LockSlot { lock, guard: None }
    }

    pub fn set(&mut self, locked: bool) {
        match (locked, self.guard.is_some()) {
            (true, false) => self.guard = Some(self.lock.acquire()),
            (false, true) => self.guard = None,
            _ => {}
        }
    }

    pub fn is_held(&self) -> bool {
        self.guard.is_some()
    }
}
