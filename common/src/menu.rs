use std::{cell::RefCell, rc::Rc};

use tracing::{Level, debug, instrument};

use crate::{
    config::SiteConfig,
    dom::{Click, Document, Element, Events, Flow},
    scroll_lock::{LockSlot, ScrollLock},
};

// mobile hamburger menu
//
// the trigger and the panel both carry the active class while the menu is
// open.  they are toggled independently, the way the stylesheet expects,
// and the panel's state is what decides the scroll lock
pub struct MenuToggle<D: Document> {
    trigger: D::Element,
    panel: D::Element,
    active: String,
    lock: LockSlot<D>,
}

impl<D: Document> MenuToggle<D> {
    pub fn new(trigger: D::Element, panel: D::Element, active: &str, lock: ScrollLock<D>) -> Self {
        MenuToggle {
            trigger,
            panel,
            active: active.to_string(),
            lock: LockSlot::new(lock),
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel.has_class(&self.active)
    }

    pub fn toggle(&mut self) {
        self.trigger.toggle_class(&self.active);
        let open = self.panel.toggle_class(&self.active);

        debug!(open, "toggled mobile menu");
        self.lock.set(open);
    }

    pub fn close(&mut self) {
        self.trigger.remove_class(&self.active);
        self.panel.remove_class(&self.active);
        self.lock.set(false);
    }
}

#[instrument(level=Level::DEBUG, skip_all)]
pub fn attach<D, V>(
    doc: &Rc<D>,
    events: &mut V,
    config: &SiteConfig,
    lock: &ScrollLock<D>,
) -> Option<Rc<RefCell<MenuToggle<D>>>>
where
    D: Document,
    V: Events<D::Element>,
{
    let selectors = &config.selectors;

    let (Some(trigger), Some(panel)) = (
        doc.query(&selectors.hamburger),
        doc.query(&selectors.mobile_menu),
    ) else {
        debug!("no mobile menu on this page");
        return None;
    };

    let links = doc.query_all(&selectors.mobile_menu_links);

    let menu = Rc::new(RefCell::new(MenuToggle::new(
        trigger.clone(),
        panel.clone(),
        &config.classes.active,
        lock.clone(),
    )));

    {
        let menu = menu.clone();
        events.on_click(
            &trigger,
            Box::new(move |_: &Click<D::Element>| {
                menu.borrow_mut().toggle();
                Flow::Default
            }),
        );
    }

    // following a link out of the menu closes it, and the navigation itself
    // goes ahead as normal
    for link in &links {
        let menu = menu.clone();
        events.on_click(
            link,
            Box::new(move |_: &Click<D::Element>| {
                menu.borrow_mut().close();
                Flow::Default
            }),
        );
    }

    // clicks on the panel backdrop, but not on anything inside it
    {
        let menu = menu.clone();
        let backdrop = panel.clone();
        events.on_click(
            &panel,
            Box::new(move |click: &Click<D::Element>| {
                if click.target == backdrop {
                    menu.borrow_mut().close();
                }
                Flow::Default
            }),
        );
    }

    debug!(links = links.len(), "attached mobile menu");
    Some(menu)
}
