use std::{cell::RefCell, rc::Rc};

use tracing::{Level, info, instrument};

use crate::{
    active_link,
    config::SiteConfig,
    dom::{Document, Events},
    header::{self, HeaderScrollStyle},
    lightbox::{self, Lightbox},
    menu::{self, MenuToggle},
    reveal,
    scroll_lock::ScrollLock,
    smooth_scroll,
    tabs::{self, TabSwitcher},
};

// everything the initializers set up on one page
//
// the handlers themselves live in the event registry; these are the same
// components, kept so the host can inspect or drive them
pub struct Site<D: Document> {
    pub scroll_lock: ScrollLock<D>,
    pub menu: Option<Rc<RefCell<MenuToggle<D>>>>,
    pub reveals: usize,
    pub tabs: Option<Rc<TabSwitcher<D>>>,
    pub lightbox: Option<Rc<RefCell<Lightbox<D>>>>,
    pub anchors: usize,
    pub header: Option<Rc<HeaderScrollStyle<D::Element>>>,
    pub active_links: usize,
}

// runs every initializer once, in a fixed order.  each one is independent
// and silently skips itself when its markup is not on the page
#[instrument(level=Level::DEBUG, skip_all)]
pub fn init<D, V>(doc: Rc<D>, events: &mut V, config: &SiteConfig) -> Site<D>
where
    D: Document,
    V: Events<D::Element>,
{
    let scroll_lock = ScrollLock::new(doc.clone());

    let site = Site {
        menu: menu::attach(&doc, events, config, &scroll_lock),
        reveals: reveal::attach(&doc, events, config),
        tabs: tabs::attach(&doc, events, config),
        lightbox: lightbox::attach(&doc, events, config, &scroll_lock),
        anchors: smooth_scroll::attach(&doc, events, config),
        header: header::attach(&doc, events, config),
        active_links: active_link::mark(doc.as_ref(), config),
        scroll_lock,
    };

    info!(
        menu = site.menu.is_some(),
        reveals = site.reveals,
        tabs = site.tabs.is_some(),
        lightbox = site.lightbox.is_some(),
        anchors = site.anchors,
        header = site.header.is_some(),
        active_links = site.active_links,
        "site behaviors attached"
    );

    site
}
