use std::{cell::RefCell, rc::Rc};

use tracing::{Level, debug, instrument, warn};

use crate::{
    config::SiteConfig,
    dom::{Click, Document, Element, Events, Flow, Key},
    scroll_lock::{LockSlot, ScrollLock},
};

// gallery
//
// the ordered image sources backing the lightbox, plus the index currently
// on display.  next and prev wrap around in both directions, and on an empty
// gallery they leave the index where it is
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gallery {
    sources: Vec<String>,
    current: usize,
}

impl Gallery {
    pub fn new(sources: Vec<String>) -> Self {
        Gallery { sources, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn source(&self) -> Option<&str> {
        self.sources.get(self.current).map(String::as_str)
    }

    // returns false, leaving the index alone, if the index is out of range
    pub fn set(&mut self, index: usize) -> bool {
        if index < self.sources.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) {
        if let Some(len) = self.nonzero_len() {
            self.current = (self.current + 1) % len;
        }
    }

    pub fn prev(&mut self) {
        if let Some(len) = self.nonzero_len() {
            self.current = (self.current + len - 1) % len;
        }
    }

    fn nonzero_len(&self) -> Option<usize> {
        match self.sources.len() {
            0 => None,
            len => Some(len),
        }
    }
}

pub struct Lightbox<D: Document> {
    container: D::Element,
    image: Option<D::Element>,
    gallery: Gallery,
    active: String,
    lock: LockSlot<D>,
}

impl<D: Document> Lightbox<D> {
    pub fn new(
        container: D::Element,
        image: Option<D::Element>,
        gallery: Gallery,
        active: &str,
        lock: ScrollLock<D>,
    ) -> Self {
        Lightbox {
            container,
            image,
            gallery,
            active: active.to_string(),
            lock: LockSlot::new(lock),
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn is_open(&self) -> bool {
        self.container.has_class(&self.active)
    }

    pub fn open(&mut self, index: usize) {
        if !self.gallery.set(index) {
            warn!(index, len = self.gallery.len(), "lightbox index out of range");
            return;
        }

        self.show();
        self.container.add_class(&self.active);
        self.lock.set(true);
    }

    pub fn close(&mut self) {
        self.container.remove_class(&self.active);
        self.lock.set(false);
    }

    pub fn next(&mut self) {
        self.gallery.next();
        self.show();
    }

    pub fn prev(&mut self) {
        self.gallery.prev();
        self.show();
    }

    // keys are ignored entirely while the lightbox is hidden
    pub fn handle_key(&mut self, key: &Key) {
        if !self.is_open() {
            return;
        }

        match key {
            Key::Escape => self.close(),
            Key::ArrowRight => self.next(),
            Key::ArrowLeft => self.prev(),
            Key::Other(_) => {}
        }
    }

    fn show(&self) {
        if let (Some(image), Some(src)) = (&self.image, self.gallery.source()) {
            image.set_attribute("src", src);
        }
    }
}

#[instrument(level=Level::DEBUG, skip_all)]
pub fn attach<D, V>(
    doc: &Rc<D>,
    events: &mut V,
    config: &SiteConfig,
    lock: &ScrollLock<D>,
) -> Option<Rc<RefCell<Lightbox<D>>>>
where
    D: Document,
    V: Events<D::Element>,
{
    let selectors = &config.selectors;

    let Some(container) = doc.query(&selectors.lightbox) else {
        debug!("no lightbox on this page");
        return None;
    };

    // items without an image contribute nothing to the gallery, and the rest
    // keep their position in it
    let mut items = Vec::new();
    let mut sources = Vec::new();
    for item in doc.query_all(&selectors.gallery_item) {
        match item
            .query(&selectors.gallery_image)
            .and_then(|img| img.attribute("src"))
        {
            Some(src) => {
                items.push((item, sources.len()));
                sources.push(src);
            }
            None => debug!("skipping gallery item without an image"),
        }
    }

    let lightbox = Rc::new(RefCell::new(Lightbox::new(
        container.clone(),
        doc.query(&selectors.lightbox_image),
        Gallery::new(sources),
        &config.classes.active,
        lock.clone(),
    )));

    for (item, index) in &items {
        let lightbox = lightbox.clone();
        let index = *index;
        events.on_click(
            item,
            Box::new(move |_: &Click<D::Element>| {
                lightbox.borrow_mut().open(index);
                Flow::Default
            }),
        );
    }

    let controls: [(&String, fn(&mut Lightbox<D>)); 3] = [
        (&selectors.lightbox_close, Lightbox::close),
        (&selectors.lightbox_next, Lightbox::next),
        (&selectors.lightbox_prev, Lightbox::prev),
    ];
    for (selector, action) in controls {
        if let Some(button) = doc.query(selector) {
            let lightbox = lightbox.clone();
            events.on_click(
                &button,
                Box::new(move |_: &Click<D::Element>| {
                    action(&mut lightbox.borrow_mut());
                    Flow::Default
                }),
            );
        }
    }

    {
        let lightbox = lightbox.clone();
        let backdrop = container.clone();
        events.on_click(
            &container,
            Box::new(move |click: &Click<D::Element>| {
                if click.target == backdrop {
                    lightbox.borrow_mut().close();
                }
                Flow::Default
            }),
        );
    }

    {
        let lightbox = lightbox.clone();
        events.on_keydown(Box::new(move |key: &Key| lightbox.borrow_mut().handle_key(key)));
    }

    debug!(images = items.len(), "attached lightbox");
    Some(lightbox)
}
