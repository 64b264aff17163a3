use std::rc::Rc;

use tracing::{Level, debug, instrument};

use crate::{
    config::SiteConfig,
    dom::{Document, Element, Events},
};

// header scroll style
//
// recomputed from the raw offset on every scroll event.  there is no
// hysteresis and no throttling, so the class tracks the position exactly
pub struct HeaderScrollStyle<E: Element> {
    header: E,
    threshold: f64,
    class: String,
}

impl<E: Element> HeaderScrollStyle<E> {
    pub fn new(header: E, threshold: f64, class: &str) -> Self {
        HeaderScrollStyle {
            header,
            threshold,
            class: class.to_string(),
        }
    }

    pub fn update(&self, scroll_y: f64) {
        if scroll_y > self.threshold {
            self.header.add_class(&self.class);
        } else {
            self.header.remove_class(&self.class);
        }
    }
}

#[instrument(level=Level::DEBUG, skip_all)]
pub fn attach<D, V>(
    doc: &Rc<D>,
    events: &mut V,
    config: &SiteConfig,
) -> Option<Rc<HeaderScrollStyle<D::Element>>>
where
    D: Document,
    V: Events<D::Element>,
{
    let Some(header) = doc.query(&config.selectors.header) else {
        debug!("no header on this page");
        return None;
    };

    let style = Rc::new(HeaderScrollStyle::new(
        header,
        config.header_threshold,
        &config.classes.scrolled,
    ));

    {
        let style = style.clone();
        events.on_scroll(Box::new(move |scroll_y: f64| style.update(scroll_y)));
    }

    debug!("attached header scroll style");
    Some(style)
}
