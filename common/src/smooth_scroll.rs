use std::rc::Rc;

use tracing::{Level, debug, instrument};

use crate::{
    config::SiteConfig,
    dom::{Click, Document, Element, Events, Flow},
};

// where an in-page link should scroll to, or None if the browser should be
// left to handle it (a bare "#", or a fragment naming no element)
pub fn scroll_target<D: Document>(doc: &D, href: &str, clearance: f64) -> Option<f64> {
    let id = href.strip_prefix('#')?;

    if id.is_empty() {
        return None;
    }

    let target = doc.element_by_id(id)?;
    Some(target.offset_top() - clearance)
}

// returns the number of links intercepted
#[instrument(level=Level::DEBUG, skip_all)]
pub fn attach<D, V>(doc: &Rc<D>, events: &mut V, config: &SiteConfig) -> usize
where
    D: Document,
    V: Events<D::Element>,
{
    let links = doc.query_all(&config.selectors.anchor_links);

    for link in &links {
        let doc = doc.clone();
        let anchor = link.clone();
        let clearance = config.header_clearance;

        events.on_click(
            link,
            Box::new(move |_: &Click<D::Element>| {
                let href = anchor.attribute("href").unwrap_or_default();

                match scroll_target(doc.as_ref(), &href, clearance) {
                    Some(top) => {
                        doc.smooth_scroll_to(top);
                        Flow::Prevent
                    }
                    None => Flow::Default,
                }
            }),
        );
    }

    debug!(links = links.len(), "attached smooth scroll");
    links.len()
}
