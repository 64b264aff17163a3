use std::rc::Rc;

use tracing::{Level, debug, instrument};

use crate::{
    config::SiteConfig,
    dom::{Document, Element, Events, Intersection, IntersectionOptions},
};

// the active class is only ever added, so an element that has been revealed
// stays revealed no matter how often it leaves and re-enters the viewport
pub fn activate<E: Element>(entries: &[Intersection<E>], class: &str) {
    for entry in entries.iter().filter(|e| e.is_intersecting) {
        entry.target.add_class(class);
    }
}

// returns the number of elements placed under observation
#[instrument(level=Level::DEBUG, skip_all)]
pub fn attach<D, V>(doc: &Rc<D>, events: &mut V, config: &SiteConfig) -> usize
where
    D: Document,
    V: Events<D::Element>,
{
    let targets = doc.query_all(&config.selectors.reveal);

    if targets.is_empty() {
        debug!("no reveal elements on this page");
        return 0;
    }

    let options = IntersectionOptions {
        threshold: config.reveal.threshold,
        root_margin: config.reveal.root_margin.clone(),
    };

    let class = config.classes.active.clone();
    events.observe_intersection(
        &targets,
        options,
        Box::new(move |entries: &[Intersection<D::Element>]| activate(entries, &class)),
    );

    debug!(count = targets.len(), "observing reveal elements");
    targets.len()
}
