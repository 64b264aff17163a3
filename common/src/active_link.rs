use tracing::{Level, debug, instrument};

use crate::{
    config::SiteConfig,
    dom::{Document, Element},
};

// last path segment, or the default page when the path ends in a slash
pub fn current_page(pathname: &str, default_page: &str) -> String {
    match pathname.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => default_page.to_string(),
    }
}

// literal string comparison against the href attribute, no url resolution
fn matches(href: &str, current: &str, default_page: &str) -> bool {
    href == current || (current.is_empty() && href == default_page)
}

// runs once at load.  links are only ever marked, never unmarked, and every
// link whose href matches gets the class
#[instrument(level=Level::DEBUG, skip_all)]
pub fn mark<D: Document>(doc: &D, config: &SiteConfig) -> usize {
    let current = current_page(&doc.pathname(), &config.default_page);

    let mut links = doc.query_all(&config.selectors.nav_links);
    for link in doc.query_all(&config.selectors.mobile_menu_links) {
        if !links.contains(&link) {
            links.push(link);
        }
    }

    let mut marked = 0;
    for link in &links {
        let href = link.attribute("href").unwrap_or_default();

        if matches(&href, &current, &config.default_page) {
            link.add_class(&config.classes.active);
            marked += 1;
        }
    }

    debug!(page = %current, marked, "marked active nav links");
    marked
}
