use std::rc::Rc;

use tracing::{Level, debug, instrument};

use crate::{
    config::SiteConfig,
    dom::{Click, Document, Element, Events, Flow},
};

// menu category tabs
//
// each tab names the id of its content block in the category attribute.
// selecting a tab clears every tab and every block, then marks the tab and
// whichever block has that id
pub struct TabSwitcher<D: Document> {
    doc: Rc<D>,
    tabs: Vec<D::Element>,
    panels: Vec<D::Element>,
    attribute: String,
    active: String,
}

impl<D: Document> TabSwitcher<D> {
    pub fn select(&self, tab: &D::Element) {
        for t in &self.tabs {
            t.remove_class(&self.active);
        }
        for p in &self.panels {
            p.remove_class(&self.active);
        }

        tab.add_class(&self.active);

        let category = tab.attribute(&self.attribute);
        match category.as_deref().and_then(|c| self.doc.element_by_id(c)) {
            Some(panel) => panel.add_class(&self.active),
            None => debug!(?category, "no content block for tab"),
        }
    }

    pub fn active_tab(&self) -> Option<&D::Element> {
        self.tabs.iter().find(|t| t.has_class(&self.active))
    }
}

#[instrument(level=Level::DEBUG, skip_all)]
pub fn attach<D, V>(doc: &Rc<D>, events: &mut V, config: &SiteConfig) -> Option<Rc<TabSwitcher<D>>>
where
    D: Document,
    V: Events<D::Element>,
{
    let tabs = doc.query_all(&config.selectors.menu_tab);

    if tabs.is_empty() {
        debug!("no menu tabs on this page");
        return None;
    }

    let switcher = Rc::new(TabSwitcher {
        doc: doc.clone(),
        tabs: tabs.clone(),
        panels: doc.query_all(&config.selectors.menu_content),
        attribute: config.category_attribute.clone(),
        active: config.classes.active.clone(),
    });

    for tab in &tabs {
        let switcher = switcher.clone();
        let selected = tab.clone();
        events.on_click(
            tab,
            Box::new(move |_: &Click<D::Element>| {
                switcher.select(&selected);
                Flow::Default
            }),
        );
    }

    debug!(tabs = tabs.len(), panels = switcher.panels.len(), "attached menu tabs");
    Some(switcher)
}
