use std::{cell::RefCell, rc::Rc};

use tracing::{Level, debug, error, info, warn};
use wasm_bindgen::{JsCast, prelude::Closure};

use common::{
    CONFIG_ELEMENT_ID,
    config::SiteConfig,
    site::{self, Site},
};

mod exports;

mod host;
use host::{WebEvents, WebPage, js_error};

thread_local! {
    // the registry owns every listener and observer, so it has to outlive
    // main() for the behaviors to stay attached
    static HOST: RefCell<Option<(WebEvents, Site<WebPage>)>> = const { RefCell::new(None) };
}

fn main() {
    dioxus_logger::init(Level::DEBUG).expect("failed to init logger");

    if let Err(err) = boot() {
        error!("failed to start site behaviors: {err:#}");
    }
}

// the module may be loaded before or after the html has been parsed
fn boot() -> anyhow::Result<()> {
    let page = WebPage::new()?;

    if !still_loading(&page.document().ready_state()) {
        return start(page);
    }

    debug!("document still loading, waiting for DOMContentLoaded");

    let document = page.document().clone();
    let ready = Closure::once_into_js(move || {
        if let Err(err) = start(page) {
            error!("failed to start site behaviors: {err:#}");
        }
    });

    document
        .add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())
        .map_err(js_error)
}

// document.readyState is a plain string: "loading", "interactive" or "complete"
fn still_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn start(page: WebPage) -> anyhow::Result<()> {
    let config = load_config(&page);
    let page = Rc::new(page);

    let mut events = WebEvents::new(page.clone());
    let site = site::init(page, &mut events, &config);

    HOST.with(|host| {
        if host.borrow_mut().replace((events, site)).is_some() {
            warn!("site behaviors were already running, replaced them");
        }
    });

    info!("site behaviors running");
    Ok(())
}

// optional <script type="application/toml" id="site-config"> override; a
// broken config falls back to the defaults rather than leaving the page dead
fn load_config(page: &WebPage) -> SiteConfig {
    let Some(doc) = page
        .document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|e| e.text_content())
    else {
        debug!("no inline site config, using defaults");
        return SiteConfig::default();
    };

    match SiteConfig::from_toml(&doc) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err:#}, using defaults");
            SiteConfig::default()
        }
    }
}
