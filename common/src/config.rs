use serde::{Deserialize, Serialize};
use toml;
use tracing::{Level, debug, instrument};

// site behavior configuration
//
// every selector, class name and magic number the behaviors depend on.  the
// defaults match the markup and stylesheet the site ships with, so a page
// without any configuration gets the stock behavior
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub selectors: Selectors,
    pub classes: Classes,

    // attribute on each menu tab naming the id of its content block
    pub category_attribute: String,

    pub reveal: RevealConfig,

    // distance kept between an anchor target and the top of the viewport,
    // so the fixed header does not cover it
    pub header_clearance: f64,

    // vertical scroll offset past which the header gets the scrolled style
    pub header_threshold: f64,

    // page name used when the url path ends in a slash
    pub default_page: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Selectors {
    pub hamburger: String,
    pub mobile_menu: String,
    pub mobile_menu_links: String,
    pub reveal: String,
    pub menu_tab: String,
    pub menu_content: String,
    pub gallery_item: String,
    pub gallery_image: String,
    pub lightbox: String,
    pub lightbox_image: String,
    pub lightbox_close: String,
    pub lightbox_prev: String,
    pub lightbox_next: String,
    pub anchor_links: String,
    pub header: String,
    pub nav_links: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Classes {
    pub active: String,
    pub scrolled: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct RevealConfig {
    // fraction of the element that must be visible
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            selectors: Selectors::default(),
            classes: Classes::default(),
            category_attribute: String::from("data-category"),
            reveal: RevealConfig::default(),
            header_clearance: 80.0,
            header_threshold: 50.0,
            default_page: String::from("index.html"),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Selectors {
            hamburger: String::from(".hamburger"),
            mobile_menu: String::from(".mobile-menu"),
            mobile_menu_links: String::from(".mobile-menu a"),
            reveal: String::from(".reveal"),
            menu_tab: String::from(".menu-tab"),
            menu_content: String::from(".menu-content"),
            gallery_item: String::from(".gallery-item"),
            gallery_image: String::from("img"),
            lightbox: String::from(".lightbox"),
            lightbox_image: String::from(".lightbox-content img"),
            lightbox_close: String::from(".lightbox-close"),
            lightbox_prev: String::from(".lightbox-prev"),
            lightbox_next: String::from(".lightbox-next"),
            anchor_links: String::from("a[href^=\"#\"]"),
            header: String::from(".header"),
            nav_links: String::from(".nav-links a"),
        }
    }
}

impl Default for Classes {
    fn default() -> Self {
        Classes {
            active: String::from("active"),
            scrolled: String::from("scrolled"),
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig {
            threshold: 0.15,
            root_margin: String::from("0px 0px -50px 0px"),
        }
    }
}

// the site config sits under a [config] table so the same inline block can
// carry other tables later without tripping the parser
#[derive(Debug, Default, Deserialize, Serialize)]
struct TomlConfigFile {
    #[serde(default)]
    config: SiteConfig,
}

impl SiteConfig {
    #[instrument(level=Level::DEBUG, skip(doc))]
    pub fn from_toml(doc: &str) -> anyhow::Result<SiteConfig> {
        debug!("parsing site config");

        let data: TomlConfigFile = toml::from_str(doc)
            .map_err(|err| anyhow::Error::msg(format!("failed to parse site config: {err}")))?;

        debug!("successfully parsed site config");
        Ok(data.config)
    }
}
