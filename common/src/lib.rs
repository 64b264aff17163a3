pub mod active_link;
pub mod config;
pub mod dom;
pub mod header;
pub mod lightbox;
pub mod menu;
pub mod reveal;
pub mod scroll_lock;
pub mod site;
pub mod smooth_scroll;
pub mod tabs;
pub mod util;

// shared with the webapp so the inline config element and the loader agree
pub const CONFIG_ELEMENT_ID: &str = "site-config";
