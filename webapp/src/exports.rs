use common::util;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::host::{GlooScheduler, WebElement, WebPage};

// helpers exposed to inline page scripts
//
// nothing in the site behaviors uses these, they exist so page-specific
// scripts can share the same debounce and viewport logic

// closures cannot be variadic, so a small js wrapper packs the arguments of
// each call into one array before handing them over
const PACK_ARGUMENTS: &str = "return function() { fire(Array.prototype.slice.call(arguments)); };";

// the returned function calls func with the arguments of the most recent
// call, once calls have stopped for wait milliseconds
#[wasm_bindgen(js_name = debounce)]
pub fn debounce_js(func: js_sys::Function, wait: u32) -> Result<js_sys::Function, JsValue> {
    let debounced = util::debounce(GlooScheduler, wait, move |args: js_sys::Array| {
        if let Err(err) = func.apply(&JsValue::NULL, &args) {
            warn!("debounced function threw: {err:?}");
        }
    });

    let fire = Closure::<dyn FnMut(js_sys::Array)>::new(move |args: js_sys::Array| {
        debounced.call(args)
    });

    js_sys::Function::new_with_args("fire", PACK_ARGUMENTS)
        .call1(&JsValue::NULL, &fire.into_js_value())?
        .dyn_into()
}

#[wasm_bindgen(js_name = isInViewport)]
pub fn is_in_viewport_js(element: web_sys::Element) -> bool {
    match WebPage::new() {
        Ok(page) => util::is_in_viewport(&page, &WebElement(element)),
        Err(err) => {
            warn!("isInViewport called without a page: {err}");
            false
        }
    }
}
