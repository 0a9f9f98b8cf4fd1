use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, Window};

use crate::listeners::Listener;

const ORIENTATION_SETTLE_MS: u32 = 100;

/// Keeps the `--vh` custom property equal to 1% of the inner window height,
/// so full-viewport sections size correctly under mobile browser chrome.
pub struct ViewportHeightFix {
    _resize: Listener,
    _orientation: Listener,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl ViewportHeightFix {
    pub fn install(window: &Window) -> Result<Self, JsValue> {
        apply_viewport_height(window);

        let resize_window = window.clone();
        let resize = Listener::new(window, "resize", true, move |_| {
            apply_viewport_height(&resize_window);
        })?;

        // The reported height is stale right after an orientation change.
        let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let orientation_window = window.clone();
        let orientation_pending = Rc::clone(&pending);
        let orientation = Listener::new(window, "orientationchange", true, move |_| {
            let window = orientation_window.clone();
            let timeout = Timeout::new(ORIENTATION_SETTLE_MS, move || {
                apply_viewport_height(&window);
            });
            // replacing drops and cancels the previous timeout
            *orientation_pending.borrow_mut() = Some(timeout);
        })?;

        Ok(Self {
            _resize: resize,
            _orientation: orientation,
            pending,
        })
    }
}

impl Drop for ViewportHeightFix {
    fn drop(&mut self) {
        self.pending.borrow_mut().take();
    }
}

pub fn apply_viewport_height(window: &Window) {
    let Some(height) = window.inner_height().ok().and_then(|h| h.as_f64()) else {
        return;
    };
    let Some(root) = window
        .document()
        .and_then(|d| d.document_element())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    if let Err(e) = root.style().set_property("--vh", &vh_value(height)) {
        log::warn!("failed to set --vh: {e:?}");
    }
}

fn vh_value(inner_height: f64) -> String {
    format!("{}px", inner_height * 0.01)
}
