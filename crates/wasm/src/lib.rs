mod dom;
mod host;
mod input;
mod listeners;
mod options;
mod viewport;

use section_pager_core::SectionPager;
use wasm_bindgen::prelude::*;

use crate::host::PagerHost;
use crate::input::js_index;
use crate::options::HostOptions;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"section-pager: logger already installed".into());
    }
}

/// Bind a pager to the sections of the current document.
///
/// `options_json` overrides selectors, class names and thresholds (see
/// `HostOptions`). `decoration`, if given, is called once after the first
/// section has been projected, to start purely visual effects.
#[wasm_bindgen(js_name = mountSectionPager)]
pub fn mount_section_pager(
    options_json: Option<String>,
    decoration: Option<js_sys::Function>,
) -> Result<SectionPagerHandle, JsError> {
    let options = HostOptions::from_json(options_json.as_deref())
        .map_err(|e| JsError::new(&e.to_string()))?;
    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let host =
        PagerHost::mount(&window, &options).map_err(|e| JsError::new(&format!("{e:?}")))?;

    if let Some(decoration) = decoration
        && let Err(e) = decoration.call0(&JsValue::NULL)
    {
        log::error!("decoration failed to start: {e:?}");
    }

    Ok(SectionPagerHandle { host: Some(host) })
}

/// Handle returned to JavaScript. Dropping it (or calling `destroy`)
/// detaches every listener and cancels pending timers.
#[wasm_bindgen]
pub struct SectionPagerHandle {
    host: Option<PagerHost>,
}

#[wasm_bindgen]
impl SectionPagerHandle {
    /// Navigate to `index`, clamped into range. Dropped while a transition
    /// is settling, like any gesture.
    #[wasm_bindgen(js_name = goToSection)]
    pub fn go_to_section(&self, index: f64) {
        if let (Some(host), Some(index)) = (&self.host, js_index(index)) {
            host.go_to_section(index);
        }
    }

    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> Option<usize> {
        self.host
            .as_ref()
            .map(|host| host.with_pager(SectionPager::current_index))
    }

    #[wasm_bindgen(js_name = isTransitioning)]
    pub fn is_transitioning(&self) -> bool {
        self.host
            .as_ref()
            .is_some_and(|host| host.with_pager(SectionPager::is_transitioning))
    }

    /// Navigation state as JSON, for debugging overlays.
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsError> {
        let host = self
            .host
            .as_ref()
            .ok_or_else(|| JsError::new("pager destroyed"))?;
        host.with_pager(|pager| serde_json::to_string(pager.state()))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn destroy(&mut self) {
        if let Some(mut host) = self.host.take() {
            host.teardown();
        }
    }
}
