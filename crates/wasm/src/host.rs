use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use section_pager_core::SectionPager;
use section_pager_protocol::{NavKey, ViewCommand};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, KeyboardEvent, TouchEvent, WheelEvent, Window};

use crate::dom::DomProjection;
use crate::input::{is_text_entry, wheel_delta_px};
use crate::listeners::Listener;
use crate::options::HostOptions;
use crate::viewport::ViewportHeightFix;

/// Controller, projection, and the one armed timer, shared by every
/// listener closure.
struct Shared {
    pager: SectionPager,
    dom: DomProjection,
    timer: Option<Timeout>,
}

type SharedRef = Rc<RefCell<Shared>>;

/// A pager bound to a live document. Dropping it detaches everything.
pub struct PagerHost {
    shared: SharedRef,
    listeners: Vec<Listener>,
    viewport: Option<ViewportHeightFix>,
}

impl PagerHost {
    pub fn mount(window: &Window, options: &HostOptions) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let dom = DomProjection::collect(&document, Some(window.navigator()), options)?;
        let pager = SectionPager::new(dom.layout(), options.pager.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let shared: SharedRef = Rc::new(RefCell::new(Shared {
            pager,
            dom,
            timer: None,
        }));

        let root: EventTarget = options
            .root_selector
            .as_deref()
            .and_then(|selector| document.query_selector(selector).ok().flatten())
            .map_or_else(|| document.clone().into(), Into::into);

        let mut listeners = Vec::new();
        listeners.push(wheel_listener(&root, window, &shared)?);
        listeners.extend(touch_listeners(&root, &shared)?);
        if options.keyboard {
            listeners.push(keyboard_listener(&document, &shared)?);
        }
        listeners.extend(indicator_listeners(&shared)?);

        let viewport = if options.fix_viewport_height {
            Some(ViewportHeightFix::install(window)?)
        } else {
            None
        };

        run(&shared, SectionPager::mount);
        {
            let state = shared.borrow();
            log::info!(
                "section pager mounted: {} sections, {} indicators",
                state.pager.state().section_count(),
                state.dom.dots().len()
            );
        }

        Ok(Self {
            shared,
            listeners,
            viewport,
        })
    }

    pub fn go_to_section(&self, index: i64) {
        run(&self.shared, |pager, now| pager.go_to_section(index, now));
    }

    pub fn with_pager<T>(&self, read: impl FnOnce(&SectionPager) -> T) -> T {
        read(&self.shared.borrow().pager)
    }

    /// Detach listeners, cancel timers and unmount the controller.
    pub fn teardown(&mut self) {
        self.listeners.clear();
        self.viewport = None;
        if let Ok(mut state) = self.shared.try_borrow_mut() {
            state.timer = None;
            if state.pager.is_mounted() {
                state.pager.unmount();
                log::info!("section pager torn down");
            }
        }
    }
}

impl Drop for PagerHost {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Current time on the same clock as the controller's deadlines.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

/// Feed one input to the controller, project the result, and re-arm the
/// timer for the next deadline. Input arriving while the state is already
/// borrowed is dropped, like any other input during a transition.
fn run(shared: &SharedRef, input: impl FnOnce(&mut SectionPager, f64) -> Vec<ViewCommand>) {
    let Ok(mut state) = shared.try_borrow_mut() else {
        return;
    };
    let now = now_ms();
    let commands = input(&mut state.pager, now);
    state.dom.apply(&commands);

    let weak = Rc::downgrade(shared);
    state.timer = state
        .pager
        .next_deadline()
        .map(|deadline| arm(weak, (deadline - now).max(0.0)));
}

fn arm(shared: Weak<RefCell<Shared>>, delay_ms: f64) -> Timeout {
    let millis = delay_ms.ceil().min(f64::from(u32::MAX)) as u32;
    Timeout::new(millis, move || {
        if let Some(shared) = shared.upgrade() {
            run(&shared, SectionPager::poll);
        }
    })
}

fn wheel_listener(
    root: &EventTarget,
    window: &Window,
    shared: &SharedRef,
) -> Result<Listener, JsValue> {
    let shared = Rc::clone(shared);
    let window = window.clone();
    // non-passive so the page does not scroll natively between sections
    Listener::new(root, "wheel", false, move |event: Event| {
        let Ok(wheel) = event.dyn_into::<WheelEvent>() else {
            return;
        };
        wheel.prevent_default();
        let page_height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let delta = wheel_delta_px(wheel.delta_y(), wheel.delta_mode(), page_height);
        run(&shared, |pager, now| pager.wheel(delta, now));
    })
}

fn touch_listeners(root: &EventTarget, shared: &SharedRef) -> Result<Vec<Listener>, JsValue> {
    let start = {
        let shared = Rc::clone(shared);
        Listener::new(root, "touchstart", true, move |event: Event| {
            if let Some(y) = first_touch_y(event, false) {
                run(&shared, |pager, now| pager.touch_start(y, now));
            }
        })?
    };
    let moved = {
        let shared = Rc::clone(shared);
        Listener::new(root, "touchmove", true, move |event: Event| {
            if let Some(y) = first_touch_y(event, false) {
                run(&shared, |pager, now| pager.touch_move(y, now));
            }
        })?
    };
    let end = {
        let shared = Rc::clone(shared);
        Listener::new(root, "touchend", true, move |event: Event| {
            if let Some(y) = first_touch_y(event, true) {
                run(&shared, |pager, now| pager.touch_end(y, now));
            }
        })?
    };
    let cancel = {
        let shared = Rc::clone(shared);
        Listener::new(root, "touchcancel", true, move |_| {
            run(&shared, |pager, _| {
                pager.touch_cancel();
                Vec::new()
            });
        })?
    };
    Ok(vec![start, moved, end, cancel])
}

/// Client Y of the first active touch, or of the first lifted touch on
/// `touchend`.
fn first_touch_y(event: Event, changed: bool) -> Option<f64> {
    let touch_event = event.dyn_into::<TouchEvent>().ok()?;
    let list = if changed {
        touch_event.changed_touches()
    } else {
        touch_event.touches()
    };
    list.get(0).map(|touch| f64::from(touch.client_y()))
}

fn keyboard_listener(target: &EventTarget, shared: &SharedRef) -> Result<Listener, JsValue> {
    let shared = Rc::clone(shared);
    Listener::new(target, "keydown", false, move |event: Event| {
        let Ok(keyboard) = event.dyn_into::<KeyboardEvent>() else {
            return;
        };
        if keyboard.alt_key() || keyboard.ctrl_key() || keyboard.meta_key() {
            return;
        }
        let in_form_field = keyboard
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|el| is_text_entry(&el.tag_name()));
        if in_form_field {
            return;
        }
        let Some(key) = NavKey::from_key_name(&keyboard.key()) else {
            return;
        };
        keyboard.prevent_default();
        run(&shared, |pager, now| pager.key(key, now));
    })
}

fn indicator_listeners(shared: &SharedRef) -> Result<Vec<Listener>, JsValue> {
    let dots: Vec<(usize, Element)> = shared.borrow().dom.dots().to_vec();
    dots.into_iter()
        .map(|(index, dot)| {
            let shared = Rc::clone(shared);
            let index = i64::try_from(index).unwrap_or(i64::MAX);
            Listener::new(&dot, "click", true, move |_| {
                run(&shared, |pager, now| pager.select_indicator(index, now));
            })
        })
        .collect()
}
