use section_pager_protocol::{SectionLayout, ViewCommand};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Navigator, NodeList};

use crate::options::HostOptions;

/// The elements the pager projects onto, collected once at mount.
///
/// Commands naming an element that does not exist are skipped.
pub struct DomProjection {
    sections: Vec<Element>,
    reveals: Vec<Vec<Element>>,
    dots: Vec<(usize, Element)>,
    active_class: String,
    reveal_active_class: String,
    /// Present only on touch devices exposing `navigator.vibrate`.
    vibrator: Option<Navigator>,
}

impl DomProjection {
    pub fn collect(
        document: &Document,
        navigator: Option<Navigator>,
        options: &HostOptions,
    ) -> Result<Self, JsValue> {
        let sections = elements(&document.query_selector_all(&options.section_selector)?);

        let mut reveals = Vec::with_capacity(sections.len());
        for section in &sections {
            reveals.push(elements(
                &section.query_selector_all(&options.reveal_selector)?,
            ));
        }

        let mut dots = Vec::new();
        for dot in elements(&document.query_selector_all(&options.dot_selector)?) {
            match dot
                .get_attribute(&options.dot_index_attribute)
                .and_then(|raw| raw.trim().parse::<usize>().ok())
            {
                Some(index) => dots.push((index, dot)),
                None => log::warn!(
                    "indicator without a numeric {} attribute, skipped",
                    options.dot_index_attribute
                ),
            }
        }

        let vibrator = navigator.filter(supports_vibration);

        Ok(Self {
            sections,
            reveals,
            dots,
            active_class: options.active_class.clone(),
            reveal_active_class: options.reveal_active_class.clone(),
            vibrator,
        })
    }

    pub fn layout(&self) -> SectionLayout {
        SectionLayout::new(self.reveals.iter().map(Vec::len).collect())
    }

    pub fn dots(&self) -> &[(usize, Element)] {
        &self.dots
    }

    pub fn apply(&self, commands: &[ViewCommand]) {
        for command in commands {
            match *command {
                ViewCommand::ActivateSection { index } => {
                    if let Some(section) = self.sections.get(index) {
                        set_class(section, &self.active_class, true);
                    }
                }
                ViewCommand::DeactivateSection { index } => {
                    if let Some(section) = self.sections.get(index) {
                        set_class(section, &self.active_class, false);
                    }
                }
                ViewCommand::SetIndicator { index, active } => {
                    for (_, dot) in self.dots.iter().filter(|(i, _)| *i == index) {
                        set_class(dot, &self.active_class, active);
                    }
                }
                ViewCommand::RevealChild { section, child } => {
                    if let Some(el) = self.reveals.get(section).and_then(|r| r.get(child)) {
                        set_class(el, &self.reveal_active_class, true);
                    }
                }
                ViewCommand::ResetReveals { section } => {
                    for el in self.reveals.get(section).into_iter().flatten() {
                        set_class(el, &self.reveal_active_class, false);
                    }
                }
                ViewCommand::Vibrate { duration_ms } => {
                    if let Some(navigator) = &self.vibrator {
                        navigator.vibrate_with_duration(duration_ms);
                    }
                }
            }
        }
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        log::warn!("failed to toggle class {class}: {e:?}");
    }
}

fn supports_vibration(navigator: &Navigator) -> bool {
    navigator.max_touch_points() > 0
        && js_sys::Reflect::has(navigator, &JsValue::from_str("vibrate")).unwrap_or(false)
}
