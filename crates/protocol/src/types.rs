use serde::{Deserialize, Serialize};

/// Where a navigation request came from.
///
/// Each source has its own settle delay; touch commits may also produce a
/// haptic pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputSource {
    Wheel,
    Touch,
    /// Click on a progress indicator dot.
    Indicator,
    /// `go_to_section` called by a button, link or script.
    Programmatic,
    Keyboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the next (higher index) section.
    Forward,
    /// Towards the previous (lower index) section.
    Backward,
}

impl Direction {
    /// Direction implied by a signed displacement. Zero has no direction.
    pub fn from_signed(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(Direction::Forward)
        } else if value < 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }
}

/// Keys the pager reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    PageDown,
    PageUp,
    Space,
    Home,
    End,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "Down" => Some(NavKey::ArrowDown),
            "ArrowUp" | "Up" => Some(NavKey::ArrowUp),
            "PageDown" => Some(NavKey::PageDown),
            "PageUp" => Some(NavKey::PageUp),
            " " | "Spacebar" => Some(NavKey::Space),
            "Home" => Some(NavKey::Home),
            "End" => Some(NavKey::End),
            _ => None,
        }
    }
}

/// Shape of the paged document, captured once at mount.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionLayout {
    /// Number of reveal children in each section, in document order.
    pub reveal_counts: Vec<usize>,
}

impl SectionLayout {
    pub fn new(reveal_counts: Vec<usize>) -> Self {
        Self { reveal_counts }
    }

    /// Layout with `sections` sections of `reveals_per_section` children each.
    pub fn uniform(sections: usize, reveals_per_section: usize) -> Self {
        Self {
            reveal_counts: vec![reveals_per_section; sections],
        }
    }

    pub fn section_count(&self) -> usize {
        self.reveal_counts.len()
    }

    /// Reveal children in `section`; zero for unknown sections.
    pub fn reveal_count(&self, section: usize) -> usize {
        self.reveal_counts.get(section).copied().unwrap_or(0)
    }
}
