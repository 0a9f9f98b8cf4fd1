use section_pager_protocol::{Direction, NavKey};

use super::state::NavigationState;

/// What an accepted input asks for, before bounds are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Advance,
    Retreat,
    /// Absolute target; may be out of range until resolved.
    JumpTo(i64),
}

impl NavIntent {
    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::Forward => NavIntent::Advance,
            Direction::Backward => NavIntent::Retreat,
        }
    }

    pub fn from_key(key: NavKey) -> Self {
        match key {
            NavKey::ArrowDown | NavKey::PageDown | NavKey::Space => NavIntent::Advance,
            NavKey::ArrowUp | NavKey::PageUp => NavIntent::Retreat,
            NavKey::Home => NavIntent::JumpTo(0),
            NavKey::End => NavIntent::JumpTo(i64::MAX),
        }
    }

    /// Target index for this intent, clamped to the section range.
    pub fn resolve(self, state: &NavigationState) -> usize {
        let current = state.current();
        match self {
            NavIntent::Advance => (current + 1).min(state.last_index()),
            NavIntent::Retreat => current.saturating_sub(1),
            NavIntent::JumpTo(index) => state.clamp(index),
        }
    }
}
