use section_pager_protocol::InputSource;
use serde::Serialize;

/// Lock phase of the pager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "kebab-case")]
pub enum Phase {
    Idle,
    /// A transition was committed; all input is dropped until `until_ms`.
    Transitioning { until_ms: f64, source: InputSource },
}

/// Authoritative navigation model.
///
/// The view is a projection of this state and is never read back.
/// `current` is always in `[0, section_count - 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationState {
    current: usize,
    section_count: usize,
    #[serde(flatten)]
    phase: Phase,
}

impl NavigationState {
    /// Idle state at section 0. `section_count` must be at least 1; the
    /// controller rejects empty layouts before building one.
    pub(crate) fn new(section_count: usize) -> Self {
        Self {
            current: 0,
            section_count: section_count.max(1),
            phase: Phase::Idle,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    pub fn last_index(&self) -> usize {
        self.section_count - 1
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// Clamp any signed index into the valid range.
    pub fn clamp(&self, index: i64) -> usize {
        if index <= 0 {
            0
        } else {
            usize::try_from(index)
                .unwrap_or(usize::MAX)
                .min(self.last_index())
        }
    }

    /// Take the lock and move to `target` (already clamped by the caller).
    pub(crate) fn begin(&mut self, target: usize, until_ms: f64, source: InputSource) {
        debug_assert!(target < self.section_count);
        self.current = target.min(self.last_index());
        self.phase = Phase::Transitioning { until_ms, source };
    }

    /// Release the lock.
    pub(crate) fn settle(&mut self) {
        self.phase = Phase::Idle;
    }
}
