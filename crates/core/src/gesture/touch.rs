use section_pager_protocol::Direction;

use crate::config::TouchConfig;

/// One in-flight touch gesture on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub start_y: f64,
    pub start_ms: f64,
    /// Set once the finger has travelled past the drag threshold. Never
    /// cleared for the rest of the gesture.
    pub dragging: bool,
}

impl GestureSample {
    pub fn new(start_y: f64, start_ms: f64) -> Self {
        Self {
            start_y,
            start_ms,
            dragging: false,
        }
    }

    /// Update the drag flag from a move event. Moves never navigate.
    pub fn track(&mut self, y: f64, config: &TouchConfig) {
        if (y - self.start_y).abs() > config.drag_threshold {
            self.dragging = true;
        }
    }
}

/// Classify a finished gesture.
///
/// Displacement is measured as `start_y - end_y`: a finger moving up the
/// screen pages forward. The swipe must be long enough, short enough in
/// time, and its average velocity (px/ms) must sit inside the configured
/// band. Drags need the larger `drag_min_distance`.
pub fn classify_swipe(
    sample: &GestureSample,
    end_y: f64,
    end_ms: f64,
    config: &TouchConfig,
) -> Option<Direction> {
    let displacement = sample.start_y - end_y;
    let distance = displacement.abs();
    let elapsed = end_ms - sample.start_ms;
    if !distance.is_finite() || !elapsed.is_finite() || elapsed < 0.0 {
        return None;
    }

    let min_distance = if sample.dragging {
        config.drag_min_distance
    } else {
        config.min_distance
    };
    if distance < min_distance || elapsed > config.max_duration_ms {
        return None;
    }

    // A zero-length gesture has unbounded velocity: treat it as a flick.
    if elapsed == 0.0 {
        return None;
    }
    let velocity = distance / elapsed;
    if velocity < config.min_velocity || velocity > config.max_velocity {
        return None;
    }

    Direction::from_signed(displacement)
}
