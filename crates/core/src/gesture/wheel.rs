use section_pager_protocol::Direction;

use crate::config::WheelConfig;

/// Classify a single wheel event by its vertical delta.
///
/// Only magnitudes inside `[min_delta, max_delta]` count as one tick. Small
/// deltas are trackpad noise and large ones are momentum over-scroll; both
/// are ignored.
pub fn classify_tick(delta_y: f64, config: &WheelConfig) -> Option<Direction> {
    if !delta_y.is_finite() {
        return None;
    }
    let magnitude = delta_y.abs();
    if magnitude < config.min_delta || magnitude > config.max_delta {
        return None;
    }
    Direction::from_signed(delta_y)
}

/// Arrival-rate tracker used to detect momentum bursts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelRateState {
    last_event_ms: Option<f64>,
}

impl WheelRateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event at `now_ms` and report whether it arrived within the
    /// burst window of the previous one.
    ///
    /// Every event moves the reference point, so a steady stream keeps
    /// reporting a burst until it stops.
    pub fn observe(&mut self, now_ms: f64, config: &WheelConfig) -> bool {
        let in_burst = self
            .last_event_ms
            .is_some_and(|last| now_ms - last < config.burst_window_ms);
        self.last_event_ms = Some(now_ms);
        in_burst
    }

    pub fn reset(&mut self) {
        self.last_event_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_limits() {
        let config = WheelConfig::default();
        assert_eq!(classify_tick(100.0, &config), Some(Direction::Forward));
        assert_eq!(classify_tick(-100.0, &config), Some(Direction::Backward));
        assert_eq!(classify_tick(30.0, &config), Some(Direction::Forward));
        assert_eq!(classify_tick(-150.0, &config), Some(Direction::Backward));
        assert_eq!(classify_tick(10.0, &config), None);
        assert_eq!(classify_tick(29.9, &config), None);
        assert_eq!(classify_tick(400.0, &config), None);
        assert_eq!(classify_tick(f64::NAN, &config), None);
    }

    #[test]
    fn first_event_is_never_a_burst() {
        let config = WheelConfig::default();
        let mut rate = WheelRateState::new();
        assert!(!rate.observe(1_000.0, &config));
        assert!(rate.observe(1_050.0, &config));
    }

    #[test]
    fn stream_stays_in_burst() {
        let config = WheelConfig::default();
        let mut rate = WheelRateState::new();
        assert!(!rate.observe(0.0, &config));
        assert!(rate.observe(50.0, &config));
        assert!(rate.observe(130.0, &config));
        assert!(rate.observe(210.0, &config));
        // gap of exactly the window ends the burst
        assert!(!rate.observe(310.0, &config));
    }

    #[test]
    fn reset_forgets_history() {
        let config = WheelConfig::default();
        let mut rate = WheelRateState::new();
        rate.observe(0.0, &config);
        rate.reset();
        assert!(!rate.observe(10.0, &config));
    }
}
