use std::collections::VecDeque;

/// A deferred piece of controller work that has come due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerEvent {
    /// The settle delay elapsed; release the lock.
    Unlock,
    /// The latest event of a wheel burst is ready to be decided.
    WheelDecision { delta_y: f64 },
    /// Staggered entrance of one reveal child.
    Reveal { section: usize, child: usize },
}

impl TimerEvent {
    /// Ordering among events sharing a deadline.
    fn rank(&self) -> u8 {
        match self {
            TimerEvent::Unlock => 0,
            TimerEvent::WheelDecision { .. } => 1,
            TimerEvent::Reveal { .. } => 2,
        }
    }
}

/// Deadline bookkeeping for the controller.
///
/// Unlock and wheel debounce are single-slot: scheduling again replaces the
/// pending deadline. Reveals form a queue ordered by deadline and are
/// cleared as a group when a new transition starts.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    unlock_at: Option<f64>,
    wheel: Option<(f64, f64)>,
    reveals: VecDeque<(f64, usize, usize)>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_unlock(&mut self, at_ms: f64) {
        self.unlock_at = Some(at_ms);
    }

    pub fn schedule_wheel(&mut self, at_ms: f64, delta_y: f64) {
        self.wheel = Some((at_ms, delta_y));
    }

    pub fn cancel_wheel(&mut self) {
        self.wheel = None;
    }

    pub fn schedule_reveal(&mut self, at_ms: f64, section: usize, child: usize) {
        let pos = self
            .reveals
            .iter()
            .position(|&(deadline, _, _)| deadline > at_ms)
            .unwrap_or(self.reveals.len());
        self.reveals.insert(pos, (at_ms, section, child));
    }

    pub fn clear_reveals(&mut self) {
        self.reveals.clear();
    }

    pub fn clear(&mut self) {
        self.unlock_at = None;
        self.wheel = None;
        self.reveals.clear();
    }

    /// Earliest pending deadline, if anything is pending.
    pub fn next_deadline(&self) -> Option<f64> {
        self.candidates().map(|(at, _)| at).reduce(f64::min)
    }

    /// Remove and return the earliest event due at `now_ms`, together with
    /// the deadline it was scheduled for.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, TimerEvent)> {
        let (at, event) = self
            .candidates()
            .filter(|&(at, _)| at <= now_ms)
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.rank().cmp(&b.1.rank())))?;

        match event {
            TimerEvent::Unlock => self.unlock_at = None,
            TimerEvent::WheelDecision { .. } => self.wheel = None,
            TimerEvent::Reveal { .. } => {
                self.reveals.pop_front();
            }
        }
        Some((at, event))
    }

    fn candidates(&self) -> impl Iterator<Item = (f64, TimerEvent)> + '_ {
        let unlock = self.unlock_at.map(|at| (at, TimerEvent::Unlock));
        let wheel = self
            .wheel
            .map(|(at, delta_y)| (at, TimerEvent::WheelDecision { delta_y }));
        let reveal = self
            .reveals
            .front()
            .map(|&(at, section, child)| (at, TimerEvent::Reveal { section, child }));
        unlock.into_iter().chain(wheel).chain(reveal)
    }
}
