use section_pager_protocol::{InputSource, NavKey, SectionLayout, ViewCommand};
use thiserror::Error;

use crate::config::{ConfigError, PagerConfig};
use crate::gesture::{GestureSample, WheelRateState, classify_swipe, classify_tick};
use crate::model::{NavIntent, NavigationState};
use crate::timers::{TimerEvent, Timers};

#[derive(Debug, Error)]
pub enum PagerError {
    #[error("layout has no sections to page between")]
    NoSections,
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

/// Full-page section paging controller.
///
/// Turns wheel, touch, keyboard and discrete selections into at most one
/// section change per gesture and emits each committed change as a list of
/// [`ViewCommand`]s. Time is supplied by the caller as milliseconds on a
/// monotonic clock; deferred work (unlock, wheel debounce, staggered
/// reveals) is held as deadlines and released by [`SectionPager::poll`] or
/// by the next input.
///
/// Every input method returns the commands produced while handling it,
/// including timers that came due at the same instant. Rejected input
/// returns only those timer commands.
#[derive(Debug, Clone)]
pub struct SectionPager {
    config: PagerConfig,
    layout: SectionLayout,
    state: NavigationState,
    wheel_rate: WheelRateState,
    touch: Option<GestureSample>,
    timers: Timers,
    mounted: bool,
}

impl SectionPager {
    pub fn new(layout: SectionLayout, config: PagerConfig) -> Result<Self, PagerError> {
        if layout.section_count() == 0 {
            return Err(PagerError::NoSections);
        }
        config.validate()?;
        let state = NavigationState::new(layout.section_count());
        Ok(Self {
            config,
            layout,
            state,
            wheel_rate: WheelRateState::new(),
            touch: None,
            timers: Timers::new(),
            mounted: false,
        })
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current()
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn layout(&self) -> &SectionLayout {
        &self.layout
    }

    /// Earliest instant at which [`SectionPager::poll`] has work to do.
    pub fn next_deadline(&self) -> Option<f64> {
        if self.mounted {
            self.timers.next_deadline()
        } else {
            None
        }
    }

    /// Start accepting input and emit the projection of the current section.
    /// Does not take the lock.
    pub fn mount(&mut self, now_ms: f64) -> Vec<ViewCommand> {
        let mut out = Vec::new();
        self.mounted = true;
        log::debug!(
            "section pager mounted: {} sections, showing {}",
            self.state.section_count(),
            self.state.current()
        );
        self.project(self.state.current(), now_ms, &mut out);
        self.fire_due(now_ms, &mut out);
        out
    }

    /// Stop accepting input and drop all pending timers, gesture samples and
    /// the lock. The current index is kept.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.timers.clear();
        self.touch = None;
        self.wheel_rate.reset();
        self.state.settle();
        log::debug!("section pager unmounted at {}", self.state.current());
    }

    /// Fire every timer due at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> Vec<ViewCommand> {
        self.dispatch(now_ms, |_, _| {})
    }

    pub fn wheel(&mut self, delta_y: f64, now_ms: f64) -> Vec<ViewCommand> {
        self.dispatch(now_ms, |pager, out| {
            let in_burst = pager.wheel_rate.observe(now_ms, &pager.config.wheel);
            if pager.state.is_transitioning() {
                return;
            }
            if in_burst {
                let at = now_ms + pager.config.wheel.debounce_delay_ms;
                pager.timers.schedule_wheel(at, delta_y);
                return;
            }
            pager.timers.cancel_wheel();
            pager.decide_wheel(delta_y, now_ms, out);
        })
    }

    pub fn touch_start(&mut self, y: f64, now_ms: f64) -> Vec<ViewCommand> {
        self.dispatch(now_ms, |pager, _| {
            pager.touch = if pager.state.is_transitioning() {
                None
            } else {
                Some(GestureSample::new(y, now_ms))
            };
        })
    }

    pub fn touch_move(&mut self, y: f64, now_ms: f64) -> Vec<ViewCommand> {
        self.dispatch(now_ms, |pager, _| {
            if let Some(sample) = pager.touch.as_mut() {
                sample.track(y, &pager.config.touch);
            }
        })
    }

    pub fn touch_end(&mut self, y: f64, now_ms: f64) -> Vec<ViewCommand> {
        self.dispatch(now_ms, |pager, out| {
            let Some(sample) = pager.touch.take() else {
                return;
            };
            if let Some(direction) = classify_swipe(&sample, y, now_ms, &pager.config.touch) {
                pager.navigate(
                    NavIntent::from_direction(direction),
                    InputSource::Touch,
                    now_ms,
                    out,
                );
            }
        })
    }

    /// Discard the in-flight touch gesture.
    pub fn touch_cancel(&mut self) {
        self.touch = None;
    }

    pub fn key(&mut self, key: NavKey, now_ms: f64) -> Vec<ViewCommand> {
        self.dispatch(now_ms, |pager, out| {
            pager.navigate(NavIntent::from_key(key), InputSource::Keyboard, now_ms, out);
        })
    }

    /// Jump to `index`, clamped into range. Subject to the same lock as
    /// gestures.
    pub fn go_to_section(&mut self, index: i64, now_ms: f64) -> Vec<ViewCommand> {
        self.dispatch(now_ms, |pager, out| {
            pager.navigate(
                NavIntent::JumpTo(index),
                InputSource::Programmatic,
                now_ms,
                out,
            );
        })
    }

    /// Jump to the section of a clicked progress indicator.
    pub fn select_indicator(&mut self, index: i64, now_ms: f64) -> Vec<ViewCommand> {
        self.dispatch(now_ms, |pager, out| {
            pager.navigate(
                NavIntent::JumpTo(index),
                InputSource::Indicator,
                now_ms,
                out,
            );
        })
    }

    fn dispatch(
        &mut self,
        now_ms: f64,
        handle: impl FnOnce(&mut Self, &mut Vec<ViewCommand>),
    ) -> Vec<ViewCommand> {
        let mut out = Vec::new();
        if !self.mounted {
            return out;
        }
        self.fire_due(now_ms, &mut out);
        handle(self, &mut out);
        self.fire_due(now_ms, &mut out);
        out
    }

    fn fire_due(&mut self, now_ms: f64, out: &mut Vec<ViewCommand>) {
        while let Some((at, event)) = self.timers.pop_due(now_ms) {
            match event {
                TimerEvent::Unlock => self.state.settle(),
                TimerEvent::WheelDecision { delta_y } => {
                    if !self.state.is_transitioning() {
                        self.decide_wheel(delta_y, at, out);
                    }
                }
                TimerEvent::Reveal { section, child } => {
                    out.push(ViewCommand::RevealChild { section, child });
                }
            }
        }
    }

    fn decide_wheel(&mut self, delta_y: f64, now_ms: f64, out: &mut Vec<ViewCommand>) {
        if let Some(direction) = classify_tick(delta_y, &self.config.wheel) {
            self.navigate(
                NavIntent::from_direction(direction),
                InputSource::Wheel,
                now_ms,
                out,
            );
        }
    }

    /// Commit a transition if the lock is free and the target differs.
    fn navigate(
        &mut self,
        intent: NavIntent,
        source: InputSource,
        now_ms: f64,
        out: &mut Vec<ViewCommand>,
    ) {
        if self.state.is_transitioning() {
            return;
        }
        let from = self.state.current();
        let target = intent.resolve(&self.state);
        if target == from {
            return;
        }

        let until_ms = now_ms + self.config.settle.for_source(source);
        self.state.begin(target, until_ms, source);
        self.timers.schedule_unlock(until_ms);
        log::debug!("section {from} -> {target} via {source:?}, locked until {until_ms:.0}ms");

        self.project(target, now_ms, out);
        if source == InputSource::Touch && self.config.haptics.enabled {
            out.push(ViewCommand::Vibrate {
                duration_ms: self.config.haptics.duration_ms,
            });
        }
    }

    /// Emit the view for `target` being the active section and schedule its
    /// staggered reveals. Reveals pending for any other section are dropped.
    fn project(&mut self, target: usize, now_ms: f64, out: &mut Vec<ViewCommand>) {
        let count = self.state.section_count();

        out.extend(
            (0..count)
                .filter(|&i| i != target)
                .map(|index| ViewCommand::DeactivateSection { index }),
        );
        out.push(ViewCommand::ActivateSection { index: target });

        out.extend((0..count).map(|index| ViewCommand::SetIndicator {
            index,
            active: index == target,
        }));

        out.extend(
            (0..count)
                .filter(|&i| i != target)
                .map(|section| ViewCommand::ResetReveals { section }),
        );

        self.timers.clear_reveals();
        let stride = self.config.reveal.stagger_ms;
        for child in 0..self.layout.reveal_count(target) {
            self.timers
                .schedule_reveal(now_ms + stride * child as f64, target, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager(sections: usize, reveals: usize) -> SectionPager {
        let mut pager =
            SectionPager::new(SectionLayout::uniform(sections, reveals), PagerConfig::default())
                .unwrap();
        pager.mount(0.0);
        pager
    }

    #[test]
    fn empty_layout_is_rejected() {
        let err = SectionPager::new(SectionLayout::default(), PagerConfig::default()).unwrap_err();
        assert!(matches!(err, PagerError::NoSections));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = PagerConfig::default();
        config.touch.min_velocity = 10.0;
        let err = SectionPager::new(SectionLayout::uniform(2, 0), config).unwrap_err();
        assert!(matches!(err, PagerError::Config(_)));
    }

    #[test]
    fn mount_projects_first_section_without_lock() {
        let mut pager =
            SectionPager::new(SectionLayout::uniform(3, 2), PagerConfig::default()).unwrap();
        let cmds = pager.mount(0.0);
        assert!(cmds.contains(&ViewCommand::ActivateSection { index: 0 }));
        assert!(cmds.contains(&ViewCommand::SetIndicator {
            index: 0,
            active: true
        }));
        // first child immediately, second after one stride
        assert!(cmds.contains(&ViewCommand::RevealChild {
            section: 0,
            child: 0
        }));
        assert!(!cmds.contains(&ViewCommand::RevealChild {
            section: 0,
            child: 1
        }));
        assert!(!pager.is_transitioning());
        assert_eq!(pager.next_deadline(), Some(75.0));
    }

    #[test]
    fn input_before_mount_is_ignored() {
        let mut pager =
            SectionPager::new(SectionLayout::uniform(3, 0), PagerConfig::default()).unwrap();
        assert!(pager.wheel(100.0, 0.0).is_empty());
        assert!(pager.go_to_section(2, 0.0).is_empty());
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn transition_command_order() {
        let mut pager = pager(3, 0);
        let cmds = pager.go_to_section(1, 1_000.0);
        assert_eq!(
            cmds,
            vec![
                ViewCommand::DeactivateSection { index: 0 },
                ViewCommand::DeactivateSection { index: 2 },
                ViewCommand::ActivateSection { index: 1 },
                ViewCommand::SetIndicator {
                    index: 0,
                    active: false
                },
                ViewCommand::SetIndicator {
                    index: 1,
                    active: true
                },
                ViewCommand::SetIndicator {
                    index: 2,
                    active: false
                },
                ViewCommand::ResetReveals { section: 0 },
                ViewCommand::ResetReveals { section: 2 },
            ]
        );
    }

    #[test]
    fn same_target_takes_no_lock() {
        let mut pager = pager(3, 0);
        assert!(pager.go_to_section(0, 1_000.0).is_empty());
        assert!(!pager.is_transitioning());
        assert!(pager.wheel(-100.0, 1_000.0).is_empty());
        assert!(!pager.is_transitioning());
    }

    #[test]
    fn reveals_are_staggered() {
        let mut pager = pager(2, 3);
        pager.poll(10_000.0);

        let cmds = pager.go_to_section(1, 20_000.0);
        assert!(cmds.contains(&ViewCommand::RevealChild {
            section: 1,
            child: 0
        }));
        assert_eq!(pager.next_deadline(), Some(20_075.0));

        assert!(pager.poll(20_074.0).is_empty());
        assert_eq!(
            pager.poll(20_075.0),
            vec![ViewCommand::RevealChild {
                section: 1,
                child: 1
            }]
        );
        assert_eq!(
            pager.poll(20_150.0),
            vec![ViewCommand::RevealChild {
                section: 1,
                child: 2
            }]
        );
    }

    #[test]
    fn late_poll_fires_everything_due_in_order() {
        let mut pager = pager(2, 3);
        pager.poll(10_000.0);
        pager.go_to_section(1, 20_000.0);
        assert_eq!(
            pager.poll(30_000.0),
            vec![
                ViewCommand::RevealChild {
                    section: 1,
                    child: 1
                },
                ViewCommand::RevealChild {
                    section: 1,
                    child: 2
                },
            ]
        );
        assert!(!pager.is_transitioning());
    }

    #[test]
    fn new_transition_cancels_pending_reveals() {
        let mut config = PagerConfig::default();
        config.reveal.stagger_ms = 400.0;
        config.settle.discrete_ms = 100.0;
        let mut pager = SectionPager::new(SectionLayout::uniform(3, 4), config).unwrap();
        pager.mount(0.0);
        pager.poll(5_000.0);

        pager.go_to_section(1, 10_000.0);
        let cmds = pager.go_to_section(2, 10_200.0);
        assert!(cmds.contains(&ViewCommand::RevealChild {
            section: 2,
            child: 0
        }));
        let later = pager.poll(20_000.0);
        assert!(
            later
                .iter()
                .all(|c| !matches!(c, ViewCommand::RevealChild { section: 1, .. }))
        );
    }

    #[test]
    fn touch_commit_vibrates() {
        let mut pager = pager(3, 0);
        pager.touch_start(500.0, 1_000.0);
        let cmds = pager.touch_end(400.0, 1_200.0);
        assert_eq!(cmds.last(), Some(&ViewCommand::Vibrate { duration_ms: 10 }));
        assert_eq!(pager.current_index(), 1);
    }

    #[test]
    fn haptics_can_be_disabled() {
        let mut config = PagerConfig::default();
        config.haptics.enabled = false;
        let mut pager = SectionPager::new(SectionLayout::uniform(3, 0), config).unwrap();
        pager.mount(0.0);
        pager.touch_start(500.0, 1_000.0);
        let cmds = pager.touch_end(400.0, 1_200.0);
        assert!(
            !cmds
                .iter()
                .any(|c| matches!(c, ViewCommand::Vibrate { .. }))
        );
        assert_eq!(pager.current_index(), 1);
    }

    #[test]
    fn touch_move_never_navigates() {
        let mut pager = pager(3, 0);
        pager.touch_start(500.0, 1_000.0);
        assert!(pager.touch_move(200.0, 1_100.0).is_empty());
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn touch_end_without_start_is_noop() {
        let mut pager = pager(3, 0);
        assert!(pager.touch_end(100.0, 1_000.0).is_empty());
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn touch_cancel_discards_gesture() {
        let mut pager = pager(3, 0);
        pager.touch_start(500.0, 1_000.0);
        pager.touch_cancel();
        assert!(pager.touch_end(400.0, 1_200.0).is_empty());
        assert_eq!(pager.current_index(), 0);
    }

    #[test]
    fn touch_started_during_lock_is_discarded() {
        let mut pager = pager(3, 0);
        pager.go_to_section(1, 1_000.0);
        pager.touch_start(500.0, 1_500.0);
        // lock released at 2000, gesture began while locked
        pager.touch_end(400.0, 2_100.0);
        assert_eq!(pager.current_index(), 1);
    }

    #[test]
    fn keyboard_navigation() {
        let mut pager = pager(4, 0);
        pager.key(NavKey::End, 1_000.0);
        assert_eq!(pager.current_index(), 3);
        pager.key(NavKey::ArrowUp, 2_000.0);
        assert_eq!(pager.current_index(), 2);
        pager.key(NavKey::Home, 3_000.0);
        assert_eq!(pager.current_index(), 0);
        pager.key(NavKey::Space, 4_000.0);
        assert_eq!(pager.current_index(), 1);
    }

    #[test]
    fn unmount_clears_timers_and_lock() {
        let mut pager = pager(3, 3);
        pager.go_to_section(2, 1_000.0);
        assert!(pager.is_transitioning());
        pager.unmount();
        assert!(!pager.is_transitioning());
        assert_eq!(pager.next_deadline(), None);
        assert!(pager.wheel(100.0, 1_100.0).is_empty());
        assert_eq!(pager.current_index(), 2);

        let cmds = pager.mount(5_000.0);
        assert!(cmds.contains(&ViewCommand::ActivateSection { index: 2 }));
    }

    #[test]
    fn zero_settle_unlocks_immediately() {
        let mut config = PagerConfig::default();
        config.settle.wheel_ms = 0.0;
        let mut pager = SectionPager::new(SectionLayout::uniform(4, 0), config).unwrap();
        pager.mount(0.0);
        pager.wheel(100.0, 1_000.0);
        assert_eq!(pager.current_index(), 1);
        assert!(!pager.is_transitioning());
    }
}
