//! Integration tests: drive a mounted pager through realistic input sequences
//! and check the navigation guarantees hosts rely on.

use section_pager_core::{PagerConfig, SectionPager};
use section_pager_protocol::{NavKey, SectionLayout, ViewCommand};

/// A mounted four-section pager, settled, resting on `index` at t = 10s.
fn pager_at(index: i64) -> SectionPager {
    let mut pager = SectionPager::new(
        SectionLayout::new(vec![2, 6, 3, 0]),
        PagerConfig::default(),
    )
    .expect("valid layout");
    pager.mount(0.0);
    pager.go_to_section(index, 1_000.0);
    pager.poll(10_000.0);
    assert_eq!(pager.current_index() as i64, index.clamp(0, 3));
    assert!(!pager.is_transitioning());
    pager
}

#[test]
fn wheel_ticks_inside_band_page_one_section() {
    let mut pager = pager_at(1);
    pager.wheel(100.0, 20_000.0);
    assert_eq!(pager.current_index(), 2);

    let mut pager = pager_at(1);
    pager.wheel(-100.0, 20_000.0);
    assert_eq!(pager.current_index(), 0);

    let mut pager = pager_at(1);
    assert!(pager.wheel(10.0, 20_000.0).is_empty());
    assert_eq!(pager.current_index(), 1);
    assert!(!pager.is_transitioning());
}

#[test]
fn wheel_over_scroll_is_ignored() {
    let mut pager = pager_at(1);
    pager.wheel(900.0, 20_000.0);
    assert_eq!(pager.current_index(), 1);
}

#[test]
fn touch_swipe_velocity_band() {
    let mut pager = pager_at(0);
    pager.touch_start(600.0, 20_000.0);
    pager.touch_move(580.0, 20_100.0);
    pager.touch_end(540.0, 20_300.0);
    assert_eq!(pager.current_index(), 1);

    let mut pager = pager_at(0);
    pager.touch_start(600.0, 20_000.0);
    pager.touch_end(540.0, 22_000.0);
    assert_eq!(pager.current_index(), 0);
    assert!(!pager.is_transitioning());
}

#[test]
fn jump_marks_only_target_indicator() {
    let mut pager = pager_at(0);
    let cmds = pager.go_to_section(3, 20_000.0);
    assert_eq!(pager.current_index(), 3);

    let indicators: Vec<(usize, bool)> = cmds
        .iter()
        .filter_map(|c| match *c {
            ViewCommand::SetIndicator { index, active } => Some((index, active)),
            _ => None,
        })
        .collect();
    assert_eq!(
        indicators,
        vec![(0, false), (1, false), (2, false), (3, true)]
    );
    assert!(cmds.contains(&ViewCommand::ActivateSection { index: 3 }));
    for index in 0..3 {
        assert!(cmds.contains(&ViewCommand::DeactivateSection { index }));
        assert!(cmds.contains(&ViewCommand::ResetReveals { section: index }));
    }
}

#[test]
fn out_of_range_jumps_clamp() {
    let mut pager = pager_at(1);
    pager.go_to_section(42, 20_000.0);
    assert_eq!(pager.current_index(), 3);

    pager.select_indicator(-7, 30_000.0);
    assert_eq!(pager.current_index(), 0);
}

#[test]
fn lock_drops_input_until_settle_delay() {
    // wheel settle is 500ms
    let mut pager = pager_at(0);
    pager.wheel(100.0, 20_000.0);
    assert_eq!(pager.current_index(), 1);
    assert!(pager.is_transitioning());

    // 1ms before unlock: only the pending reveals of section 1 come out
    let cmds = pager.go_to_section(3, 20_499.0);
    assert!(
        cmds.iter()
            .all(|c| matches!(c, ViewCommand::RevealChild { section: 1, .. }))
    );
    assert_eq!(pager.current_index(), 1);
    assert!(pager.is_transitioning());

    pager.go_to_section(3, 20_501.0);
    assert_eq!(pager.current_index(), 3);
}

#[test]
fn lock_is_source_specific() {
    // discrete settle is 1000ms
    let mut pager = pager_at(0);
    pager.select_indicator(2, 20_000.0);
    pager.key(NavKey::ArrowDown, 20_999.0);
    assert_eq!(pager.current_index(), 2);
    pager.key(NavKey::ArrowDown, 21_001.0);
    assert_eq!(pager.current_index(), 3);

    // touch settle is 700ms
    let mut pager = pager_at(0);
    pager.touch_start(600.0, 20_000.0);
    pager.touch_end(500.0, 20_200.0);
    assert_eq!(pager.current_index(), 1);
    pager.go_to_section(0, 20_899.0);
    assert_eq!(pager.current_index(), 1);
    pager.go_to_section(0, 20_901.0);
    assert_eq!(pager.current_index(), 0);
}

#[test]
fn rejected_input_leaves_state_untouched() {
    let mut pager = pager_at(1);
    pager.go_to_section(2, 20_000.0);
    let before = pager.state().clone();

    pager.wheel(100.0, 20_200.0);
    pager.touch_start(600.0, 20_300.0);
    pager.wheel(-100.0, 20_400.0);
    pager.touch_end(400.0, 20_450.0);
    pager.key(NavKey::Home, 20_500.0);
    pager.select_indicator(0, 20_600.0);
    pager.go_to_section(3, 20_700.0);

    assert_eq!(pager.state(), &before);
}

#[test]
fn wheel_burst_resolves_to_one_decision() {
    let mut pager = pager_at(0);
    pager.wheel(100.0, 20_000.0);
    pager.wheel(100.0, 20_050.0);
    pager.poll(25_000.0);
    assert_eq!(pager.current_index(), 1);
}

#[test]
fn first_valid_tick_of_a_burst_wins() {
    let mut pager = pager_at(1);
    pager.wheel(100.0, 20_000.0);
    assert_eq!(pager.current_index(), 2);
    assert!(pager.is_transitioning());

    // arrives inside the burst window while locked: dropped, not deferred
    pager.wheel(-100.0, 20_050.0);
    assert_eq!(pager.current_index(), 2);

    pager.poll(30_000.0);
    assert_eq!(pager.current_index(), 2);
    assert!(!pager.is_transitioning());
    assert_eq!(pager.next_deadline(), None);
}

#[test]
fn wheel_burst_acts_on_latest_event() {
    let mut pager = pager_at(1);
    // first event is noise and decided at once; second joins the burst
    pager.wheel(10.0, 20_000.0);
    pager.wheel(100.0, 20_050.0);
    assert_eq!(pager.current_index(), 1);
    assert_eq!(pager.next_deadline(), Some(20_200.0));

    pager.poll(20_199.0);
    assert_eq!(pager.current_index(), 1);
    pager.poll(20_200.0);
    assert_eq!(pager.current_index(), 2);
}

#[test]
fn momentum_stream_defers_until_it_stops() {
    let mut pager = pager_at(1);
    pager.wheel(5.0, 20_000.0);
    for i in 1..10 {
        pager.wheel(-60.0, 20_000.0 + f64::from(i) * 40.0);
        assert_eq!(pager.current_index(), 1);
    }
    // last event at 20_360, decision at 20_510
    pager.poll(20_509.0);
    assert_eq!(pager.current_index(), 1);
    pager.poll(20_510.0);
    assert_eq!(pager.current_index(), 0);
}

#[test]
fn index_stays_in_range_for_any_sequence() {
    let mut pager = pager_at(0);
    let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut now = 20_000.0;

    for _ in 0..5_000 {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let roll = (seed >> 33) as i64;
        now += (roll % 400) as f64;

        match roll % 7 {
            0 => {
                pager.wheel((roll % 400 - 200) as f64, now);
            }
            1 => {
                pager.touch_start((roll % 800) as f64, now);
            }
            2 => {
                pager.touch_move((roll % 800) as f64, now);
            }
            3 => {
                pager.touch_end((roll % 800) as f64, now);
            }
            4 => {
                pager.go_to_section(roll % 11 - 5, now);
            }
            5 => {
                pager.select_indicator(roll % 9 - 2, now);
            }
            _ => {
                pager.poll(now);
            }
        }
        assert!(pager.current_index() < 4);
    }
}

#[test]
fn reentering_a_section_replays_its_reveals() {
    let mut pager = pager_at(1);
    let cmds = pager.go_to_section(2, 20_000.0);
    assert!(cmds.contains(&ViewCommand::ResetReveals { section: 1 }));

    let cmds = pager.go_to_section(1, 30_000.0);
    assert!(cmds.contains(&ViewCommand::RevealChild {
        section: 1,
        child: 0
    }));
    let rest = pager.poll(40_000.0);
    let children: Vec<usize> = rest
        .iter()
        .filter_map(|c| match *c {
            ViewCommand::RevealChild { section: 1, child } => Some(child),
            _ => None,
        })
        .collect();
    assert_eq!(children, vec![1, 2, 3, 4, 5]);
}
