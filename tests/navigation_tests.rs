// Host-side tests for the navigation lock, completion and safety timeout.

mod common;

use common::*;
use reel_core::*;

fn affordances(effects: &[Effect]) -> Option<Affordances> {
    effects.iter().rev().find_map(|e| match e {
        Effect::Affordances(a) => Some(*a),
        _ => None,
    })
}

fn external() -> ViewerConfig {
    ViewerConfig {
        backend: ScrollBackend::External,
        ..config(RevealPolicy::Eager)
    }
}

#[test]
fn centering_offset_clamps_at_top() {
    let g = PanelGeometry::new(1800.0, 600.0);
    assert_eq!(centering_offset(g, 900.0), 1650.0);
    assert_eq!(centering_offset(PanelGeometry::new(0.0, 600.0), 900.0), 0.0);
}

#[test]
fn manual_navigation_animates_and_lands() {
    let mut e = engine(config(RevealPolicy::Eager));
    let out = dispatch(&mut e, Event::Navigate(3), 0.0);
    assert!(e.navigation().navigating);
    assert_eq!(
        out.iter()
            .find(|x| matches!(x, Effect::ScheduleNavigationTimeout { .. })),
        Some(&Effect::ScheduleNavigationTimeout {
            handle: timeout_handle(&out).unwrap(),
            delay_ms: 1000
        })
    );

    let out = dispatch(&mut e, Event::Frame, 400.0);
    assert_eq!(scroll_writes(&out), vec![825.0]);
    assert_eq!(frame_requests(&out), 1);
    assert_eq!(e.viewport().offset, 825.0);

    let out = dispatch(&mut e, Event::Frame, 800.0);
    assert_eq!(scroll_writes(&out), vec![1650.0]);
    assert!(out.contains(&Effect::CurrentChanged(3)));
    assert_eq!(frame_requests(&out), 0);
    assert_eq!(
        e.navigation(),
        NavigationState {
            current_index: 3,
            navigating: false
        }
    );
}

#[test]
fn request_while_navigating_is_rejected() {
    let mut nav = NavigationController::new(PANEL_COUNT);
    let reg = layout();
    let vp = viewport_at(0.0);
    assert!(nav.request_navigate(3, &reg, &vp).is_ok());
    assert_eq!(
        nav.request_navigate(4, &reg, &vp),
        Err(NavigateRejected::Busy)
    );
    assert_eq!(nav.in_flight_target(), Some(3));
}

#[test]
fn out_of_range_target_is_rejected_without_locking() {
    let mut e = engine(config(RevealPolicy::Eager));
    let out = dispatch(&mut e, Event::Navigate(PANEL_COUNT), 0.0);
    assert!(timeout_handle(&out).is_none());
    assert!(!e.navigation().navigating);

    let mut nav = NavigationController::new(PANEL_COUNT);
    assert_eq!(
        nav.request_navigate(40, &layout(), &viewport_at(0.0)),
        Err(NavigateRejected::OutOfRange {
            target: 40,
            len: PANEL_COUNT
        })
    );
}

#[test]
fn unresolvable_panel_is_rejected_without_locking() {
    let registry = HoleyRegistry {
        inner: layout(),
        missing: vec![7],
    };
    let mut e = ReelEngine::new(config(RevealPolicy::Eager), registry).unwrap();
    dispatch(&mut e, Event::Resize(viewport_at(0.0)), 0.0);

    let out = dispatch(&mut e, Event::Navigate(7), 1.0);
    assert!(timeout_handle(&out).is_none());
    assert!(!e.navigation().navigating);

    let out = dispatch(&mut e, Event::Navigate(8), 2.0);
    assert!(timeout_handle(&out).is_some());
}

#[test]
fn external_backend_delegates_and_waits_for_completion() {
    let mut e = engine(external());
    let out = dispatch(&mut e, Event::Navigate(3), 0.0);
    let handle = timeout_handle(&out).unwrap();
    assert!(out.contains(&Effect::DelegateScroll {
        handle,
        target: 1650.0,
        duration_ms: 800.0,
        easing: Easing::CubicInOut,
    }));

    // frames never move the page under the external backend
    let out = dispatch(&mut e, Event::Frame, 900.0);
    assert!(scroll_writes(&out).is_empty());
    assert!(e.navigation().navigating);

    let out = dispatch(&mut e, Event::ScrollComplete(handle), 850.0);
    assert!(out.contains(&Effect::CurrentChanged(3)));
    assert!(!e.navigation().navigating);
}

#[test]
fn timeout_releases_lock_when_completion_never_arrives() {
    let mut e = engine(external());
    let out = dispatch(&mut e, Event::Navigate(6), 0.0);
    let handle = timeout_handle(&out).unwrap();

    let out = dispatch(&mut e, Event::NavigationTimeout(handle), 1000.0);
    assert!(out.contains(&Effect::CurrentChanged(6)));
    assert_eq!(e.navigation().current_index, 6);
    assert!(!e.navigation().navigating);
    assert!(!e.scroller().is_animating());

    // a late completion for the same navigation changes nothing
    let out = dispatch(&mut e, Event::ScrollComplete(handle), 1100.0);
    assert!(!out.iter().any(|x| matches!(x, Effect::CurrentChanged(_))));
}

#[test]
fn stale_timeout_does_not_cut_a_newer_navigation_short() {
    let mut e = engine(external());
    let out = dispatch(&mut e, Event::Navigate(2), 0.0);
    let first = timeout_handle(&out).unwrap();
    dispatch(&mut e, Event::ScrollComplete(first), 800.0);

    let out = dispatch(&mut e, Event::Navigate(4), 900.0);
    let second = timeout_handle(&out).unwrap();
    assert_ne!(first, second);

    let out = dispatch(&mut e, Event::NavigationTimeout(first), 1000.0);
    assert!(out.is_empty());
    assert!(e.navigation().navigating);
    assert_eq!(e.navigation().current_index, 2);

    dispatch(&mut e, Event::NavigationTimeout(second), 1900.0);
    assert_eq!(e.navigation().current_index, 4);
}

#[test]
fn steps_stop_at_the_ends() {
    let mut e = engine(config(RevealPolicy::Eager));
    let out = dispatch(&mut e, Event::Step(NavKey::Previous), 0.0);
    assert!(timeout_handle(&out).is_none());
    assert!(!e.navigation().navigating);

    dispatch(&mut e, Event::Navigate(PANEL_COUNT - 1), 10.0);
    run_frames(&mut e, 10.0);
    assert_eq!(e.navigation().current_index, PANEL_COUNT - 1);

    let out = dispatch(&mut e, Event::Step(NavKey::Next), 2000.0);
    assert!(timeout_handle(&out).is_none());
    assert_eq!(e.navigation().current_index, PANEL_COUNT - 1);
}

#[test]
fn step_next_moves_one_panel() {
    let mut e = engine(config(RevealPolicy::Eager));
    dispatch(&mut e, Event::Step(NavKey::Next), 0.0);
    run_frames(&mut e, 0.0);
    assert_eq!(e.navigation().current_index, 1);
    dispatch(&mut e, Event::Step(NavKey::Next), 1000.0);
    run_frames(&mut e, 1000.0);
    dispatch(&mut e, Event::Step(NavKey::Previous), 2000.0);
    run_frames(&mut e, 2000.0);
    assert_eq!(e.navigation().current_index, 1);
}

#[test]
fn current_signal_is_ignored_while_navigating() {
    let mut e = engine(config(RevealPolicy::Eager));
    dispatch(&mut e, Event::Navigate(3), 0.0);
    let out = dispatch(&mut e, Event::CurrentSignal { index: 1, ratio: 0.9 }, 100.0);
    assert!(out.is_empty());
    assert_eq!(e.navigation().current_index, 0);

    run_frames(&mut e, 100.0);
    assert_eq!(e.navigation().current_index, 3);

    let out = dispatch(&mut e, Event::CurrentSignal { index: 4, ratio: 0.9 }, 2000.0);
    assert!(out.contains(&Effect::CurrentChanged(4)));
    assert_eq!(e.navigation().current_index, 4);
}

#[test]
fn current_signal_for_same_panel_is_silent() {
    let mut e = engine(config(RevealPolicy::Eager));
    let out = dispatch(&mut e, Event::CurrentSignal { index: 0, ratio: 1.0 }, 0.0);
    assert!(out.is_empty());
}

#[test]
fn affordances_follow_lock_and_position() {
    let mut e = ReelEngine::new(config(RevealPolicy::Eager), layout()).unwrap();
    let out = dispatch(&mut e, Event::Resize(viewport_at(0.0)), 0.0);
    assert_eq!(
        affordances(&out),
        Some(Affordances {
            prev_enabled: false,
            next_enabled: true
        })
    );

    let out = dispatch(&mut e, Event::Navigate(PANEL_COUNT - 1), 0.0);
    assert_eq!(
        affordances(&out),
        Some(Affordances {
            prev_enabled: false,
            next_enabled: false
        })
    );

    let out = dispatch(&mut e, Event::Frame, 800.0);
    assert_eq!(
        affordances(&out),
        Some(Affordances {
            prev_enabled: true,
            next_enabled: false
        })
    );

    // unchanged affordances are not re-emitted
    let out = dispatch(&mut e, Event::Scroll(viewport_at(16000.0)), 900.0);
    assert_eq!(affordances(&out), None);
}

#[test]
fn timeout_settles_a_stalled_manual_scroll_at_its_target() {
    let mut e = engine(config(RevealPolicy::Eager));
    let out = dispatch(&mut e, Event::Navigate(3), 0.0);
    let handle = timeout_handle(&out).unwrap();

    // one frame, then frames stop arriving (background tab)
    dispatch(&mut e, Event::Frame, 400.0);
    assert_eq!(e.viewport().offset, 825.0);

    let out = dispatch(&mut e, Event::NavigationTimeout(handle), 1000.0);
    assert_eq!(scroll_writes(&out), vec![1650.0]);
    assert!(out.contains(&Effect::CurrentChanged(3)));
    assert_eq!(e.viewport().offset, 1650.0);
    assert!(!e.navigation().navigating);
    assert!(!e.scroller().is_animating());

    // a late frame does not move the page again
    let out = dispatch(&mut e, Event::Frame, 1016.0);
    assert!(scroll_writes(&out).is_empty());
}

#[test]
fn timeout_after_landing_does_not_scroll() {
    let mut e = engine(config(RevealPolicy::Eager));
    let out = dispatch(&mut e, Event::Navigate(3), 0.0);
    let handle = timeout_handle(&out).unwrap();
    run_frames(&mut e, 0.0);

    let out = dispatch(&mut e, Event::NavigationTimeout(handle), 1000.0);
    assert!(out.is_empty());
    assert_eq!(e.viewport().offset, 1650.0);
}

#[test]
fn uneven_panels_are_centered_by_their_own_height() {
    let registry = StaticRegistry::new(vec![
        PanelGeometry::new(0.0, 400.0),
        PanelGeometry::new(400.0, 1200.0),
        PanelGeometry::new(1600.0, 300.0),
    ]);
    let cfg = ViewerConfig {
        backend: ScrollBackend::External,
        ..ViewerConfig::with_panels(3)
    };
    let mut e = ReelEngine::new(cfg, registry).unwrap();
    dispatch(&mut e, Event::Resize(ViewportSnapshot::new(0.0, 900.0, 1900.0)), 0.0);

    let out = dispatch(&mut e, Event::Navigate(1), 0.0);
    let handle = timeout_handle(&out).unwrap();
    assert!(out.contains(&Effect::DelegateScroll {
        handle,
        target: 550.0,
        duration_ms: 800.0,
        easing: Easing::CubicInOut,
    }));
    dispatch(&mut e, Event::ScrollComplete(handle), 800.0);

    let out = dispatch(&mut e, Event::Navigate(2), 900.0);
    let handle = timeout_handle(&out).unwrap();
    assert!(out.contains(&Effect::DelegateScroll {
        handle,
        target: 1300.0,
        duration_ms: 800.0,
        easing: Easing::CubicInOut,
    }));
}
