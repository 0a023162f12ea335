// End-to-end scenarios driven through the engine's event loop.

mod common;

use common::*;
use reel_core::*;

#[test]
fn empty_registry_is_rejected() {
    let err = ReelEngine::new(ViewerConfig::default(), StaticRegistry::default()).err();
    assert_eq!(err, Some(ConfigError::NoPanels));
}

#[test]
fn registry_count_wins_over_config() {
    let e = ReelEngine::new(ViewerConfig::with_panels(10), layout()).unwrap();
    assert_eq!(e.len(), PANEL_COUNT);
    assert_eq!(e.config.panel_count, PANEL_COUNT);
}

#[test]
fn invalid_threshold_is_rejected() {
    let cfg = ViewerConfig {
        reveal_threshold: 1.5,
        ..config(RevealPolicy::Eager)
    };
    assert!(matches!(
        ReelEngine::new(cfg, layout()).err(),
        Some(ConfigError::InvalidValue { key: "reveal_threshold", .. })
    ));
}

#[test]
fn half_scroll_reports_fifty_percent_and_scales_middle_panels() {
    let mut e = engine(config(RevealPolicy::Eager));
    let out = dispatch(&mut e, Event::Scroll(viewport_at(8250.0)), 100.0);
    assert_eq!(out.first(), Some(&Effect::Progress(50.0)));
    assert_eq!(e.sample().progress_percent, 50.0);

    for i in 13..=15 {
        let out = dispatch(&mut e, Event::RevealSignal { index: i, ratio: 0.4 }, 101.0);
        assert!(out.contains(&Effect::Reveal(i)));
        assert!(out.contains(&Effect::StopObserving(i)));
    }
    let out = dispatch(&mut e, Event::Frame, 116.0);
    let mut s = scales(&out);
    s.sort_by_key(|p| p.index);
    assert_eq!(s.len(), 3);
    assert_eq!(s[1], PanelScale { index: 14, scale: 1.0 });
    assert!((s[0].scale - s[2].scale).abs() < 1e-12);
    assert!(s[0].scale < 1.0 && s[0].scale >= 0.8);
}

#[test]
fn load_gated_panel_waits_for_its_image() {
    let mut e = engine(config(RevealPolicy::LoadGated));
    let out = dispatch(&mut e, Event::RevealSignal { index: 5, ratio: 0.3 }, 0.0);
    assert_eq!(out, vec![Effect::StopObserving(5)]);

    let item = e.item(5).unwrap();
    assert!(item.pending_reveal && !item.revealed && !item.loaded);

    let out = dispatch(&mut e, Event::ImageLoaded(5), 10.0);
    assert_eq!(out, vec![Effect::ScheduleReconcile { delay_ms: 50 }]);

    dispatch(&mut e, Event::Frame, 16.0);
    let out = dispatch(&mut e, Event::ReconcileLoads, 60.0);
    assert_eq!(reveals(&out), vec![5]);
    assert_eq!(frame_requests(&out), 1);

    let out = dispatch(&mut e, Event::Frame, 76.0);
    assert_eq!(scales(&out).len(), 1);
    let item = e.item(5).unwrap();
    assert!(item.revealed && item.loaded && !item.pending_reveal);
}

#[test]
fn rapid_requests_keep_the_first_target() {
    let mut e = engine(config(RevealPolicy::Eager));
    let mut timeouts = 0;
    for (t, target) in [3, 4, 5, 6].into_iter().enumerate() {
        let out = dispatch(&mut e, Event::Navigate(target), t as f64 * 20.0);
        timeouts += usize::from(timeout_handle(&out).is_some());
    }
    assert_eq!(timeouts, 1);
    run_frames(&mut e, 60.0);
    assert_eq!(e.navigation().current_index, 3);
    assert_eq!(e.viewport().offset, 1650.0);
}

#[test]
fn new_navigation_is_accepted_after_landing() {
    let mut e = engine(config(RevealPolicy::Eager));
    dispatch(&mut e, Event::Navigate(3), 0.0);
    let end = run_frames(&mut e, 0.0);
    let out = dispatch(&mut e, Event::Navigate(10), end + 1.0);
    assert!(timeout_handle(&out).is_some());
    run_frames(&mut e, end + 1.0);
    assert_eq!(e.navigation().current_index, 10);
}

#[test]
fn teardown_stops_everything() {
    let mut e = engine(config(RevealPolicy::Eager));
    dispatch(&mut e, Event::Navigate(3), 0.0);
    let out = dispatch(&mut e, Event::Teardown, 10.0);
    assert_eq!(out, vec![Effect::Teardown]);
    assert!(e.is_torn_down());
    assert!(!e.navigation().navigating);
    assert!(!e.scroller().is_animating());

    for event in [
        Event::Frame,
        Event::Scroll(viewport_at(100.0)),
        Event::RevealSignal { index: 0, ratio: 1.0 },
        Event::Navigate(5),
        Event::Teardown,
    ] {
        assert!(dispatch(&mut e, event, 20.0).is_empty());
    }
}

#[test]
fn items_describe_every_panel() {
    let mut e = engine(config(RevealPolicy::Eager));
    dispatch(&mut e, Event::ImageLoaded(0), 0.0);
    dispatch(&mut e, Event::RevealSignal { index: 1, ratio: 1.0 }, 0.0);
    let items = e.items();
    assert_eq!(items.len(), PANEL_COUNT);
    assert_eq!(items[0].asset_key, "images/1.jpg");
    assert_eq!(items[28].asset_key, "images/29.jpg");
    assert!(items[0].loaded && !items[0].revealed);
    assert!(items[1].revealed);
    assert!(e.item(PANEL_COUNT).is_none());
}

#[test]
fn resize_updates_progress_denominator() {
    let mut e = engine(config(RevealPolicy::Eager));
    let vp = ViewportSnapshot::new(8000.0, 400.0, 16400.0);
    let out = dispatch(&mut e, Event::Resize(vp), 0.0);
    assert_eq!(out.first(), Some(&Effect::Progress(50.0)));
}
