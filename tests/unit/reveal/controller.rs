use super::*;
use crate::{
    foundation::core::{Rect, Viewport},
    page::model::{ElementSpec, Page, PageSpec},
    schedule::event_loop::{EventLoop, Wakeup},
};

fn page() -> Page {
    Page::from_spec(PageSpec {
        viewport: Viewport::new(1000.0, 800.0).unwrap(),
        scroll_y: 0.0,
        elements: vec![
            ElementSpec::block("canvas", 0.0, 4000.0),
            ElementSpec::block("above", 100.0, 200.0).flag("data-animate"),
            ElementSpec::block("above_loop", 400.0, 200.0)
                .flag("data-animate")
                .flag("data-animate-repeat"),
            ElementSpec::block("below", 1500.0, 200.0).flag("data-animate"),
            ElementSpec::block("below_tile", 2000.0, 200.0)
                .flag("data-animate")
                .class("tableau-item"),
        ],
    })
    .unwrap()
}

fn controller(page: &Page, el: &mut EventLoop, policy: RevealPolicy) -> RevealController {
    let options = RevealOptions {
        policy,
        ..RevealOptions::default()
    };
    RevealController::new(page, el, options, Markers::default()).unwrap()
}

fn run(ctrl: &mut RevealController, page: &mut Page, el: &mut EventLoop, until: u64) {
    while let Some(w) = el.advance(Timestamp(until)) {
        match w {
            Wakeup::Timer(h) => {
                ctrl.on_timer(page, h);
            }
            Wakeup::Frame { .. } => ctrl.deliver(page, el.now()),
        }
    }
}

fn visible(page: &Page, key: &str) -> bool {
    page.has_class(page.element(key).unwrap(), "is-visible")
}

fn entry(target: ElementId, is_intersecting: bool) -> IntersectionEntry {
    IntersectionEntry {
        target,
        time: Timestamp(0),
        is_intersecting,
        intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
        bounding_client_rect: Rect::ZERO,
    }
}

#[test]
fn on_screen_elements_reveal_after_the_initial_delay_not_synchronously() {
    let mut page = page();
    let mut el = EventLoop::default();
    let mut ctrl = controller(&page, &mut el, RevealPolicy::EagerUnobserve);

    assert!(page.mutations().is_empty());
    assert_eq!(ctrl.pending_reveals(), 2);
    assert_eq!(ctrl.state(page.element("above").unwrap()), Some(RevealState::Hidden));

    run(&mut ctrl, &mut page, &mut el, 49);
    assert!(!visible(&page, "above"));

    run(&mut ctrl, &mut page, &mut el, 50);
    assert!(visible(&page, "above"));
    assert!(visible(&page, "above_loop"));
    assert!(!visible(&page, "below"));
    assert_eq!(ctrl.pending_reveals(), 0);
}

#[test]
fn eager_policy_skips_watching_revealed_one_shot_elements() {
    let page = page();
    let mut el = EventLoop::default();
    let ctrl = controller(&page, &mut el, RevealPolicy::EagerUnobserve);

    assert!(!ctrl.is_watching(page.element("above").unwrap()));
    assert!(ctrl.is_watching(page.element("above_loop").unwrap()));
    assert!(ctrl.is_watching(page.element("below").unwrap()));
    assert!(ctrl.is_watching(page.element("below_tile").unwrap()));
    assert_eq!(ctrl.watched_count(), 3);
}

#[test]
fn persistent_policy_watches_everything() {
    let page = page();
    let mut el = EventLoop::default();
    let ctrl = controller(&page, &mut el, RevealPolicy::PersistentToggle);
    assert_eq!(ctrl.watched_count(), 4);
}

#[test]
fn repeatable_elements_toggle_symmetrically() {
    let mut page = page();
    let mut el = EventLoop::default();
    let mut ctrl = controller(&page, &mut el, RevealPolicy::EagerUnobserve);
    let tile = page.element("below_tile").unwrap();
    assert_eq!(ctrl.is_repeatable(tile), Some(true));

    for _ in 0..4 {
        page.scroll_to(1500.0);
        ctrl.deliver(&mut page, Timestamp(0));
        assert!(visible(&page, "below_tile"));
        assert_eq!(ctrl.state(tile), Some(RevealState::Visible));

        page.scroll_to(0.0);
        ctrl.deliver(&mut page, Timestamp(0));
        assert!(!visible(&page, "below_tile"));
        assert_eq!(ctrl.state(tile), Some(RevealState::Hidden));
    }
    assert!(ctrl.is_watching(tile));
}

#[test]
fn one_shot_elements_never_revert() {
    for policy in [RevealPolicy::EagerUnobserve, RevealPolicy::PersistentToggle] {
        let mut page = page();
        let mut el = EventLoop::default();
        let mut ctrl = controller(&page, &mut el, policy);
        let below = page.element("below").unwrap();

        page.scroll_to(1000.0);
        ctrl.deliver(&mut page, Timestamp(0));
        assert!(visible(&page, "below"));
        assert_eq!(
            ctrl.is_watching(below),
            policy == RevealPolicy::PersistentToggle
        );

        page.scroll_to(0.0);
        ctrl.deliver(&mut page, Timestamp(0));
        ctrl.handle_intersections(&mut page, &[entry(below, false)]);
        assert!(visible(&page, "below"));
        assert_eq!(ctrl.state(below), Some(RevealState::Visible));
    }
}

#[test]
fn detection_band_reaches_past_the_bottom_edge_only_slightly() {
    let mut page = page();
    let mut el = EventLoop::default();
    let mut ctrl = controller(&page, &mut el, RevealPolicy::EagerUnobserve);

    // "below" starts 10px above the viewport bottom: inside the -20px inset.
    page.scroll_to(1500.0 - 790.0);
    ctrl.deliver(&mut page, Timestamp(0));
    assert!(!visible(&page, "below"));

    page.scroll_to(1500.0 - 700.0);
    ctrl.deliver(&mut page, Timestamp(0));
    assert!(visible(&page, "below"));
}

#[test]
fn disconnect_silences_every_callback() {
    let mut page = page();
    let mut el = EventLoop::default();
    let mut ctrl = controller(&page, &mut el, RevealPolicy::PersistentToggle);
    let tile = page.element("below_tile").unwrap();

    ctrl.disconnect();
    assert!(!ctrl.is_connected());
    assert_eq!(ctrl.watched_count(), 0);

    run(&mut ctrl, &mut page, &mut el, 500);
    ctrl.handle_intersections(&mut page, &[entry(tile, true)]);
    ctrl.observe(&page, tile);
    ctrl.deliver(&mut page, Timestamp(600));
    assert!(page.mutations().is_empty());
}

#[test]
fn observe_adds_runtime_elements() {
    let mut page = page();
    let mut el = EventLoop::default();
    let mut ctrl = controller(&page, &mut el, RevealPolicy::EagerUnobserve);

    let late = page
        .insert(
            ElementSpec::block("late", 3000.0, 100.0)
                .flag("data-animate")
                .flag("data-animate-repeat"),
        )
        .unwrap();
    ctrl.observe(&page, late);
    assert!(ctrl.is_watching(late));
    assert_eq!(ctrl.is_repeatable(late), Some(true));

    page.scroll_to(2500.0);
    ctrl.deliver(&mut page, Timestamp(0));
    assert!(visible(&page, "late"));
}

#[test]
fn invalid_threshold_is_rejected() {
    let page = page();
    let mut el = EventLoop::default();
    let options = RevealOptions {
        threshold: 1.5,
        ..RevealOptions::default()
    };
    assert!(RevealController::new(&page, &mut el, options, Markers::default()).is_err());
}
