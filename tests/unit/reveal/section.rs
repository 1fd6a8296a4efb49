use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::scroll::observer::ScrollObserver;

fn t(ms: u64) -> Timestamp {
    Timestamp(ms)
}

fn p(v: f64) -> ScrollProgress {
    ScrollProgress::new(v)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn dims() -> RevealDimensions {
    RevealDimensions {
        initial_width: 100.0,
        expanded_width: 200.0,
        initial_height: 50.0,
        expanded_height: 150.0,
        gap: 10.0,
    }
}

fn curves() -> RevealCurves {
    RevealCurves::new(dims()).unwrap()
}

#[test]
fn dimensions_follow_viewport_tiers() {
    let phone = RevealDimensions::for_viewport(ViewportSize::new(375.0, 800.0));
    assert_eq!(phone.initial_width, 100.0);
    assert!(close(phone.expanded_width, 120.0));
    assert!(close(phone.initial_height, 96.0));
    assert_eq!(phone.expanded_height, 250.0);
    assert_eq!(phone.gap, 8.0);

    let laptop = RevealDimensions::for_viewport(ViewportSize::new(1200.0, 800.0));
    assert_eq!(laptop.initial_width, 292.0);
    assert!(close(laptop.expanded_width, 350.4));
    assert_eq!(laptop.initial_height, 150.0);
    assert_eq!(laptop.expanded_height, 450.0);
    assert_eq!(laptop.gap, 18.0);

    let wide = RevealDimensions::for_viewport(ViewportSize::new(2560.0, 1440.0));
    assert_eq!(wide.initial_width, 420.0);
    assert!(close(wide.expanded_width, 483.0));
    assert_eq!(wide.gap, 20.0);

    let tablet = RevealDimensions::for_viewport(ViewportSize::new(1024.0, 768.0));
    assert_eq!(tablet.initial_height, 250.0);
    assert_eq!(tablet.gap, 16.0);
}

#[test]
fn start_of_scroll_is_compact_and_hidden() {
    let f = curves().at(ScrollProgress::START);
    assert_eq!((f.width, f.height), (100.0, 50.0));
    assert_eq!(f.left_offset, 0.0);
    assert_eq!(f.side_opacity, 0.0);
    assert_eq!(f.text_scale, 0.7);
    assert_eq!(f.shrink, 0.0);
    assert_eq!(f.lift_pct, 0.0);
    assert_eq!(f.testimonial_opacity, 0.0);
    assert_eq!(f.left_testimonial_y, 150.0 + (50.0 - 30.0) / 2.0);
}

#[test]
fn center_card_expands_until_expand_end() {
    let c = curves();
    let early = c.at(p(0.1));
    assert_eq!(early.height, 50.0);
    assert!(close(early.width, 100.0 + 100.0 / 3.0));

    let expanded = c.at(p(0.3));
    assert_eq!((expanded.width, expanded.height), (200.0, 150.0));
    assert_eq!(expanded.text_scale, 1.0);
    assert_eq!(c.at(p(0.92)).height, 150.0);
}

#[test]
fn side_cards_emerge_then_shrink() {
    let c = curves();
    let half = c.at(p(0.425));
    assert!(close(half.left_offset, -105.0));
    assert!(close(half.right_offset, 105.0));
    assert!(close(half.side_opacity, 0.8));

    let out = c.at(p(0.5));
    assert!(close(out.left_offset, -210.0));
    assert_eq!(out.side_opacity, 1.0);
    assert_eq!(out.side_height, 150.0);

    let small = c.at(p(0.7));
    assert_eq!(small.shrink, 1.0);
    assert!(close(small.left_offset, -212.0));
    assert_eq!(small.side_width, 198.0);
    assert_eq!(small.side_height, 75.0);
    assert_eq!(small.left_card_y, -37.5);
    assert_eq!(small.right_card_y, 37.5);
    assert!(close(small.side_text_scale, 0.8));
}

#[test]
fn testimonials_slide_into_alignment() {
    let c = curves();
    let before = c.at(p(0.6));
    assert_eq!(before.testimonial_progress, 0.0);

    let done = c.at(p(0.75));
    assert_eq!(done.testimonial_progress, 1.0);
    assert_eq!(done.testimonial_height, 55.0);
    // Bottom edges line up with the center card's bottom, top edges with its top.
    assert_eq!(done.left_testimonial_y + done.testimonial_height / 2.0, 75.0);
    assert_eq!(done.right_testimonial_y - done.testimonial_height / 2.0, -75.0);
    assert_eq!(done.testimonial_opacity, 1.0);
}

#[test]
fn section_lifts_away_at_the_end() {
    let c = curves();
    assert_eq!(c.at(p(0.95)).lift_pct, 0.0);
    assert!(close(c.at(p(0.975)).lift_pct, -32.5));
    assert_eq!(c.at(ScrollProgress::END).lift_pct, -65.0);
}

#[test]
fn invalid_inputs_are_rejected() {
    let mut d = dims();
    d.gap = -1.0;
    assert!(RevealCurves::new(d).is_err());
    let spring = SpringConfig {
        mass: 0.0,
        ..SpringConfig::default()
    };
    assert!(ScrollReveal::mount(dims(), spring, ScrollProgress::START).is_err());
}

#[test]
fn mount_rests_on_the_current_position() {
    let r = ScrollReveal::mount(dims(), SpringConfig::default(), p(0.5)).unwrap();
    assert!(r.is_settled(t(0)));
    assert_eq!(r.sample(t(0)), r.target());
    assert_eq!(r.target(), curves().at(p(0.5)));
}

#[test]
fn springs_trail_the_scroll_and_catch_up() {
    let mut r = ScrollReveal::mount(dims(), SpringConfig::default(), ScrollProgress::START).unwrap();
    let start = r.sample(t(1000));
    r.on_progress(t(1000), p(0.75));

    let now = r.sample(t(1000));
    assert_eq!(now.width, start.width);
    // Side opacity is not smoothed.
    assert_eq!(now.side_opacity, 1.0);

    let mid = r.sample(t(1300));
    assert!(mid.width > start.width && mid.width < 200.0);
    assert!(!r.is_settled(t(1300)));

    assert!(r.is_settled(t(8000)));
    assert_eq!(r.sample(t(8000)), r.target());
}

#[test]
fn reversing_mid_flight_is_continuous() {
    let mut r = ScrollReveal::mount(dims(), SpringConfig::default(), ScrollProgress::START).unwrap();
    r.on_progress(t(0), ScrollProgress::END);
    let before = r.sample(t(200));
    r.on_progress(t(200), ScrollProgress::START);
    let after = r.sample(t(200));
    assert!(close(before.width, after.width));
    assert!(close(before.height, after.height));

    let back = r.sample(t(10_000));
    assert_eq!(back, curves().at(ScrollProgress::START));
}

#[test]
fn resize_rebuilds_curves_without_a_jump() {
    let mut r = ScrollReveal::mount(dims(), SpringConfig::default(), p(0.3)).unwrap();
    let before = r.sample(t(500));
    let bigger = RevealDimensions {
        expanded_width: 300.0,
        ..dims()
    };
    r.set_dimensions(t(500), bigger).unwrap();
    assert_eq!(r.curves().dimensions(), bigger);
    assert_eq!(r.target().width, 300.0);
    assert_eq!(r.sample(t(500)).width, before.width);
    assert_eq!(r.sample(t(10_000)).width, 300.0);
}

#[test]
fn dispose_freezes_the_section() {
    let mut r = ScrollReveal::mount(dims(), SpringConfig::default(), ScrollProgress::START).unwrap();
    r.on_progress(t(0), p(0.5));
    let mid = r.sample(t(300));
    r.dispose(t(300));
    assert!(r.is_disposed());
    r.on_progress(t(400), ScrollProgress::END);
    assert_eq!(r.progress(), p(0.5));
    assert_eq!(r.sample(t(9000)), mid);
    assert!(r.is_settled(t(300)));
}

#[test]
fn observer_drives_the_section() {
    let observer = ScrollObserver::new();
    let reveal = Rc::new(RefCell::new(
        ScrollReveal::mount(dims(), SpringConfig::default(), observer.current()).unwrap(),
    ));
    let target = Rc::clone(&reveal);
    let _subscription = observer.subscribe(move |now, progress| {
        target.borrow_mut().on_progress(now, progress);
    });

    observer.publish(t(100), p(0.3));
    assert_eq!(reveal.borrow().progress(), p(0.3));
    assert_eq!(reveal.borrow().target().width, 200.0);
    assert_eq!(reveal.borrow().sample(t(10_000)).width, 200.0);
}
