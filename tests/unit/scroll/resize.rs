use super::*;
use crate::driver::config::AnimatorConfig;

fn t(ms: u64) -> Timestamp {
    Timestamp(ms)
}

#[test]
fn commits_after_quiet_period() {
    let mut d = ResizeDebouncer::new(ViewportSize::new(1200.0, 800.0));
    d.resize(t(0), ViewportSize::new(700.0, 800.0));
    assert_eq!(d.poll(t(149)), None);
    assert!(d.is_pending());
    assert_eq!(d.poll(t(150)), Some(ViewportSize::new(700.0, 800.0)));
    assert!(!d.is_pending());
    assert_eq!(d.size().width, 700.0);
}

#[test]
fn burst_restarts_the_timer_and_keeps_latest() {
    let mut d = ResizeDebouncer::new(ViewportSize::default());
    d.resize(t(0), ViewportSize::new(1000.0, 800.0));
    d.resize(t(100), ViewportSize::new(900.0, 800.0));
    d.resize(t(200), ViewportSize::new(600.0, 800.0));
    assert_eq!(d.poll(t(300)), None);
    assert_eq!(d.poll(t(350)), Some(ViewportSize::new(600.0, 800.0)));
    assert_eq!(d.poll(t(1000)), None);
}

#[test]
fn unchanged_size_is_not_reported() {
    let size = ViewportSize::new(1024.0, 768.0);
    let mut d = ResizeDebouncer::new(size);
    d.resize(t(0), size);
    assert_eq!(d.poll(t(500)), None);
    assert!(!d.is_pending());
}

#[test]
fn committed_size_selects_config_preset() {
    let mut d = ResizeDebouncer::with_quiet_period(ViewportSize::default(), 50);
    d.resize(t(0), ViewportSize::new(390.0, 844.0));
    let size = d.poll(t(50)).unwrap();
    assert_eq!(AnimatorConfig::for_viewport(size), AnimatorConfig::mobile());
}
