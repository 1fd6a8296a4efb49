use super::*;

fn t(ms: u64) -> Timestamp {
    Timestamp(ms)
}

fn app(assets: usize) -> AppController {
    AppController::start(t(0), assets, SplashPolicy::default()).unwrap()
}

#[test]
fn preload_progress_counts_failures() {
    let mut p = PreloadTracker::new(4);
    assert_eq!(p.progress(), 0.0);
    p.record(LoadOutcome::Loaded);
    p.record(LoadOutcome::Failed);
    assert_eq!(p.progress(), 0.5);
    assert_eq!(p.failed(), 1);
    p.record(LoadOutcome::Loaded);
    p.record(LoadOutcome::Loaded);
    assert!(p.is_complete());
    p.record(LoadOutcome::Loaded);
    assert_eq!(p.settled(), 4);
}

#[test]
fn empty_preload_is_complete() {
    let p = PreloadTracker::new(0);
    assert!(p.is_complete());
    assert_eq!(p.progress(), 1.0);
}

#[test]
fn fast_preload_waits_for_minimum() {
    let mut a = app(2);
    assert!(a.show_splash());
    assert_eq!(a.record_load(t(400), LoadOutcome::Loaded), None);
    assert_eq!(a.record_load(t(900), LoadOutcome::Loaded), None);
    assert_eq!(a.next_deadline(), Some(t(3000)));
    assert_eq!(a.poll(t(2999)), None);
    assert_eq!(a.poll(t(3000)), Some(DismissReason::Preloaded));
    assert_eq!(a.phase(), SplashPhase::Dismissed(DismissReason::Preloaded));
    assert_eq!(a.poll(t(6000)), None);
}

#[test]
fn slow_preload_dismisses_when_done() {
    let mut a = app(1);
    assert_eq!(a.poll(t(3500)), None);
    assert_eq!(a.record_load(t(4200), LoadOutcome::Failed), Some(DismissReason::Preloaded));
    assert!(!a.show_splash());
}

#[test]
fn stalled_preload_times_out() {
    let mut a = app(3);
    a.record_load(t(100), LoadOutcome::Loaded);
    assert_eq!(a.next_deadline(), Some(t(5000)));
    assert_eq!(a.poll(t(4999)), None);
    assert_eq!(a.poll(t(5000)), Some(DismissReason::Timeout));
    assert_eq!(a.next_deadline(), None);
}

#[test]
fn transition_complete_respects_minimum() {
    let mut a = app(5);
    assert_eq!(a.finish_transition(t(1500)), None);
    assert!(a.show_splash());
    assert_eq!(a.poll(t(3000)), Some(DismissReason::TransitionComplete));
}

#[test]
fn no_assets_closes_at_minimum() {
    let mut a = app(0);
    assert_eq!(a.poll(t(0)), None);
    assert_eq!(a.poll(t(3000)), Some(DismissReason::Preloaded));
}

#[test]
fn cancel_freezes_everything() {
    let mut a = app(1);
    a.cancel();
    assert!(a.is_cancelled());
    assert_eq!(a.record_load(t(3200), LoadOutcome::Loaded), None);
    assert_eq!(a.finish_transition(t(3300)), None);
    assert_eq!(a.poll(t(10_000)), None);
    assert_eq!(a.next_deadline(), None);
    assert!(a.show_splash());
}

#[test]
fn inverted_policy_is_rejected() {
    let policy = SplashPolicy {
        min_ms: 6000,
        max_ms: 5000,
    };
    assert!(AppController::start(t(0), 1, policy).is_err());
}
