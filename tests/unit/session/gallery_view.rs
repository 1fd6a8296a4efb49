use super::*;
use crate::driver::config::AnimatorConfig;
use crate::foundation::core::{ScrollProgress, Transform, VisualState};
use crate::scroll::geometry::ScrollGeometry;

fn t(ms: u64) -> Timestamp {
    Timestamp(ms)
}

fn animator() -> GalleryAnimator {
    GalleryAnimator::mount(
        vec![Transform::new(30.0, -20.0, 10.0), Transform::new(-50.0, 120.0, 40.0)],
        AnimatorConfig::desktop(),
    )
    .unwrap()
}

// 1000px of scroll range.
fn at(scrolled: f64) -> Option<ScrollGeometry> {
    Some(ScrollGeometry::scrolled(scrolled, 1800.0, 800.0))
}

#[test]
fn mount_applies_current_progress() {
    let observer = ScrollObserver::new();
    observer.publish(t(0), ScrollProgress::new(0.3));

    let view = GalleryView::mount(&observer, animator(), t(100));
    assert_eq!(view.stage(), Stage::Settling);
    let changes = view.drain_changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].to, Stage::Settling);
    assert!(view.drain_changes().is_empty());
}

#[test]
fn scroll_updates_drive_the_animator() {
    let observer = ScrollObserver::new();
    let view = GalleryView::mount(&observer, animator(), t(0));
    assert_eq!(view.stage(), Stage::Scattered);
    assert!(view.drain_changes().is_empty());

    observer.update(t(100), at(200.0));
    observer.update(t(200), at(210.0));
    observer.update(t(300), at(600.0));
    let stages: Vec<_> = view.drain_changes().iter().map(|c| c.to).collect();
    assert_eq!(stages, vec![Stage::Straightened, Stage::Organized]);

    let frame = view.frame(t(1500));
    assert!(frame.text.visible);
    assert_eq!(frame.items[0], VisualState::ORGANIZED);
    assert!(view.animator().text_visible());
}

#[test]
fn drop_unsubscribes_and_disposes() {
    let observer = ScrollObserver::new();
    let view = GalleryView::mount(&observer, animator(), t(0));
    let handle = Rc::clone(&view.animator);
    assert_eq!(observer.listener_count(), 1);

    observer.update(t(100), at(600.0));
    drop(view);

    assert_eq!(observer.listener_count(), 0);
    assert!(handle.borrow().is_disposed());
    // Frozen where it was at the last event seen by the view.
    let frozen = handle.borrow().sample(t(100));
    assert_eq!(handle.borrow().sample(t(5000)), frozen);
}

#[test]
fn unmount_uses_the_given_time() {
    let observer = ScrollObserver::new();
    let view = GalleryView::mount(&observer, animator(), t(0));
    let handle = Rc::clone(&view.animator);
    observer.update(t(0), at(600.0));

    let mid = handle.borrow().sample(t(600));
    assert!(view.is_mounted());
    view.unmount(t(600));

    assert_eq!(observer.listener_count(), 0);
    assert_eq!(handle.borrow().sample(t(9000)), mid);
    // Later scroll events reach nobody.
    assert!(observer.update(t(700), at(0.0)));
    assert_eq!(handle.borrow().stage(), Stage::Organized);
}

#[test]
fn independent_views_share_nothing() {
    let a_scroll = ScrollObserver::new();
    let b_scroll = ScrollObserver::new();
    let a = GalleryView::mount(&a_scroll, animator(), t(0));
    let b = GalleryView::mount(&b_scroll, animator(), t(0));

    a_scroll.update(t(10), at(900.0));
    assert_eq!(a.stage(), Stage::Organized);
    assert_eq!(b.stage(), Stage::Scattered);
}

#[test]
fn undrained_change_log_keeps_only_the_newest() {
    let observer = ScrollObserver::new();
    let view = GalleryView::mount(&observer, animator(), t(0));

    for i in 0..200u64 {
        let progress = if i % 2 == 0 { 0.6 } else { 0.0 };
        assert!(observer.publish(t(i * 10), ScrollProgress::new(progress)));
    }

    let changes = view.drain_changes();
    assert_eq!(changes.len(), CHANGE_LOG_CAPACITY);
    assert_eq!(changes.first().map(|c| c.to), Some(Stage::Organized));
    assert_eq!(changes.last().map(|c| c.to), Some(Stage::Scattered));
    assert!(view.drain_changes().is_empty());
}
