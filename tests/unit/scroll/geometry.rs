use super::*;

#[test]
fn maps_start_start_to_end_end() {
    let g = |top| ScrollGeometry::new(top, 3000.0, 1000.0);
    assert_eq!(g(200.0).progress(), ScrollProgress::START);
    assert_eq!(g(0.0).progress().get(), 0.0);
    assert_eq!(g(-500.0).progress().get(), 0.25);
    assert_eq!(g(-2000.0).progress(), ScrollProgress::END);
    assert_eq!(g(-2600.0).progress(), ScrollProgress::END);
}

#[test]
fn scrolled_helper_matches_raw_geometry() {
    let g = ScrollGeometry::scrolled(800.0, 2600.0, 800.0);
    assert_eq!(g.container_top, -800.0);
    assert_eq!(g.scroll_range(), 1800.0);
    assert!((g.progress().get() - 800.0 / 1800.0).abs() < 1e-12);
}

#[test]
fn short_container_snaps() {
    let before = ScrollGeometry::new(10.0, 600.0, 800.0);
    let after = ScrollGeometry::new(0.0, 600.0, 800.0);
    assert_eq!(before.progress(), ScrollProgress::START);
    assert_eq!(after.progress(), ScrollProgress::END);
}

#[test]
fn unmounted_is_start() {
    assert_eq!(progress_of(None), ScrollProgress::START);
    let g = ScrollGeometry::new(-1000.0, 2000.0, 1000.0);
    assert_eq!(progress_of(Some(g)), ScrollProgress::END);
}

#[test]
fn non_finite_geometry_is_total() {
    let g = ScrollGeometry::new(f64::NAN, 2000.0, 1000.0);
    assert_eq!(g.progress(), ScrollProgress::START);
}
