use super::*;

const ALL: [Ease; 10] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::EaseIn,
    Ease::EaseOut,
    Ease::EaseInOut,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn css_ease_in_out_is_symmetric() {
    let mid = Ease::EaseInOut.apply(0.5);
    assert!((mid - 0.5).abs() < 1e-6);
    let a = Ease::EaseInOut.apply(0.2);
    let b = Ease::EaseInOut.apply(0.8);
    assert!((a + b - 1.0).abs() < 1e-6);
}

#[test]
fn ease_out_leads_and_ease_in_lags_linear() {
    assert!(Ease::EaseOut.apply(0.3) > 0.3);
    assert!(Ease::EaseIn.apply(0.3) < 0.3);
}

#[test]
fn linear_bezier_matches_linear() {
    let ease = Ease::CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };
    for t in [0.1, 0.33, 0.5, 0.9] {
        assert!((ease.apply(t) - t).abs() < 1e-6);
    }
}

#[test]
fn input_outside_unit_interval_is_clamped() {
    assert_eq!(Ease::EaseInOut.apply(-3.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(7.0), 1.0);
}

#[test]
fn bezier_validation_rejects_out_of_range_x() {
    let bad = Ease::CubicBezier {
        x1: 1.5,
        y1: 0.0,
        x2: 0.5,
        y2: 1.0,
    };
    assert!(!bad.is_valid());
    assert!(Ease::EaseIn.is_valid());
}

#[test]
fn serde_uses_variant_names() {
    let json = serde_json::to_string(&Ease::EaseOut).unwrap();
    assert_eq!(json, "\"EaseOut\"");
    let back: Ease = serde_json::from_str("\"InOutCubic\"").unwrap();
    assert_eq!(back, Ease::InOutCubic);
}
