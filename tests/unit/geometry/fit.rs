use super::*;

const EPS: f64 = 1e-9;

fn frame(w: u32, h: u32) -> OutputFrame {
    OutputFrame::new(w, h).unwrap()
}

#[test]
fn banner_scenario_fits_height_and_crops_width() {
    let fit = compute_cover_fit(frame(1200, 628), NaturalSize::new(2000.0, 1000.0)).unwrap();
    assert!((fit.min_scale - 0.628).abs() < EPS);
    assert!((2000.0 * fit.min_scale - 1256.0).abs() < 1e-6);
    assert!((1000.0 * fit.min_scale - 628.0).abs() < 1e-6);
}

#[test]
fn cover_guarantee_holds_across_aspect_ratios() {
    let frames = [(1200, 628), (470, 200), (1, 1), (300, 900)];
    let images = [
        (2000.0, 1000.0),
        (10.0, 4000.0),
        (4000.0, 10.0),
        (1.0, 1.0),
        (333.3, 777.7),
    ];
    for (fw, fh) in frames {
        let f = frame(fw, fh);
        for (iw, ih) in images {
            let s = compute_cover_fit(f, NaturalSize::new(iw, ih))
                .unwrap()
                .min_scale;
            let sw = iw * s;
            let sh = ih * s;
            assert!(sw >= f.width_f64() - 1e-6, "{fw}x{fh} <- {iw}x{ih}");
            assert!(sh >= f.height_f64() - 1e-6, "{fw}x{fh} <- {iw}x{ih}");
            let tight =
                (sw - f.width_f64()).abs() < 1e-6 || (sh - f.height_f64()).abs() < 1e-6;
            assert!(tight, "fit must be tight on one axis ({fw}x{fh} <- {iw}x{ih})");
        }
    }
}

#[test]
fn zero_or_non_finite_dimensions_are_rejected() {
    let f = frame(100, 100);
    for (w, h) in [
        (0.0, 10.0),
        (10.0, 0.0),
        (f64::NAN, 10.0),
        (10.0, f64::INFINITY),
        (-5.0, 10.0),
    ] {
        let err = compute_cover_fit(f, NaturalSize::new(w, h)).unwrap_err();
        assert!(matches!(err, CropError::InvalidImageDimensions { .. }));
    }
}

#[test]
fn extended_policy_uses_larger_of_multiplier_and_offset() {
    let p = ZoomRangePolicy::default();
    let r = p.range_for(0.1);
    assert!((r.min - 0.1).abs() < EPS);
    assert!((r.max - 0.6).abs() < EPS);
    assert!((r.initial - 0.1).abs() < EPS);

    let r = p.range_for(2.0);
    assert!((r.max - 6.0).abs() < EPS);
}

#[test]
fn window_policy_starts_at_cover_or_midpoint() {
    let cover = 0.8;
    let r = ZoomRangePolicy::window(0.5, 2.0).range_for(cover);
    assert!((r.min - 0.4).abs() < EPS);
    assert!((r.max - 1.6).abs() < EPS);
    assert!((r.initial - cover).abs() < EPS);

    let r = ZoomRangePolicy::Window {
        low: 0.5,
        high: 2.0,
        initial: InitialZoom::Midpoint,
    }
    .range_for(cover);
    assert!((r.initial - 1.0).abs() < EPS);
}

#[test]
fn window_initial_is_clamped_when_window_excludes_cover() {
    let r = ZoomRangePolicy::window(1.5, 3.0).range_for(1.0);
    assert!((r.initial - 1.5).abs() < EPS);
}

#[test]
fn inverted_window_is_reordered_when_resolved() {
    let r = ZoomRangePolicy::window(2.0, 0.5).range_for(0.8);
    assert!((r.min - 0.4).abs() < EPS);
    assert!((r.max - 1.6).abs() < EPS);
    assert!((r.initial - 0.8).abs() < EPS);
    assert_eq!(r.cover, 0.8);
}

#[test]
fn policy_validation_rejects_bad_parameters() {
    assert!(ZoomRangePolicy::default().validate().is_ok());
    assert!(
        ZoomRangePolicy::Extended {
            multiplier: 0.0,
            offset: 0.5
        }
        .validate()
        .is_err()
    );
    assert!(
        ZoomRangePolicy::Extended {
            multiplier: 3.0,
            offset: f64::NAN
        }
        .validate()
        .is_err()
    );
    assert!(ZoomRangePolicy::window(2.0, 1.0).validate().is_err());
    assert!(ZoomRangePolicy::window(0.0, 1.0).validate().is_err());
}

#[test]
fn policy_serializes_with_kind_tag() {
    let json = serde_json::to_string(&ZoomRangePolicy::window(0.5, 1.5)).unwrap();
    assert!(json.contains("\"kind\":\"window\""));
    let back: ZoomRangePolicy =
        serde_json::from_str(r#"{"kind":"extended","multiplier":3.0,"offset":0.5}"#).unwrap();
    assert_eq!(back, ZoomRangePolicy::default());
}
