use super::*;

fn frame(w: u32, h: u32) -> OutputFrame {
    OutputFrame::new(w, h).unwrap()
}

fn assert_within_frame(clip: &ClipPath) {
    let bb = clip.bounding_box();
    let f = clip.frame();
    assert!(bb.x0 >= -1e-9 && bb.y0 >= -1e-9, "bbox {bb:?}");
    assert!(bb.x1 <= f.width_f64() + 1e-9, "bbox {bb:?}");
    assert!(bb.y1 <= f.height_f64() + 1e-9, "bbox {bb:?}");
}

#[test]
fn zero_radii_trace_the_plain_rectangle() {
    let clip = build_clip_path(frame(470, 200), CornerRadii::default());
    assert_eq!(
        clip.bez_path().elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(470.0, 0.0)),
            PathEl::LineTo(Point::new(470.0, 200.0)),
            PathEl::LineTo(Point::new(0.0, 200.0)),
            PathEl::ClosePath,
        ]
    );
    assert!(clip.is_rectangle());
    assert_eq!(clip.line_count(), 4);
    assert!((clip.area() - 470.0 * 200.0).abs() < 1e-9);
}

#[test]
fn card_preset_has_one_sharp_and_three_round_corners() {
    let f = frame(470, 200);
    let clip = build_clip_path(f, CornerRadii::new(0, 40, 12, 12));

    assert_eq!(
        clip.bez_path().elements().first(),
        Some(&PathEl::MoveTo(Point::new(0.0, 0.0)))
    );
    assert_eq!(
        clip.bez_path().elements().last(),
        Some(&PathEl::ClosePath)
    );
    assert!(clip.curve_count() >= 3);
    assert!(!clip.is_rectangle());

    // Sharp corner: pixels right at the origin are inside.
    assert!(clip.contains(Point::new(0.5, 0.5)));
    // Rounded corners cut away their vertex.
    assert!(!clip.contains(Point::new(469.5, 0.5)));
    assert!(!clip.contains(Point::new(469.5, 199.5)));
    assert!(!clip.contains(Point::new(0.5, 199.5)));
    // Just inside each rounded corner along the diagonal.
    assert!(clip.contains(Point::new(470.0 - 20.0, 20.0)));
    assert!(clip.contains(Point::new(470.0 - 6.0, 200.0 - 6.0)));

    assert_within_frame(&clip);
}

#[test]
fn arc_corners_remove_the_expected_area() {
    let f = frame(470, 200);
    let radii = CornerRadii::new(0, 40, 12, 12);
    let clip = build_clip_path(f, radii);
    let cut: f64 = [40.0f64, 12.0, 12.0]
        .iter()
        .map(|r| (1.0 - PI / 4.0) * r * r)
        .sum();
    let expected = 470.0 * 200.0 - cut;
    assert!(
        (clip.area() - expected).abs() < 1.0,
        "area {} expected {expected}",
        clip.area()
    );
}

#[test]
fn uniform_radius_is_symmetric_and_bounded() {
    let f = frame(300, 300);
    let clip = build_clip_path(f, CornerRadii::uniform(50));
    assert_within_frame(&clip);
    for p in [
        Point::new(1.0, 1.0),
        Point::new(299.0, 1.0),
        Point::new(299.0, 299.0),
        Point::new(1.0, 299.0),
    ] {
        assert!(!clip.contains(p), "corner {p:?} should be cut");
    }
    assert!(clip.contains(Point::new(150.0, 150.0)));
    assert!(clip.contains(Point::new(150.0, 0.5)));
    assert!(clip.contains(Point::new(0.5, 150.0)));
}

#[test]
fn oversized_radii_are_clamped_to_half_the_short_side() {
    let f = frame(470, 200);
    let clip = build_clip_path(f, CornerRadii::uniform(500));
    assert_eq!(clip.radii(), CornerRadii::uniform(100));
    assert_within_frame(&clip);
    // Left and right edges collapse into semicircles; the middle of each short edge survives.
    assert!(clip.contains(Point::new(0.5, 100.0)));
    assert!(clip.contains(Point::new(469.5, 100.0)));
}

#[test]
fn clamp_radius_handles_out_of_range_requests() {
    let f = frame(470, 200);
    assert_eq!(clamp_radius(101.0, f), 100);
    assert_eq!(clamp_radius(1e9, f), 100);
    assert_eq!(clamp_radius(100.0, f), 100);
    assert_eq!(clamp_radius(40.9, f), 40);
    assert_eq!(clamp_radius(-3.0, f), 0);
    assert_eq!(clamp_radius(f64::NAN, f), 0);
    assert_eq!(
        CornerRadii::new(0, 250, 7, 101).clamped(f),
        CornerRadii::new(0, 100, 7, 100)
    );
}

#[test]
fn quadratic_style_uses_the_corner_vertex_as_control_point() {
    let f = frame(1200, 628);
    let clip = build_clip_path_with_style(f, CornerRadii::new(0, 48, 0, 0), CornerStyle::Quadratic);
    assert_eq!(
        clip.bez_path().elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(1152.0, 0.0)),
            PathEl::QuadTo(Point::new(1200.0, 0.0), Point::new(1200.0, 48.0)),
            PathEl::LineTo(Point::new(1200.0, 628.0)),
            PathEl::LineTo(Point::new(0.0, 628.0)),
            PathEl::ClosePath,
        ]
    );
    assert_eq!(clip.curve_count(), 1);
}

#[test]
fn rounded_top_left_starts_after_the_corner() {
    let f = frame(200, 100);
    let clip = build_clip_path(f, CornerRadii::new(10, 0, 0, 0));
    assert_eq!(
        clip.bez_path().elements().first(),
        Some(&PathEl::MoveTo(Point::new(10.0, 0.0)))
    );
    assert!(!clip.contains(Point::new(0.5, 0.5)));
    assert!(clip.contains(Point::new(199.5, 0.5)));
}

#[test]
fn corner_names_parse() {
    assert_eq!(Corner::parse("tr"), Some(Corner::TopRight));
    assert_eq!(Corner::parse("Bottom_Left"), Some(Corner::BottomLeft));
    assert_eq!(Corner::parse("top-left"), Some(Corner::TopLeft));
    assert_eq!(Corner::parse("middle"), None);
}
