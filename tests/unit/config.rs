use super::*;

#[test]
fn defaults_are_valid_and_match_the_banner_frame() {
    let cfg = EditorConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.frame, OutputFrame::new(1200, 628).unwrap());
    assert_eq!(cfg.wheel_sensitivity, DEFAULT_WHEEL_SENSITIVITY);
    assert_eq!(cfg.adjustable_corner, Some(Corner::TopRight));
}

#[test]
fn presets_validate() {
    for p in [Preset::Banner, Preset::Card] {
        p.config().validate().unwrap();
    }
    let card = EditorConfig::card();
    assert_eq!(card.corners, CornerRadii::new(0, 40, 12, 12));
    assert_eq!(card.frame.max_corner_radius(), 100);
}

#[test]
fn partial_json_fills_in_defaults() {
    let cfg: EditorConfig = serde_json::from_str(
        r#"{
            "frame": { "width": 470, "height": 200 },
            "zoom": { "kind": "window", "low": 0.5, "high": 1.5 },
            "corners": { "top_right": 40 },
            "corner_style": "quadratic"
        }"#,
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.frame.width, 470);
    assert_eq!(cfg.corners, CornerRadii::new(0, 40, 0, 0));
    assert_eq!(cfg.corner_style, CornerStyle::Quadratic);
    assert_eq!(cfg.wheel_sensitivity, DEFAULT_WHEEL_SENSITIVITY);
    assert_eq!(cfg.zoom, ZoomRangePolicy::window(0.5, 1.5));
}

#[test]
fn validation_rejects_bad_values() {
    let mut cfg = EditorConfig::default();
    cfg.frame.width = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = EditorConfig::default();
    cfg.wheel_sensitivity = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = EditorConfig::default();
    cfg.zoom = ZoomRangePolicy::window(3.0, 1.0);
    assert!(cfg.validate().is_err());

    let mut cfg = EditorConfig::default();
    cfg.decode.accepted_mime.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn from_path_reads_and_validates() {
    let dir = std::env::temp_dir().join(format!("covercrop_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let good = dir.join("good.json");
    std::fs::write(&good, serde_json::to_string(&EditorConfig::card()).unwrap()).unwrap();
    let loaded = EditorConfig::from_path(&good).unwrap();
    assert_eq!(loaded.frame, EditorConfig::card().frame);
    assert_eq!(loaded.corners, EditorConfig::card().corners);
    assert_eq!(loaded.zoom, EditorConfig::card().zoom);

    let bad = dir.join("bad.json");
    std::fs::write(&bad, r#"{ "frame": { "width": 0, "height": 10 } }"#).unwrap();
    assert!(EditorConfig::from_path(&bad).is_err());

    assert!(EditorConfig::from_path(&dir.join("missing.json")).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
