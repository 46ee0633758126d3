use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CropError::invalid_dimensions(0.0, 10.0)
            .to_string()
            .contains("invalid image dimensions: 0x10")
    );
    assert!(
        CropError::load_failed("x")
            .to_string()
            .contains("load failed:")
    );
    assert!(
        CropError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CropError::render("x").to_string().contains("render error:"));
    assert!(CropError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CropError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
