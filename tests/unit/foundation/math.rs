use super::*;

#[test]
fn round_half_up_matches_browser_rounding() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(-2.6), -3.0);
    assert_eq!(round_half_up(0.49), 0.0);
}

#[test]
fn premultiply_then_unpremultiply_keeps_opaque_pixels() {
    let mut px = vec![100u8, 50, 200, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![100, 50, 200, 255]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![100, 50, 200, 255]);
}

#[test]
fn premultiply_scales_by_alpha_and_zeroes_transparent() {
    let mut px = vec![100u8, 50, 200, 128, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        px,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128,
            0,
            0,
            0,
            0
        ]
    );
}

#[test]
fn unpremultiply_is_close_to_source_for_half_alpha() {
    let mut px = vec![100u8, 50, 200, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([100u8, 50, 200]) {
        assert!((i16::from(*got) - i16::from(want)).abs() <= 1);
    }
    assert_eq!(px[3], 128);
}
