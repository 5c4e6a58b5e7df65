use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_half_transparent_src_blends() {
    let dst = [0, 0, 255, 255];
    let src = [128, 0, 0, 128];
    let out = over(dst, src, 1.0);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 128);
    assert_eq!(out[2], 127);
}

#[test]
fn over_in_place_rejects_mismatched_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    assert!(over_in_place(&mut dst, &[255u8; 8], 1.0).is_ok());
    assert_eq!(dst, vec![255u8; 8]);
}

#[test]
fn mask_pixel_sets_opaque_alpha_to_coverage() {
    let px = [200, 100, 50, 255];
    assert_eq!(mask_pixel(px, 255), px);
    assert_eq!(mask_pixel(px, 0), [0, 0, 0, 0]);
    let half = mask_pixel(px, 128);
    assert_eq!(half[3], 128);
    assert_eq!(half, [100, 50, 25, 128]);
}

#[test]
fn mask_pixel_multiplies_existing_alpha() {
    let px = [64, 64, 64, 128];
    assert_eq!(mask_pixel(px, 128)[3], 64);
}

#[test]
fn mask_row_touches_every_pixel() {
    let mut row = vec![255u8; 12];
    mask_row_in_place(&mut row, 51);
    assert!(row.iter().all(|&b| b == 51));
}
