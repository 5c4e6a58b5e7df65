use super::*;

#[test]
fn scale_factor_rejects_non_positive_and_non_finite() {
    assert!(ScaleFactor::new(0.0).is_err());
    assert!(ScaleFactor::new(-1.0).is_err());
    assert!(ScaleFactor::new(f64::NAN).is_err());
    assert!(ScaleFactor::new(f64::INFINITY).is_err());
    assert_eq!(ScaleFactor::new(2.0).unwrap().get(), 2.0);
}

#[test]
fn scale_factor_to_px_snaps_and_rounds_up() {
    let s = ScaleFactor::new(2.0).unwrap();
    assert_eq!(s.to_px(50.0), 100);
    assert_eq!(s.to_px(10.25), 21);
    assert_eq!(s.to_px(0.0), 0);
    assert_eq!(s.to_px(-4.0), 0);

    let s3 = ScaleFactor::new(3.0).unwrap();
    // 0.1 * 3.0 is 0.30000000000000004 in f64; 10.1 * 3 must not round up past 30.3 -> 31.
    assert_eq!(s3.to_px(10.1), 31);
    assert_eq!(s3.to_px(1.0 / 3.0), 1);
}

#[test]
fn premultiply_roundtrip_on_opaque_is_identity() {
    let c = Rgba8Premul::from_straight_rgba(12, 200, 99, 255);
    assert_eq!(c, Rgba8Premul::opaque(12, 200, 99));
    assert_eq!(c.to_straight_rgba(), [12, 200, 99, 255]);
}

#[test]
fn premultiply_half_alpha() {
    let c = Rgba8Premul::from_straight_rgba(255, 0, 100, 128);
    assert_eq!(c.to_array(), [128, 0, 50, 128]);
    let back = c.to_straight_rgba();
    assert_eq!(back[0], 255);
    assert_eq!(back[3], 128);
}

#[test]
fn transparent_unpremultiplies_to_zero() {
    assert_eq!(Rgba8Premul::transparent().to_straight_rgba(), [0, 0, 0, 0]);
}

#[test]
fn premultiply_in_place_zeroes_transparent_colors() {
    let mut px = vec![255, 255, 255, 0, 200, 100, 0, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 200, 100, 0, 255]);
}
