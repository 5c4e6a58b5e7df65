use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

fn banded(width: u32, bands: &[[u8; 4]], scale: ScaleFactor) -> RawSnapshot {
    let mut data = Vec::new();
    for band in bands {
        for _ in 0..width {
            data.extend_from_slice(band);
        }
    }
    RawSnapshot::from_premul_rgba8(width, bands.len() as u32, scale, data).unwrap()
}

fn cfg(height: f64, alpha: f32) -> ReflectionConfig {
    ReflectionConfig {
        height,
        alpha,
        offset: 0.0,
    }
}

#[test]
fn crops_bottom_rows_and_flips_them() {
    let snap = banded(2, &[RED, GREEN, BLUE, WHITE], ScaleFactor::ONE);
    let img = composite_reflection(&snap, &cfg(3.0, 1.0));

    assert_eq!((img.width(), img.height()), (2, 3));
    // bottom source row is first, untouched at full alpha
    assert_eq!(img.pixel(0, 0), Some(WHITE));
    assert_eq!(img.pixel(1, 1), Some([0, 0, 128, 128]));
    assert_eq!(img.pixel(0, 2), Some([0, 0, 0, 0]));
}

#[test]
fn full_height_reflection_ends_with_top_row() {
    let snap = banded(1, &[RED, GREEN, BLUE, WHITE, RED], ScaleFactor::ONE);
    let img = composite_reflection(&snap, &cfg(5.0, 1.0));
    assert_eq!(img.pixel(0, 0), Some(RED));
    // row 3 samples GREEN at 0.25 alpha
    let px = img.pixel(0, 3).unwrap();
    assert_eq!(px[0], 0);
    assert!(px[1] > 0 && px[1] == px[3]);
}

#[test]
fn height_is_clamped_to_snapshot() {
    let snap = banded(3, &[RED, GREEN], ScaleFactor::ONE);
    let img = composite_reflection(&snap, &cfg(50.0, 1.0));
    assert_eq!(img.height(), 2);
    assert_eq!(img.width(), 3);
    assert_eq!(img.data().len(), 3 * 2 * 4);
}

#[test]
fn height_is_measured_in_display_units() {
    let scale = ScaleFactor::new(2.0).unwrap();
    let snap = banded(4, &[RED; 8], scale);
    let img = composite_reflection(&snap, &cfg(1.5, 1.0));
    assert_eq!(img.height(), 3);
    assert_eq!(img.logical_size(), Size::new(2.0, 1.5));
}

#[test]
fn zero_height_gives_empty_image_of_snapshot_width() {
    let snap = banded(4, &[RED, GREEN], ScaleFactor::ONE);
    let img = composite_reflection(&snap, &cfg(0.0, 1.0));
    assert!(img.is_empty());
    assert_eq!(img.width(), 4);
    assert_eq!(img.height(), 0);
    assert!(img.data().is_empty());
}

#[test]
fn zero_alpha_is_transparent_but_sized() {
    let snap = banded(2, &[RED, GREEN, BLUE], ScaleFactor::ONE);
    let img = composite_reflection(&snap, &cfg(3.0, 0.0));
    assert_eq!((img.width(), img.height()), (2, 3));
    assert!(img.data().iter().all(|&b| b == 0));
}

#[test]
fn top_row_alpha_matches_config_and_bottom_is_zero() {
    let snap = banded(2, &[WHITE; 10], ScaleFactor::ONE);
    for alpha in [1.0f32, 0.75, 0.5, 0.2] {
        let img = composite_reflection(&snap, &cfg(10.0, alpha));
        let top = f32::from(img.row_alpha(0).unwrap()) / 255.0;
        assert!((top - alpha).abs() <= 1.0 / 255.0, "alpha {alpha}: top {top}");
        assert_eq!(img.row_alpha(9), Some(0));
        let alphas: Vec<u8> = (0..10).map(|y| img.row_alpha(y).unwrap()).collect();
        assert!(alphas.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn existing_alpha_is_multiplied() {
    let half = [64, 0, 0, 128];
    let snap = banded(1, &[half, half], ScaleFactor::ONE);
    let img = composite_reflection(&snap, &cfg(2.0, 1.0));
    assert_eq!(img.pixel(0, 0), Some(half));
    assert_eq!(img.pixel(0, 1), Some([0, 0, 0, 0]));
}

#[test]
fn empty_snapshot_gives_empty_image() {
    let img = composite_reflection(&RawSnapshot::empty(ScaleFactor::ONE), &cfg(10.0, 1.0));
    assert!(img.is_empty());
    assert_eq!(img.width(), 0);
}

#[test]
fn non_finite_height_gives_empty_image() {
    let snap = banded(2, &[RED, GREEN], ScaleFactor::ONE);
    assert!(composite_reflection(&snap, &cfg(f64::NAN, 1.0)).is_empty());
    assert!(composite_reflection(&snap, &cfg(f64::INFINITY, 1.0)).is_empty());
}

#[test]
fn compositing_is_deterministic() {
    let snap = banded(3, &[RED, GREEN, BLUE, WHITE], ScaleFactor::ONE);
    let a = composite_reflection(&snap, &cfg(4.0, 0.6));
    let b = composite_reflection(&snap, &cfg(4.0, 0.6));
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
    let c = composite_reflection(&snap, &cfg(4.0, 0.5));
    assert_ne!(a.fingerprint(), c.fingerprint());
}

#[test]
fn to_rgba_image_unpremultiplies() {
    let snap = banded(1, &[WHITE, WHITE, WHITE], ScaleFactor::ONE);
    let img = composite_reflection(&snap, &cfg(3.0, 1.0));
    let rgba = img.to_rgba_image().unwrap();
    assert_eq!(rgba.dimensions(), (1, 3));
    assert_eq!(rgba.get_pixel(0, 1).0, [255, 255, 255, 128]);
}

#[test]
fn config_defaults_and_json() {
    let d = ReflectionConfig::default();
    assert_eq!(d.height, 60.0);
    assert_eq!(d.alpha, 0.5);
    assert_eq!(d.offset, 0.0);

    let c = ReflectionConfig::from_json_str(r#"{"height": 20, "offset": -4}"#).unwrap();
    assert_eq!(c.height, 20.0);
    assert_eq!(c.alpha, 0.5);
    assert_eq!(c.offset, -4.0);

    assert!(ReflectionConfig::from_json_str(r#"{"alpha": 1.5}"#).is_err());
    assert!(ReflectionConfig::from_json_str(r#"{"height": -1}"#).is_err());
    assert!(ReflectionConfig::from_json_str(r#"{"colour": 1}"#).is_err());
    assert!(ReflectionConfig::from_json_str("not json").is_err());
}

#[test]
fn config_from_missing_path_is_io_error() {
    let err = ReflectionConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, GlossyError::Io(_)));
}

#[test]
fn clamped_height_stays_in_container() {
    let c = cfg(80.0, 1.0);
    assert_eq!(c.clamped_height(50.0), 50.0);
    assert_eq!(c.clamped_height(100.0), 80.0);
    assert_eq!(c.clamped_height(-3.0), 0.0);
    assert_eq!(cfg(-5.0, 1.0).clamped_height(50.0), 0.0);
}
