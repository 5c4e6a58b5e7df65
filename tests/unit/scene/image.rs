use super::*;

#[test]
fn from_premul_rejects_wrong_length() {
    let err = PixelImage::from_premul_rgba8(2, 2, vec![0; 15]).unwrap_err();
    assert!(err.to_string().contains("expected 16"));
}

#[test]
fn solid_fills_every_pixel() {
    let img = PixelImage::solid(3, 2, Rgba8Premul::opaque(1, 2, 3));
    assert_eq!(img.data().len(), 3 * 2 * 4);
    assert!(img.data().chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
}

#[test]
fn decode_png_premultiplies() {
    let mut straight = image::RgbaImage::new(2, 1);
    straight.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
    straight.put_pixel(1, 0, image::Rgba([255, 255, 255, 0]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    straight
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();

    let img = PixelImage::decode(bytes.get_ref()).unwrap();
    assert_eq!((img.width(), img.height()), (2, 1));
    assert_eq!(&img.data()[0..4], &[255, 0, 0, 255]);
    assert_eq!(&img.data()[4..8], &[0, 0, 0, 0]);
}

#[test]
fn decode_garbage_fails() {
    assert!(PixelImage::decode(b"not an image").is_err());
}

#[test]
fn zero_sized_image_is_empty() {
    assert!(PixelImage::solid(0, 4, Rgba8Premul::opaque(0, 0, 0)).is_empty());
}
