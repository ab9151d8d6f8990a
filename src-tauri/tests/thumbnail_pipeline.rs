//! Integration tests for the photo-to-thumbnail pipeline.
//!
//! Inputs are generated in memory; outputs are decoded again to check
//! dimensions and opacity, which are exact regardless of codec details.

use std::io::Cursor;

use image::{ColorType, DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use sauna_log_lib::core::ThumbnailSettings;
use sauna_log_lib::processing::thumbnail::compress_single;
use sauna_log_lib::{DecodeError, Thumbnail, ThumbnailExecutor, ValidationError};

fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format).expect("Failed to encode test image");
    buf.into_inner()
}

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

/// Inserts an EXIF APP1 segment carrying `orientation` right after the SOI marker.
fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&1u16.to_be_bytes());
    // Orientation tag, SHORT, one value
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let mut segment = b"Exif\x00\x00".to_vec();
    segment.extend_from_slice(&tiff);

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((segment.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&segment);
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn decode_output(thumbnail: &Thumbnail) -> DynamicImage {
    let jpeg = thumbnail.photo.to_jpeg().unwrap();
    assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    image::load_from_memory(&jpeg).unwrap()
}

#[tokio::test]
async fn large_photo_is_scaled_into_bounds() {
    let executor = ThumbnailExecutor::new(ThumbnailSettings::default()).unwrap();
    let input = encode(&gradient(4000, 3000), ImageFormat::Png);

    let thumbnail = executor.compress(input).await.unwrap();

    assert_eq!((thumbnail.width, thumbnail.height), (1280, 960));
    assert_eq!((thumbnail.source_width, thumbnail.source_height), (4000, 3000));
    let out = decode_output(&thumbnail);
    assert_eq!((out.width(), out.height()), (1280, 960));
}

#[tokio::test]
async fn small_photo_is_not_upscaled() {
    let executor = ThumbnailExecutor::new(ThumbnailSettings::default()).unwrap();
    let input = encode(&gradient(200, 100), ImageFormat::Png);

    let thumbnail = executor.compress(input).await.unwrap();

    assert_eq!((thumbnail.width, thumbnail.height), (200, 100));
    let out = decode_output(&thumbnail);
    assert_eq!((out.width(), out.height()), (200, 100));
}

#[test]
fn in_bounds_jpeg_is_still_reencoded() {
    let input = encode(&gradient(120, 80), ImageFormat::Jpeg);
    let thumbnail = compress_single(&input, &ThumbnailSettings::default()).unwrap();

    assert_eq!((thumbnail.width, thumbnail.height), (120, 80));
    assert_ne!(thumbnail.photo.to_jpeg().unwrap(), input);
}

#[test]
fn exif_rotated_photo_comes_out_upright() {
    let jpeg = encode(&gradient(400, 200), ImageFormat::Jpeg);
    let rotated = with_exif_orientation(&jpeg, 6);

    let thumbnail = compress_single(&rotated, &ThumbnailSettings::default()).unwrap();
    assert_eq!((thumbnail.width, thumbnail.height), (200, 400));
    assert_eq!((thumbnail.source_width, thumbnail.source_height), (200, 400));
    let out = decode_output(&thumbnail);
    assert_eq!((out.width(), out.height()), (200, 400));
}

#[test]
fn exif_rotation_happens_before_fitting() {
    let jpeg = encode(&gradient(2000, 1000), ImageFormat::Jpeg);
    let rotated = with_exif_orientation(&jpeg, 8);
    let settings = ThumbnailSettings {
        max_width: 500,
        max_height: 2000,
        quality: 0.8,
    };

    let thumbnail = compress_single(&rotated, &settings).unwrap();
    assert_eq!((thumbnail.width, thumbnail.height), (500, 1000));
}

#[test]
fn transparent_png_becomes_opaque_white() {
    let mut rgba = RgbaImage::from_pixel(64, 48, Rgba([0, 0, 0, 0]));
    for x in 0..16 {
        for y in 0..16 {
            rgba.put_pixel(x, y, Rgba([0, 0, 200, 255]));
        }
    }
    let input = encode(&DynamicImage::ImageRgba8(rgba), ImageFormat::Png);

    let thumbnail = compress_single(&input, &ThumbnailSettings::default()).unwrap();
    let out = decode_output(&thumbnail);

    assert!(!out.color().has_alpha());
    assert_eq!(out.color(), ColorType::Rgb8);
    let rgb = out.to_rgb8();
    let corner = rgb.get_pixel(63, 47);
    assert!(corner.0.iter().all(|&c| c >= 245), "expected white, got {corner:?}");
    let blue = rgb.get_pixel(4, 4);
    assert!(blue[2] > 150 && blue[0] < 60, "expected blue, got {blue:?}");
}

#[test]
fn custom_bounds_and_quality_are_applied() {
    let settings = ThumbnailSettings {
        max_width: 300,
        max_height: 100,
        quality: 0.5,
    };
    let input = encode(&gradient(900, 600), ImageFormat::Bmp);

    let thumbnail = compress_single(&input, &settings).unwrap();
    assert_eq!((thumbnail.width, thumbnail.height), (150, 100));
    assert_eq!(thumbnail.encoded_bytes, thumbnail.photo.to_jpeg().unwrap().len());
}

#[test]
fn output_dimensions_are_reproducible() {
    let input = encode(&gradient(1999, 1001), ImageFormat::Png);
    let settings = ThumbnailSettings::default();

    let a = compress_single(&input, &settings).unwrap();
    let b = compress_single(&input, &settings).unwrap();
    assert_eq!((a.width, a.height), (b.width, b.height));
    assert_eq!((a.width, a.height), (1280, 641));
}

#[test]
fn invalid_settings_are_rejected_up_front() {
    for settings in [
        ThumbnailSettings { max_width: 0, ..ThumbnailSettings::default() },
        ThumbnailSettings { max_height: 0, ..ThumbnailSettings::default() },
        ThumbnailSettings { quality: 0.0, ..ThumbnailSettings::default() },
    ] {
        assert!(matches!(
            ThumbnailExecutor::new(settings),
            Err(ValidationError::Settings(_))
        ));
    }
}

#[test]
fn zero_bound_does_not_panic_in_pipeline() {
    let settings = ThumbnailSettings {
        max_width: 0,
        max_height: 100,
        quality: 0.8,
    };
    let input = encode(&gradient(10, 10), ImageFormat::Png);

    let thumbnail = compress_single(&input, &settings).unwrap();
    assert_eq!((thumbnail.width, thumbnail.height), (1, 1));
}

#[tokio::test]
async fn heic_is_reported_as_unsupported() {
    let executor = ThumbnailExecutor::default();
    let mut heic = vec![0x00, 0x00, 0x00, 0x18];
    heic.extend_from_slice(b"ftypheic");
    heic.extend_from_slice(&[0u8; 64]);

    let err = executor.compress(heic).await.unwrap_err();
    assert!(err.is_unsupported());
}

#[tokio::test]
async fn corrupt_data_is_a_decode_error() {
    let executor = ThumbnailExecutor::default();

    let err = executor.compress(b"not an image at all".to_vec()).await.unwrap_err();
    assert!(matches!(err, DecodeError::Corrupt(_)));

    let mut truncated = encode(&gradient(64, 64), ImageFormat::Png);
    truncated.truncate(40);
    let err = executor.compress(truncated).await.unwrap_err();
    assert!(!err.is_unsupported());
}
