// src-tauri/src/processing/thumbnail/resize.rs

//! Bounding-box downscaling.

use image::DynamicImage;
use image::imageops::FilterType;

/// Output size for an `orig_w`×`orig_h` image fitted into `max_w`×`max_h`.
///
/// `scale = min(max_w / orig_w, max_h / orig_h, 1)`, each side rounded to the
/// nearest pixel. Never enlarges, never returns a zero side; a zero bound
/// counts as one pixel.
pub fn target_dimensions(orig_w: u32, orig_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let (max_w, max_h) = (max_w.max(1), max_h.max(1));
    let scale = (max_w as f64 / orig_w as f64)
        .min(max_h as f64 / orig_h as f64)
        .min(1.0);

    let w = ((orig_w as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((orig_h as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

/// Scales `image` down into the bounding box.
///
/// Returns the image unchanged when it already fits.
pub fn fit_within(image: DynamicImage, max_w: u32, max_h: u32) -> DynamicImage {
    let (w, h) = target_dimensions(image.width(), image.height(), max_w, max_h);
    if (w, h) == (image.width(), image.height()) {
        return image;
    }
    image.resize_exact(w, h, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case((4000, 3000), (1280, 1280), (1280, 960))]
    #[case((3000, 4000), (1280, 1280), (960, 1280))]
    #[case((200, 100), (1280, 1280), (200, 100))]
    #[case((1280, 1280), (1280, 1280), (1280, 1280))]
    #[case((1000, 333), (100, 100), (100, 33))]
    #[case((10000, 1), (100, 100), (100, 1))]
    #[case((2000, 1000), (400, 100), (200, 100))]
    fn fits_inside_bounds(
        #[case] orig: (u32, u32),
        #[case] bounds: (u32, u32),
        #[case] expected: (u32, u32),
    ) {
        assert_eq!(target_dimensions(orig.0, orig.1, bounds.0, bounds.1), expected);
    }

    #[rstest]
    #[case((10, 10), (0, 100), (1, 1))]
    #[case((400, 200), (100, 0), (2, 1))]
    #[case((50, 50), (0, 0), (1, 1))]
    fn zero_bounds_degrade_to_one_pixel(
        #[case] orig: (u32, u32),
        #[case] bounds: (u32, u32),
        #[case] expected: (u32, u32),
    ) {
        assert_eq!(target_dimensions(orig.0, orig.1, bounds.0, bounds.1), expected);
    }

    #[test]
    fn small_images_are_not_resampled() {
        let image = DynamicImage::new_rgb8(20, 10);
        let out = fit_within(image.clone(), 64, 64);
        assert_eq!(out, image);
    }

    #[test]
    fn large_images_keep_aspect() {
        let out = fit_within(DynamicImage::new_rgba8(400, 300), 128, 128);
        assert_eq!((out.width(), out.height()), (128, 96));
    }
}
