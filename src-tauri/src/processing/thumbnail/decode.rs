// src-tauri/src/processing/thumbnail/decode.rs

//! Decoding of user-selected image files.

use std::io::Cursor;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use tracing::{debug, warn};

use crate::utils::{DecodeError, decodable_format};

/// Decodes `bytes` fully into memory, upright.
///
/// The EXIF orientation tag is applied, so a portrait phone photo comes back
/// in portrait dimensions. Fails with [`DecodeError::Unsupported`] for
/// containers this build cannot read, [`DecodeError::Corrupt`] for unreadable
/// data and [`DecodeError::InvalidDimensions`] when the decoder yields an
/// empty image.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let format = decodable_format(bytes)?;

    let mut decoder = ImageReader::with_format(Cursor::new(bytes), format).into_decoder()?;
    let orientation = decoder.orientation().unwrap_or_else(|e| {
        warn!("Ignoring unreadable orientation metadata: {e}");
        Orientation::NoTransforms
    });

    let mut image = DynamicImage::from_decoder(decoder)?;
    if orientation != Orientation::NoTransforms {
        debug!("Applying EXIF orientation {orientation:?}");
        image.apply_orientation(orientation);
    }

    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    Ok(image)
}
