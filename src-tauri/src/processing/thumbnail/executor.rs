// src-tauri/src/processing/thumbnail/executor.rs

//! Executor that turns a selected photo into an embeddable thumbnail.
//!
//! Each photo is processed inside a `tokio::task::spawn_blocking` call so the
//! async runtime is never blocked while the codec runs. Decode finishes
//! completely before resize, flatten and encode start.

use serde::Serialize;
use tracing::debug;

use crate::core::{Photo, ThumbnailSettings};
use crate::utils::{DecodeError, ValidationError};

use super::decode::decode_image;
use super::formats::{encode_jpeg, flatten_onto_white};
use super::resize::fit_within;

/// Result of compressing one photo.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    /// Embeddable JPEG
    pub photo: Photo,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Source width before scaling
    pub source_width: u32,
    /// Source height before scaling
    pub source_height: u32,
    /// Size of the encoded JPEG in bytes
    pub encoded_bytes: usize,
}

/// Runs the thumbnail pipeline off the async runtime.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailExecutor {
    settings: ThumbnailSettings,
}

impl ThumbnailExecutor {
    /// Creates an executor, rejecting zero bounds or a quality outside (0, 1].
    pub fn new(settings: ThumbnailSettings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ThumbnailSettings {
        &self.settings
    }

    /// Compresses `bytes` on the blocking pool.
    pub async fn compress(&self, bytes: Vec<u8>) -> Result<Thumbnail, DecodeError> {
        let settings = self.settings.clone();

        tokio::task::spawn_blocking(move || compress_single(&bytes, &settings))
            .await
            .map_err(|e| DecodeError::worker(format!("Task panicked: {e}")))?
    }
}

// ── Blocking image processing (runs on tokio's blocking thread pool) ──────────────────

/// Decodes, fits, flattens and re-encodes one photo synchronously.
pub fn compress_single(bytes: &[u8], settings: &ThumbnailSettings) -> Result<Thumbnail, DecodeError> {
    let image = decode_image(bytes)?;
    let (source_width, source_height) = (image.width(), image.height());

    debug!("Decoded photo: {source_width}×{source_height} ({} bytes)", bytes.len());

    let image = fit_within(image, settings.max_width, settings.max_height);
    let flat = flatten_onto_white(image);
    let jpeg = encode_jpeg(&flat, settings.jpeg_quality())?;

    debug!(
        "Thumbnail {}×{} at q{} → {} bytes",
        flat.width(),
        flat.height(),
        settings.jpeg_quality(),
        jpeg.len()
    );

    Ok(Thumbnail {
        photo: Photo::from_jpeg(&jpeg),
        width: flat.width(),
        height: flat.height(),
        source_width,
        source_height,
        encoded_bytes: jpeg.len(),
    })
}
