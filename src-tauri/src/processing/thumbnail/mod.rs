// src-tauri/src/processing/thumbnail/mod.rs

//! Photo-to-thumbnail pipeline built on the pure-Rust `image` crate.
//!
//! # Architecture
//!
//! - [`decode`]: Sniffs the container and decodes it, rejecting HEIC and empty images.
//! - [`resize`]: Fits the image into the configured bounding box without upscaling.
//! - [`formats`]: Flattens transparency onto white and encodes JPEG at the configured quality.
//! - [`ThumbnailExecutor`]: Runs the steps above on the blocking pool.

mod decode;
mod executor;
mod formats;
mod resize;

pub use decode::decode_image;
pub use executor::{Thumbnail, ThumbnailExecutor, compress_single};
pub use formats::{encode_jpeg, flatten_onto_white};
pub use resize::{fit_within, target_dimensions};
