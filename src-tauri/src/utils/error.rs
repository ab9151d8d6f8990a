//! Error types for the sauna log.
//!
//! Provides a hierarchy of error types using `thiserror`. Every error derives
//! `Serialize` so command handlers can hand them to the frontend unchanged.

use serde::Serialize;
use thiserror::Error;

use crate::core::RatingField;

/// A submission was rejected before touching the store.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ValidationError {
    /// Facility name missing or whitespace-only
    #[error("Facility name is required")]
    MissingFacility,
    /// Rating outside the 1-5 scale
    #[error("Rating for '{field}' must be between 1 and 5, got {value}")]
    RatingOutOfRange { field: RatingField, value: i64 },
    /// Negative, NaN or infinite price
    #[error("Price must be a non-negative number, got {0}")]
    InvalidPrice(f64),
    /// Caller-supplied id collides with a stored entry
    #[error("An entry with id {0} already exists")]
    DuplicateId(String),
    /// Invalid configuration value
    #[error("Settings error: {0}")]
    Settings(String),
}

/// The selected photo could not be turned into a thumbnail.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum DecodeError {
    /// Recognised container the decoder cannot read (HEIC and friends)
    #[error(
        "Unsupported image format: {format}. Convert the photo to JPEG \
         (for HEIC, change the camera format setting or export it from another app) and try again"
    )]
    Unsupported { format: String },
    /// Bytes are not a readable image
    #[error("Image could not be read: {0}")]
    Corrupt(String),
    /// Decoder reported an empty image
    #[error("Image has invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// JPEG re-encoding failed
    #[error("Image encoding failed: {0}")]
    Encode(String),
    /// The blocking worker died before producing a result
    #[error("Thumbnail worker failed: {0}")]
    Worker(String),
}

/// Reading or writing the persisted record blob failed.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum StorageError {
    /// Blob missing its expected shape or backend read failure
    #[error("Stored records could not be read: {0}")]
    Read(String),
    /// Backend refused the write
    #[error("Records could not be saved: {0}")]
    Write(String),
    /// Backend quota would be exceeded by the write
    #[error("Storage quota exceeded: {needed} bytes requested, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },
}

/// Main error type for the log book.
///
/// All errors are converted to this type before being returned to the
/// frontend.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum LogbookError {
    /// Submission or settings validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Photo could not be processed
    #[error("Photo error: {0}")]
    Decode(#[from] DecodeError),

    /// Persisted storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// File IO error outside the storage layer
    #[error("IO error: {0}")]
    IO(String),
}

/// Convenience result type for log book operations.
pub type LogbookResult<T> = Result<T, LogbookError>;

impl LogbookError {
    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }
}

impl ValidationError {
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Name of the form field the message should be attached to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingFacility => "facility",
            Self::RatingOutOfRange { field, .. } => field.as_str(),
            Self::InvalidPrice(_) => "price",
            Self::DuplicateId(_) => "id",
            Self::Settings(_) => "settings",
        }
    }
}

impl DecodeError {
    pub fn unsupported(format: impl Into<String>) -> Self {
        Self::Unsupported { format: format.into() }
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn worker(msg: impl Into<String>) -> Self {
        Self::Worker(msg.into())
    }

    /// True when the user should convert the file rather than retry.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => Self::unsupported(e.format_hint().to_string()),
            image::ImageError::Encoding(e) => Self::encode(e.to_string()),
            other => Self::corrupt(other.to_string()),
        }
    }
}

impl StorageError {
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }
}
