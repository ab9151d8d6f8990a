pub mod error;
pub mod validation;
pub mod formats;

pub use error::{DecodeError, LogbookError, LogbookResult, StorageError, ValidationError};
pub use formats::{ImageFormat, decodable_format};
