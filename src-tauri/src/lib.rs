// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
pub mod storage;
#[cfg(feature = "desktop")]
pub mod commands;

// Public exports for external consumers
pub use crate::core::{AppState, EntryDraft, EntryId, EntryRow, LogEntry, LogbookConfig, Photo, RatingField};
pub use crate::processing::{PhotoSelection, Thumbnail, ThumbnailExecutor};
pub use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage, RecordStore, WriteOutcome};
pub use crate::utils::{DecodeError, LogbookError, LogbookResult, StorageError, ValidationError};
#[cfg(feature = "desktop")]
pub use crate::commands::*;
