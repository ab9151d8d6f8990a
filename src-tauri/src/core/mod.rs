//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`LogEntry`]: A persisted sauna visit, built from an [`EntryDraft`]
//! - [`Ratings`]: The per-category 1-5 scores of a visit
//! - [`Photo`]: A JPEG embedded as a data URI
//! - [`LogbookConfig`]: Storage key, thumbnail bounds and rounding settings
//! - [`AppState`]: The single store/session instance shared with the UI layer
//! - [`EntryRow`]: Table projection of an entry

mod config;
mod photo;
mod row;
mod state;
mod types;

pub use config::{AveragePrecision, LogbookConfig, STORAGE_KEY, ThumbnailSettings};
pub use photo::Photo;
pub use row::{AveragePreview, EntryRow, MISSING, shorten};
pub use state::AppState;
pub use types::{EntryDraft, EntryId, LogEntry, Rating, RatingField, Ratings};
