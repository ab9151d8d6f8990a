//! Tauri command handlers for the frontend.
//!
//! This module exposes commands that can be invoked from the web frontend:
//! - [`list_entries`] / [`list_rows`]: Read the stored entries
//! - [`add_entry`], [`delete_entry`], [`clear_entries`]: Mutate the store
//! - [`select_photo`], [`clear_photo`]: Manage the form's pending photo
//! - [`preview_average`]: Live average of the selected ratings

mod entries;
mod photo;

pub use entries::*;
pub use photo::*;
