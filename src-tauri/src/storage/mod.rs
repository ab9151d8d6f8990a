//! Persistence of the entry list.
//!
//! - [`KeyValueStorage`]: string blobs under string keys, the shape of browser local storage.
//! - [`MemoryStorage`] / [`FileStorage`]: in-process and on-disk backends.
//! - [`RecordStore`]: the versioned entry list built on top of a backend.

mod backend;
mod record_store;
#[cfg(feature = "desktop")]
mod tauri_store;

pub use backend::{FileStorage, KeyValueStorage, MemoryStorage};
pub use record_store::{RecordStore, WriteOutcome, decode_records};
#[cfg(feature = "desktop")]
pub use tauri_store::TauriStoreStorage;
