//! Application state shared with the UI layer.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::core::{AveragePreview, EntryDraft, EntryId, EntryRow, LogEntry, LogbookConfig, RatingField, Ratings};
use crate::processing::{PhotoSelection, PhotoSession, ThumbnailExecutor};
use crate::storage::{KeyValueStorage, RecordStore, WriteOutcome};
use crate::utils::{DecodeError, LogbookResult, ValidationError};

/// Backend handle the state is built on.
pub type SharedStorage = Arc<dyn KeyValueStorage>;

/// The one record store and photo session of the running app.
///
/// Built once at startup and handed to the command layer; there are no
/// module-level globals.
pub struct AppState {
    config: LogbookConfig,
    store: Mutex<RecordStore<SharedStorage>>,
    photos: PhotoSession,
    executor: ThumbnailExecutor,
}

impl AppState {
    /// Creates the state, loading persisted entries from `storage`.
    ///
    /// An invalid `config` is rejected before storage is touched.
    pub fn new(storage: SharedStorage, config: LogbookConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        let executor = ThumbnailExecutor::new(config.thumbnail.clone())?;
        debug!(
            "Thumbnail bounds {}×{} at quality {}",
            config.thumbnail.max_width, config.thumbnail.max_height, config.thumbnail.quality
        );

        Ok(Self {
            executor,
            store: Mutex::new(RecordStore::open(storage, &config)),
            photos: PhotoSession::new(),
            config,
        })
    }

    pub fn config(&self) -> &LogbookConfig {
        &self.config
    }

    /// Current entries, newest first.
    ///
    /// After a failed save this still includes the unsaved changes.
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.store.lock().await.entries().to_vec()
    }

    /// Table rows for the current entries.
    pub async fn rows(&self) -> Vec<EntryRow> {
        self.entries()
            .await
            .iter()
            .map(|entry| {
                EntryRow::project(entry, self.config.average_precision, self.config.comment_preview_chars)
            })
            .collect()
    }

    pub async fn entry(&self, id: EntryId) -> Option<LogEntry> {
        self.store.lock().await.get(id).cloned()
    }

    /// Stores a submitted form.
    ///
    /// Without an explicit photo the pending one from the photo session is
    /// attached. A successful submit resets the session unless a new photo was
    /// selected meanwhile; a rejected one leaves the pending photo in place.
    pub async fn add_entry(&self, mut draft: EntryDraft) -> LogbookResult<WriteOutcome<LogEntry>> {
        let (ticket, pending) = self.photos.snapshot().await;
        if draft.photo.is_none() {
            draft.photo = pending;
        }

        let outcome = self.store.lock().await.insert(draft)?;
        let _ = self.photos.take(ticket).await;
        Ok(outcome)
    }

    pub async fn delete_entry(&self, id: EntryId) -> WriteOutcome<bool> {
        self.store.lock().await.remove(id)
    }

    pub async fn clear_entries(&self) -> WriteOutcome<()> {
        self.store.lock().await.clear()
    }

    /// Compresses a newly selected photo and makes it the pending one.
    pub async fn select_photo(&self, bytes: Vec<u8>) -> Result<PhotoSelection, DecodeError> {
        self.photos.select(&self.executor, bytes).await
    }

    /// Forgets the pending photo, e.g. when the file input is emptied.
    pub async fn clear_photo(&self) {
        self.photos.clear().await;
    }

    /// Live average of the ratings selected so far, formatted like the table.
    pub fn preview_average(
        &self,
        ratings: &BTreeMap<RatingField, i64>,
    ) -> Result<AveragePreview, ValidationError> {
        let precision = self.config.average_precision;
        Ok(AveragePreview::new(Ratings::from_raw(ratings)?.average(precision), precision))
    }
}
