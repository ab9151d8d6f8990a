//! The versioned list of log entries.
//!
//! The whole list lives in one JSON array under one storage key, newest entry
//! first. Every write replaces the complete array.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::{AveragePrecision, EntryDraft, EntryId, LogEntry, LogbookConfig};
use crate::storage::KeyValueStorage;
use crate::utils::{StorageError, ValidationError};

/// Result of a mutation plus the save failure, if any.
///
/// A failed save does not undo the mutation: the in-memory list keeps it
/// and the warning is handed to the caller to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct WriteOutcome<T> {
    pub value: T,
    pub warning: Option<StorageError>,
}

impl<T> WriteOutcome<T> {
    pub fn is_persisted(&self) -> bool {
        self.warning.is_none()
    }
}

/// Entry list backed by a [`KeyValueStorage`].
pub struct RecordStore<S> {
    storage: S,
    key: String,
    precision: AveragePrecision,
    entries: Vec<LogEntry>,
}

impl<S: KeyValueStorage> RecordStore<S> {
    /// Opens the store and loads whatever is persisted under the configured key.
    pub fn open(storage: S, config: &LogbookConfig) -> Self {
        let mut store = Self {
            storage,
            key: config.storage_key.clone(),
            precision: config.average_precision,
            entries: Vec::new(),
        };
        store.entries = store.load();
        info!("Opened record store '{}' with {} entries", store.key, store.entries.len());
        store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current in-memory view, newest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Reads the persisted list.
    ///
    /// Missing, empty or unparseable data reads as an empty list; this never
    /// fails.
    pub fn load(&self) -> Vec<LogEntry> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Treating unreadable storage as empty: {e}");
                return Vec::new();
            }
        };

        decode_records(&raw).unwrap_or_else(|e| {
            warn!("Treating corrupt record blob under '{}' as empty: {e}", self.key);
            Vec::new()
        })
    }

    /// Re-reads the persisted list into the in-memory view.
    pub fn reload(&mut self) -> &[LogEntry] {
        self.entries = self.load();
        &self.entries
    }

    /// Overwrites the persisted blob with `entries`.
    pub fn save(&self, entries: &[LogEntry]) -> Result<(), StorageError> {
        let blob = serde_json::to_string(entries)
            .map_err(|e| StorageError::write(format!("Cannot serialize records: {e}")))?;

        self.storage.set(&self.key, &blob).inspect_err(|e| {
            warn!("Failed to save {} records under '{}': {e}", entries.len(), self.key);
        })?;

        debug!("Saved {} records ({} bytes)", entries.len(), blob.len());
        Ok(())
    }

    /// Validates `draft`, prepends the resulting entry and saves.
    ///
    /// On a validation error nothing is changed or written.
    pub fn insert(&mut self, draft: EntryDraft) -> Result<WriteOutcome<LogEntry>, ValidationError> {
        let entry = LogEntry::from_draft(draft, self.precision)?;

        if self.get(entry.id()).is_some() {
            return Err(ValidationError::DuplicateId(entry.id().to_string()));
        }

        self.entries.insert(0, entry.clone());
        info!("Added entry {} for '{}'", entry.id(), entry.facility());

        Ok(self.persist(entry))
    }

    /// Removes the entry with `id` and saves. Unknown ids are a no-op.
    pub fn remove(&mut self, id: EntryId) -> WriteOutcome<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        let removed = self.entries.len() != before;

        if removed {
            info!("Removed entry {id}");
        } else {
            debug!("No entry {id} to remove");
        }

        self.persist(removed)
    }

    /// Drops every entry.
    pub fn clear(&mut self) -> WriteOutcome<()> {
        info!("Clearing {} entries", self.entries.len());
        self.entries.clear();
        self.persist(())
    }

    fn persist<T>(&self, value: T) -> WriteOutcome<T> {
        WriteOutcome {
            value,
            warning: self.save(&self.entries).err(),
        }
    }
}

/// Parses a record blob.
///
/// The blob must be a JSON array; anything else is a [`StorageError::Read`].
/// Elements that do not form a valid entry, or repeat an earlier id, are
/// skipped so one bad record cannot hide the rest.
pub fn decode_records(raw: &str) -> Result<Vec<LogEntry>, StorageError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let items: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| StorageError::read(e.to_string()))?;

    let mut seen = HashSet::with_capacity(items.len());
    let mut entries = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<LogEntry>(item) {
            Ok(entry) if entry.facility().trim().is_empty() => {
                warn!("Skipping record #{index}: empty facility");
            }
            Ok(entry) if !seen.insert(entry.id()) => {
                warn!("Skipping record #{index}: duplicate id {}", entry.id());
            }
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("Skipping unreadable record #{index}: {e}"),
        }
    }

    Ok(entries)
}
