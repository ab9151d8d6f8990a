//! Record store commands.

use std::collections::BTreeMap;

use tauri::State;
use tracing::debug;

use crate::core::{AppState, AveragePreview, EntryDraft, EntryId, EntryRow, LogEntry, RatingField};
use crate::storage::WriteOutcome;
use crate::utils::LogbookResult;

/// Returns all entries, newest first.
#[tauri::command]
pub async fn list_entries(state: State<'_, AppState>) -> LogbookResult<Vec<LogEntry>> {
    Ok(state.entries().await)
}

/// Returns the entries formatted for the records table.
#[tauri::command]
pub async fn list_rows(state: State<'_, AppState>) -> LogbookResult<Vec<EntryRow>> {
    Ok(state.rows().await)
}

/// Stores a submitted form, attaching the pending photo if the draft has none.
///
/// # Returns
/// The stored entry plus a warning when it could not be persisted.
#[tauri::command]
pub async fn add_entry(
    state: State<'_, AppState>,
    draft: EntryDraft,
) -> LogbookResult<WriteOutcome<LogEntry>> {
    debug!("Received add_entry command for '{}'", draft.facility.trim());
    state.add_entry(draft).await
}

/// Deletes one entry; `value` is false if the id was unknown.
#[tauri::command]
pub async fn delete_entry(
    state: State<'_, AppState>,
    id: EntryId,
) -> LogbookResult<WriteOutcome<bool>> {
    debug!("Received delete_entry command for {id}");
    Ok(state.delete_entry(id).await)
}

#[tauri::command]
pub async fn clear_entries(state: State<'_, AppState>) -> LogbookResult<WriteOutcome<()>> {
    Ok(state.clear_entries().await)
}

/// Average of the ratings selected so far; `value` is `None` when nothing is selected.
#[tauri::command]
pub fn preview_average(
    state: State<'_, AppState>,
    ratings: BTreeMap<RatingField, i64>,
) -> LogbookResult<AveragePreview> {
    Ok(state.preview_average(&ratings)?)
}
