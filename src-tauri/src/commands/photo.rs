//! Photo selection commands.

use tauri::State;
use tracing::debug;

use crate::core::AppState;
use crate::processing::PhotoSelection;
use crate::utils::{LogbookError, LogbookResult};

/// Compresses the photo at `path` (as returned by the file dialog) and makes
/// it the form's pending photo.
///
/// # Returns
/// The thumbnail, or `Superseded` when another photo was chosen meanwhile.
#[tauri::command]
pub async fn select_photo(state: State<'_, AppState>, path: String) -> LogbookResult<PhotoSelection> {
    debug!("Received select_photo command for {path}");

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| LogbookError::io(format!("Cannot read '{path}': {e}")))?;

    Ok(state.select_photo(bytes).await?)
}

/// Drops the pending photo and any decode still running.
#[tauri::command]
pub async fn clear_photo(state: State<'_, AppState>) -> LogbookResult<()> {
    state.clear_photo().await;
    Ok(())
}
