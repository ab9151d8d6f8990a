//! Display projection of an entry for the records table.

use serde::Serialize;

use crate::core::config::AveragePrecision;
use crate::core::photo::Photo;
use crate::core::types::{EntryId, LogEntry};

/// Placeholder for empty cells.
pub const MISSING: &str = "—";

/// One table row, every cell already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRow {
    /// Key for the delete action
    pub id: EntryId,
    /// Thumbnail source, also shown full-size in the overlay
    pub photo: Option<Photo>,
    pub photo_alt: String,
    pub facility: String,
    pub address: String,
    /// Rating cells in category order
    pub ratings: Vec<String>,
    pub avg: String,
    pub price: String,
    pub comment: String,
    pub created_at: String,
}

impl EntryRow {
    pub fn project(entry: &LogEntry, precision: AveragePrecision, comment_chars: usize) -> Self {
        Self {
            id: entry.id(),
            photo: entry.photo().cloned(),
            photo_alt: format!("Photo of {}", entry.facility()),
            facility: entry.facility().to_string(),
            address: entry.address().unwrap_or_default().to_string(),
            ratings: entry
                .ratings()
                .iter()
                .map(|(_, rating)| rating.map_or_else(|| MISSING.to_string(), |r| r.get().to_string()))
                .collect(),
            avg: AveragePreview::new(entry.avg(), precision).display,
            price: entry
                .price()
                .map_or_else(|| MISSING.to_string(), |price| price.to_string()),
            comment: shorten(entry.comment().unwrap_or_default(), comment_chars),
            created_at: entry.created_at().to_rfc3339(),
        }
    }
}

/// Live average shown under the rating inputs before submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragePreview {
    pub value: Option<f64>,
    /// Same formatting as the table's average column
    pub display: String,
}

impl AveragePreview {
    pub fn new(value: Option<f64>, precision: AveragePrecision) -> Self {
        Self {
            value,
            display: value.map_or_else(|| MISSING.to_string(), |avg| precision.format(avg)),
        }
    }
}

/// Cuts `text` to `max_chars` characters, marking the cut with an ellipsis.
pub fn shorten(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
