//! Pending-photo slot of the entry form.
//!
//! Every selection takes a new generation. A decode that finishes after a
//! newer selection (or a form reset) carries a stale ticket and is dropped
//! instead of overwriting the newer state.

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::core::Photo;
use crate::processing::thumbnail::{Thumbnail, ThumbnailExecutor};
use crate::utils::DecodeError;

/// Generation a decode was started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoTicket(u64);

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    photo: Option<Photo>,
}

/// Outcome of a photo selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PhotoSelection {
    /// Photo decoded and attached to the form
    Attached(Thumbnail),
    /// A newer selection or reset happened while decoding; result discarded
    Superseded,
}

#[derive(Debug, Default)]
pub struct PhotoSession {
    slot: Mutex<Slot>,
}

impl PhotoSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new selection, dropping whatever was pending.
    pub async fn begin(&self) -> PhotoTicket {
        let mut slot = self.slot.lock().await;
        slot.generation += 1;
        slot.photo = None;
        PhotoTicket(slot.generation)
    }

    /// Attaches `photo` if `ticket` is still the latest selection.
    pub async fn commit(&self, ticket: PhotoTicket, photo: Photo) -> bool {
        let mut slot = self.slot.lock().await;
        if slot.generation != ticket.0 {
            debug!("Dropping stale photo (ticket {}, current {})", ticket.0, slot.generation);
            return false;
        }
        slot.photo = Some(photo);
        true
    }

    pub async fn is_current(&self, ticket: PhotoTicket) -> bool {
        self.slot.lock().await.generation == ticket.0
    }

    /// Clears the pending photo and invalidates in-flight decodes.
    pub async fn clear(&self) {
        let mut slot = self.slot.lock().await;
        slot.generation += 1;
        slot.photo = None;
    }

    pub async fn pending(&self) -> Option<Photo> {
        self.slot.lock().await.photo.clone()
    }

    /// Pending photo together with the generation it belongs to.
    ///
    /// Pair with [`PhotoSession::take`] once the submit that used the photo
    /// has succeeded.
    pub async fn snapshot(&self) -> (PhotoTicket, Option<Photo>) {
        let slot = self.slot.lock().await;
        (PhotoTicket(slot.generation), slot.photo.clone())
    }

    /// Consumes the pending photo of `ticket`'s generation and resets the slot.
    ///
    /// Returns `None` without touching the slot when a selection or reset
    /// happened after the snapshot was taken.
    pub async fn take(&self, ticket: PhotoTicket) -> Option<Option<Photo>> {
        let mut slot = self.slot.lock().await;
        if slot.generation != ticket.0 {
            debug!("Keeping photo slot, selection changed since ticket {}", ticket.0);
            return None;
        }
        slot.generation += 1;
        Some(slot.photo.take())
    }

    /// Compresses `bytes` and attaches the result unless superseded meanwhile.
    ///
    /// Errors from a superseded decode are swallowed; only the latest
    /// selection may surface a [`DecodeError`].
    pub async fn select(
        &self,
        executor: &ThumbnailExecutor,
        bytes: Vec<u8>,
    ) -> Result<PhotoSelection, DecodeError> {
        let ticket = self.begin().await;

        match executor.compress(bytes).await {
            Ok(thumbnail) => {
                if self.commit(ticket, thumbnail.photo.clone()).await {
                    Ok(PhotoSelection::Attached(thumbnail))
                } else {
                    Ok(PhotoSelection::Superseded)
                }
            }
            Err(e) => {
                if self.is_current(ticket).await {
                    Err(e)
                } else {
                    debug!("Ignoring error from superseded photo: {e}");
                    Ok(PhotoSelection::Superseded)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(tag: u8) -> Photo {
        Photo::from_jpeg(&[0xFF, 0xD8, tag])
    }

    #[tokio::test]
    async fn latest_ticket_wins() {
        let session = PhotoSession::new();
        let first = session.begin().await;
        let second = session.begin().await;

        assert!(session.commit(second, photo(2)).await);
        assert!(!session.commit(first, photo(1)).await);
        assert_eq!(session.pending().await, Some(photo(2)));
    }

    #[tokio::test]
    async fn clear_invalidates_in_flight_decode() {
        let session = PhotoSession::new();
        let ticket = session.begin().await;
        session.clear().await;

        assert!(!session.is_current(ticket).await);
        assert!(!session.commit(ticket, photo(1)).await);
        assert_eq!(session.pending().await, None);
    }

    #[tokio::test]
    async fn take_consumes_and_resets() {
        let session = PhotoSession::new();
        let ticket = session.begin().await;
        assert!(session.commit(ticket, photo(7)).await);

        let (snapshot, pending) = session.snapshot().await;
        assert_eq!(pending, Some(photo(7)));
        assert_eq!(session.take(snapshot).await, Some(Some(photo(7))));
        assert_eq!(session.take(snapshot).await, None);
        assert_eq!(session.pending().await, None);
        assert!(!session.commit(ticket, photo(8)).await);
    }

    #[tokio::test]
    async fn take_invalidates_decode_in_flight_at_snapshot() {
        let session = PhotoSession::new();
        let in_flight = session.begin().await;

        let (snapshot, pending) = session.snapshot().await;
        assert_eq!(pending, None);
        assert_eq!(session.take(snapshot).await, Some(None));
        assert!(!session.commit(in_flight, photo(1)).await);
    }

    #[tokio::test]
    async fn take_leaves_newer_selection_alone() {
        let session = PhotoSession::new();
        let first = session.begin().await;
        session.commit(first, photo(1)).await;
        let (snapshot, _) = session.snapshot().await;

        let newer = session.begin().await;
        assert!(session.commit(newer, photo(2)).await);

        assert_eq!(session.take(snapshot).await, None);
        assert_eq!(session.pending().await, Some(photo(2)));
    }

    #[tokio::test]
    async fn new_selection_drops_previous_photo() {
        let session = PhotoSession::new();
        let ticket = session.begin().await;
        session.commit(ticket, photo(1)).await;

        session.begin().await;
        assert_eq!(session.pending().await, None);
    }
}
