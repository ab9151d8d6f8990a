//! Photo processing: the thumbnail pipeline and the form's pending-photo slot.

pub mod session;
pub mod thumbnail;

pub use session::{PhotoSelection, PhotoSession, PhotoTicket};
pub use thumbnail::{Thumbnail, ThumbnailExecutor};
