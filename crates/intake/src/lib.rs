//! Server-side guest intake
//!
//! Receives guest form submissions, turns signature data URIs back into PNG
//! files and persists everything through two storage contracts:
//! - [`BlobStore`] - uploaded photos and signatures
//! - [`GuestStore`] - guest records

mod blob;
mod decode;
mod error;
mod intake;
mod store;

pub use blob::{BlobStore, FsBlobStore, MemoryBlobStore, StoredBlob, sanitize_file_name};
pub use decode::decode_signature;
pub use error::IntakeError;
pub use intake::{GUEST_SAVED_MESSAGE, GuestIntake};
pub use store::{GuestRecord, GuestStore, MemoryGuestStore, NewGuest};
