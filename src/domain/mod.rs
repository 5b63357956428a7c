//! Domain layer: record identity, status checks, and contact submissions.
//!
//! These types carry the server-assigned identity and timestamp invariants
//! and know how to encode themselves as store documents.

pub mod contact;
pub mod record_id;
pub mod status_check;
pub mod timestamp;

pub use contact::{ContactForm, ContactSubmission};
pub use record_id::RecordId;
pub use status_check::StatusCheck;
