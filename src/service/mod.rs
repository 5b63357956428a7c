//! Service layer: business logic orchestration.
//!
//! [`StatusService`] records and lists status checks; [`ContactService`]
//! stores contact submissions and hands them to the
//! [`crate::notify::ContactNotifier`].

pub mod contact_service;
pub mod status_service;

pub use contact_service::ContactService;
pub use status_service::StatusService;
