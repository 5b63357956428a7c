//! Data Transfer Objects for REST request/response serialization.
//!
//! Stored records ([`crate::domain::StatusCheck`],
//! [`crate::domain::ContactForm`]) double as their own wire types; the
//! types here cover the remaining request and response bodies.

pub mod common_dto;
pub mod contact_dto;
pub mod status_dto;

pub use common_dto::*;
pub use contact_dto::*;
pub use status_dto::*;
