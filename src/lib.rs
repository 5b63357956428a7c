//! # viridata-backend
//!
//! HTTP backend for the Viridata site: a greeting endpoint, status check
//! logging backed by a document store, and a contact form that stores each
//! submission and emails the operator on a best-effort basis.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── StatusService / ContactService (service/)
//!     │       │
//!     │       └── ContactNotifier (notify/) ── SMTP relay
//!     │
//!     └── DocumentStore (persistence/)
//!             ├── PostgreSQL (JSONB)
//!             └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod notify;
pub mod persistence;
pub mod server;
pub mod service;
