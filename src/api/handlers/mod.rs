//! REST endpoint handlers organized by resource.

pub mod contact;
pub mod status;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes nested under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(status::routes())
        .merge(contact::routes())
}
