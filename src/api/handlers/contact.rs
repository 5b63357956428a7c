//! Contact form handler.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::ContactResponse;
use crate::api::extract::AppJson;
use crate::app_state::AppState;
use crate::domain::ContactForm;
use crate::error::{ApiError, ErrorResponse};

/// `POST /contact`: Submit the contact form.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] on a malformed body and
/// [`ApiError::ContactSubmission`] if the submission cannot be stored.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    summary = "Submit the contact form",
    description = "Stores the submission and emails the operator on a best-effort basis. Email failures never affect the response.",
    request_body = ContactForm,
    responses(
        (status = 200, description = "Submission stored", body = ContactResponse),
        (status = 422, description = "Body does not match the schema", body = ErrorResponse),
        (status = 500, description = "Submission could not be stored", body = ErrorResponse),
    )
)]
pub async fn submit_contact_form(
    State(state): State<AppState>,
    AppJson(form): AppJson<ContactForm>,
) -> Result<Json<ContactResponse>, ApiError> {
    state.contact_service.submit(form).await?;
    Ok(Json(ContactResponse::accepted()))
}

/// Contact routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit_contact_form))
}
