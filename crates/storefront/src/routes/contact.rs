//! Contact form route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use pet_haven_core::Email;

use crate::error::AppError;
use crate::filters;
use crate::services::mailer::ContactMessage;
use crate::state::AppState;

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display the contact form.
pub async fn page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    ContactTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle contact form submission.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return Ok(Redirect::to("/contact?error=missing_fields").into_response());
    }

    let Ok(email) = Email::parse(&form.email) else {
        return Ok(Redirect::to("/contact?error=invalid_email").into_response());
    };

    let message = ContactMessage {
        name: form.name,
        email,
        message: form.message,
    };

    state.mailer().send_contact_message(&message).await?;

    Ok(Redirect::to("/contact?success=sent").into_response())
}
