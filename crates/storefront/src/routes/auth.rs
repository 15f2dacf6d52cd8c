//! Authentication route handlers.
//!
//! Handles login, registration, and logout with session-backed identity.
//! Failures redirect back to the form with an error code in the query
//! string rather than surfacing raw error pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::models::{CurrentUser, User, session::keys};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Store the logged-in user in the session and tag Sentry events.
async fn set_current_user(
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
    };
    session.insert(keys::CURRENT_USER, &current).await?;

    set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login_with_password(&form.email, &form.password).await {
        Ok(user) => {
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/auth/login?error=session").into_response();
            }

            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            Redirect::to("/auth/login?error=credentials").into_response()
        }
    }
}

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
///
/// New accounts are logged in immediately.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/auth/register?error=password_mismatch").into_response();
    }

    let auth = AuthService::new(state.pool());

    match auth
        .register_with_password(&form.email, &form.password)
        .await
    {
        Ok(user) => {
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/auth/login?success=registered").into_response();
            }

            Redirect::to("/").into_response()
        }
        Err(AuthError::UserAlreadyExists) => {
            Redirect::to("/auth/register?error=email_taken").into_response()
        }
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/auth/register?error=password_too_short").into_response()
        }
        Err(AuthError::InvalidEmail(_)) => {
            Redirect::to("/auth/register?error=invalid_email").into_response()
        }
        Err(e) => {
            tracing::error!("Registration failed: {e}");
            Redirect::to("/auth/register?error=internal").into_response()
        }
    }
}

/// Handle logout.
///
/// Drops the identity but keeps the rest of the session, so the cart
/// survives logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = session.remove::<CurrentUser>(keys::CURRENT_USER).await {
        tracing::warn!("Failed to clear session user: {e}");
    }

    clear_sentry_user();

    Redirect::to("/").into_response()
}
