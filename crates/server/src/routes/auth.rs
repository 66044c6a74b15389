//! Authentication route handlers.
//!
//! Registration and login are browser form posts; success responds with
//! a redirect, failure with a plain status and a message that never
//! distinguishes which field was at fault.

use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Registration form data.
///
/// Fields are optional so a missing field surfaces as our own 400
/// rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Treat an absent or empty form field as missing.
fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle registration form submission.
///
/// On success redirects to the login page; the user is not logged in
/// automatically and no verification email is sent.
///
/// # Errors
///
/// 400 if any field is missing, 409 if username or email is taken
/// (without revealing which), 500 on a store failure.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect> {
    let (Some(username), Some(email), Some(password)) = (
        present(form.username),
        present(form.email),
        present(form.password),
    ) else {
        return Err(AppError::Validation("All fields are required.".to_string()));
    };

    let user = AuthService::new(state.pool())
        .register(&username, &email, &password)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok(Redirect::to("/login.html"))
}

/// Handle login form submission.
///
/// On success stores the identity snapshot in the session and redirects
/// to the home page.
///
/// # Errors
///
/// 400 if a field is missing; 401 with one generic message for unknown
/// username and wrong password alike.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let (Some(username), Some(password)) = (present(form.username), present(form.password)) else {
        return Err(AppError::Validation(
            "Username and password are required.".to_string(),
        ));
    };

    let user = AuthService::new(state.pool())
        .login(&username, &password)
        .await?;

    // Snapshot taken at login; never refreshed from the user row
    let current_user = CurrentUser {
        id: user.id,
        username: user.username.clone(),
    };

    set_current_user(&session, &current_user)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;
    set_sentry_user(&user.id, Some(&user.username));

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Redirect::to("/home.html"))
}

/// Handle logout.
///
/// Destroys the session unconditionally and redirects to the login
/// page. Idempotent when no session existed.
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session user: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    clear_sentry_user();
    Redirect::to("/login.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_rejects_empty_and_missing() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(Some("alice".to_string())), Some("alice".to_string()));
    }
}
