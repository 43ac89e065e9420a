//! Authentication route handlers.
//!
//! Sign-in and registration go through the configured
//! [`IdentityProvider`](customcraft_core::IdentityProvider). The signed-in
//! user is kept in the session; the cart survives both login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use customcraft_core::{AuthError, User};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{NavView, safe_next};
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

/// Registration form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters for the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: NavView,
    pub error: Option<String>,
    pub email: String,
    pub next: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub nav: NavView,
    pub error: Option<String>,
    pub name: String,
    pub email: String,
}

/// Status for a rejected sign-in or registration.
const fn rejection_status(error: &AuthError) -> StatusCode {
    match error {
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::AlreadyRegistered => StatusCode::CONFLICT,
        AuthError::MissingField(_) | AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
    }
}

/// Put `user` in a fresh session.
async fn sign_in(session: &Session, user: &User) -> Result<()> {
    session.cycle_id().await?;
    set_current_user(session, user).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, role = %user.role, "Signed in");
    Ok(())
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
#[instrument(skip(session))]
pub async fn login_page(session: Session, Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        nav: NavView::load(&session).await,
        error: None,
        email: String::new(),
        next: safe_next(query.next.as_deref()).map(str::to_owned),
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let next = safe_next(form.next.as_deref()).map(str::to_owned);

    match state.identity().authenticate(&form.email, &form.password) {
        Ok(user) => {
            sign_in(&session, &user).await?;
            let target = next.as_deref().unwrap_or("/dashboard");
            Ok(Redirect::to(target).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login rejected");
            Ok((
                rejection_status(&e),
                LoginTemplate {
                    nav: NavView::load(&session).await,
                    error: Some(e.to_string()),
                    email: form.email,
                    next,
                },
            )
                .into_response())
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
#[instrument(skip(session))]
pub async fn register_page(session: Session) -> impl IntoResponse {
    RegisterTemplate {
        nav: NavView::load(&session).await,
        error: None,
        name: String::new(),
        email: String::new(),
    }
}

/// Handle registration form submission.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    match state
        .identity()
        .register(&form.name, &form.email, &form.password)
    {
        Ok(user) => {
            sign_in(&session, &user).await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Registration rejected");
            Ok((
                rejection_status(&e),
                RegisterTemplate {
                    nav: NavView::load(&session).await,
                    error: Some(e.to_string()),
                    name: form.name,
                    email: form.email,
                },
            )
                .into_response())
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Sign out and return home. The cart is kept.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use customcraft_core::EmailError;

    use super::*;

    #[test]
    fn test_rejection_status() {
        assert_eq!(
            rejection_status(&AuthError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            rejection_status(&AuthError::AlreadyRegistered),
            StatusCode::CONFLICT
        );
        assert_eq!(
            rejection_status(&AuthError::InvalidEmail(EmailError::Malformed)),
            StatusCode::BAD_REQUEST
        );
    }
}
