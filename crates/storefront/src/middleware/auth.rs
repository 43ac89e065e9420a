//! Authentication extractors.
//!
//! Handlers state what they need in their signature: [`OptionalAuth`] for
//! pages that adapt to the visitor, [`RequireAccount`] and [`RequireAdmin`]
//! for pages gated on a [`Capability`]. A failed check renders the
//! access-denied page in place of the content (401 when nobody is signed in,
//! 403 when the signed-in user lacks the capability).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use customcraft_core::{Capability, Cart, User};
use tower_sessions::Session;

use crate::models::session;
use crate::routes::NavView;

/// Extractor that optionally gets the signed-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.name),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(s) => session::current_user(s).await,
            None => None,
        };
        Ok(Self(user))
    }
}

/// Extractor for a user holding [`Capability::ViewAccount`].
pub struct RequireAccount(pub User);

/// Extractor for a user holding [`Capability::ViewAdminDashboard`].
pub struct RequireAdmin(pub User);

impl<S> FromRequestParts<S> for RequireAccount
where
    S: Send + Sync,
{
    type Rejection = AccessDenied;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require(parts, Capability::ViewAccount).await.map(Self)
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AccessDenied;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require(parts, Capability::ViewAdminDashboard)
            .await
            .map(Self)
    }
}

async fn require(parts: &Parts, capability: Capability) -> Result<User, AccessDenied> {
    let store = parts.extensions.get::<Session>();
    let user = match store {
        Some(s) => session::current_user(s).await,
        None => None,
    };

    match user {
        Some(user) if user.can(capability) => Ok(user),
        user => {
            let cart = match store {
                Some(s) => session::cart(s).await,
                None => Cart::new(),
            };
            let nav = NavView::new(user.as_ref(), &cart);
            let next = parts.uri.path().to_owned();
            Err(match user {
                Some(user) => {
                    tracing::warn!(user_id = %user.id, ?capability, "Capability check failed");
                    AccessDenied::forbidden(nav, capability)
                }
                None => AccessDenied::unauthenticated(nav, next),
            })
        }
    }
}

/// Rejection rendered as the access-denied page.
#[derive(Debug)]
pub struct AccessDenied {
    status: StatusCode,
    nav: NavView,
    message: &'static str,
    login_next: Option<String>,
}

impl AccessDenied {
    fn unauthenticated(nav: NavView, next: String) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            nav,
            message: "Please sign in to view this page.",
            login_next: Some(next),
        }
    }

    fn forbidden(nav: NavView, capability: Capability) -> Self {
        let message = match capability {
            Capability::ViewAccount => "You don't have permission to view this account.",
            Capability::ViewAdminDashboard => {
                "You don't have permission to access the admin panel."
            }
        };
        Self {
            status: StatusCode::FORBIDDEN,
            nav,
            message,
            login_next: None,
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

/// Access denied page template.
#[derive(Template, WebTemplate)]
#[template(path = "errors/access_denied.html")]
pub struct AccessDeniedTemplate {
    pub nav: NavView,
    pub message: &'static str,
    pub login_next: Option<String>,
}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        (
            self.status,
            AccessDeniedTemplate {
                nav: self.nav,
                message: self.message,
                login_next: self.login_next,
            },
        )
            .into_response()
    }
}

/// Store the signed-in user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &User,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session::keys::CURRENT_USER, user).await
}

/// Clear the signed-in user from the session (logout).
///
/// The cart is left in place.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<User>(session::keys::CURRENT_USER)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_status() {
        let denied = AccessDenied::unauthenticated(NavView::default(), "/admin".to_string());
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

        let denied = AccessDenied::forbidden(NavView::default(), Capability::ViewAdminDashboard);
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
        assert!(denied.message.contains("admin panel"));
    }
}
