//! Session-backed cart extractor.
//!
//! A handler that mutates the cart takes a [`SessionCart`], changes it, and
//! calls [`SessionCart::save`]. Nothing is written back implicitly.

use axum::{extract::FromRequestParts, http::request::Parts};
use customcraft_core::{Cart, Coupon, CouponBook};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session;

/// The visitor's cart and applied coupon, loaded from their session.
pub struct SessionCart {
    session: Session,
    pub cart: Cart,
    /// Normalized code of the applied coupon.
    pub coupon_code: Option<String>,
}

impl<S> FromRequestParts<S> for SessionCart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let cart = session::cart(&session).await;
        let coupon_code = session::coupon_code(&session).await;
        Ok(Self {
            session,
            cart,
            coupon_code,
        })
    }
}

impl SessionCart {
    /// The underlying session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The applied coupon, if its code is still in `coupons`.
    #[must_use]
    pub fn coupon<'a>(&self, coupons: &'a CouponBook) -> Option<&'a Coupon> {
        self.coupon_code
            .as_deref()
            .and_then(|code| coupons.lookup(code).ok())
    }

    /// Drop every line and the applied coupon.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.coupon_code = None;
    }

    /// Write the cart and coupon back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn save(&self) -> Result<(), tower_sessions::session::Error> {
        self.session.insert(session::keys::CART, &self.cart).await?;
        match &self.coupon_code {
            Some(code) => self.session.insert(session::keys::COUPON, code).await?,
            None => {
                self.session
                    .remove::<String>(session::keys::COUPON)
                    .await?;
            }
        }
        Ok(())
    }
}
