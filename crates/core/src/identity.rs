//! Users, roles and capabilities.
//!
//! Access decisions are made with [`User::can`] against an explicit
//! [`Capability`], never by inspecting a role flag at the call site. Who a
//! visitor is comes from an [`IdentityProvider`].

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Email, EmailError, UserId};

/// Authentication failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A required form field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    AlreadyRegistered,
}

/// What a signed-in user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => f.write_str("customer"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// Something a user may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// See one's own orders, designs and profile.
    ViewAccount,
    /// See store-wide statistics, orders, products and discount codes.
    ViewAdminDashboard,
}

impl Role {
    /// Whether this role grants `capability`.
    #[must_use]
    pub const fn can(&self, capability: Capability) -> bool {
        match (self, capability) {
            (_, Capability::ViewAccount) | (Self::Admin, Capability::ViewAdminDashboard) => true,
            (Self::Customer, Capability::ViewAdminDashboard) => false,
        }
    }
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
}

impl User {
    /// Whether this user holds `capability`.
    #[must_use]
    pub const fn can(&self, capability: Capability) -> bool {
        self.role.can(capability)
    }
}

/// Source of truth for who a visitor is.
///
/// The storefront only ever talks to this trait; swapping the demo provider
/// for a real one does not touch any handler.
pub trait IdentityProvider: Send + Sync {
    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if a field is blank, the email is malformed,
    /// or the credentials are rejected.
    fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if a field is blank, the email is malformed,
    /// or the email already belongs to an account.
    fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError>;
}

/// Fail with [`AuthError::MissingField`] if `value` is blank.
///
/// # Errors
///
/// Returns [`AuthError::MissingField`] naming `field`.
pub fn require_field<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}
