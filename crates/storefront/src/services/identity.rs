//! Demo identity provider.
//!
//! Stands in for a real identity service. It is NOT a security boundary:
//! any non-empty password signs a customer in, and registered accounts live
//! only in memory.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{PoisonError, RwLock};

use customcraft_core::identity::require_field;
use customcraft_core::{AuthError, Email, IdentityProvider, Role, User, UserId};
use secrecy::ExposeSecret;

use crate::config::IdentityConfig;

const ADMIN_USER_ID: u32 = 1;
const GUEST_CUSTOMER_ID: u32 = 2;
const FIRST_REGISTERED_ID: u32 = 1000;
const ADMIN_NAME: &str = "Admin User";
const GUEST_CUSTOMER_NAME: &str = "John Doe";

/// In-memory identity provider with one configured admin account.
pub struct DemoIdentityProvider {
    config: IdentityConfig,
    registered: RwLock<HashMap<String, User>>,
    next_id: AtomicU32,
}

impl DemoIdentityProvider {
    /// Create a provider for the configured admin account.
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            registered: RwLock::new(HashMap::new()),
            next_id: AtomicU32::new(FIRST_REGISTERED_ID),
        }
    }

    fn is_admin_email(&self, email: &Email) -> bool {
        email.matches(&self.config.admin_email)
    }

    fn registered_user(&self, email: &Email) -> Option<User> {
        self.registered
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&email.as_str().to_lowercase())
            .cloned()
    }
}

impl IdentityProvider for DemoIdentityProvider {
    fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(require_field("email", email)?)?;
        require_field("password", password)?;

        if self.is_admin_email(&email) {
            if password != self.config.admin_password.expose_secret() {
                return Err(AuthError::InvalidCredentials);
            }
            return Ok(User {
                id: UserId::new(ADMIN_USER_ID),
                name: ADMIN_NAME.to_string(),
                email,
                role: Role::Admin,
            });
        }

        Ok(self.registered_user(&email).unwrap_or_else(|| User {
            id: UserId::new(GUEST_CUSTOMER_ID),
            name: GUEST_CUSTOMER_NAME.to_string(),
            email,
            role: Role::Customer,
        }))
    }

    fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let name = require_field("name", name)?;
        let email = Email::parse(require_field("email", email)?)?;
        require_field("password", password)?;

        if self.is_admin_email(&email) {
            return Err(AuthError::AlreadyRegistered);
        }

        let mut registered = self
            .registered
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let key = email.as_str().to_lowercase();
        if registered.contains_key(&key) {
            return Err(AuthError::AlreadyRegistered);
        }

        let user = User {
            id: UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
            name: name.to_string(),
            email,
            role: Role::Customer,
        };
        registered.insert(key, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use customcraft_core::Capability;

    use super::*;

    fn provider() -> DemoIdentityProvider {
        DemoIdentityProvider::new(IdentityConfig::default())
    }

    #[test]
    fn test_admin_login() {
        let user = provider()
            .authenticate("admin@customcraft.com", "admin")
            .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.name, "Admin User");
        assert!(user.can(Capability::ViewAdminDashboard));
    }

    #[test]
    fn test_admin_email_with_wrong_password_is_rejected() {
        let result = provider().authenticate("ADMIN@customcraft.com", "letmein");
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn test_any_other_credentials_sign_in_a_customer() {
        let user = provider().authenticate("shopper@example.com", "pw").unwrap();
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email.as_str(), "shopper@example.com");
        assert!(!user.can(Capability::ViewAdminDashboard));
    }

    #[test]
    fn test_blank_fields_rejected() {
        let p = provider();
        assert_eq!(
            p.authenticate("", "pw"),
            Err(AuthError::MissingField("email"))
        );
        assert_eq!(
            p.authenticate("a@b.c", " "),
            Err(AuthError::MissingField("password"))
        );
        assert!(matches!(
            p.authenticate("not-an-email", "pw"),
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_register_then_login_keeps_profile() {
        let p = provider();
        let registered = p.register("Ann Lee", "ann@example.com", "pw").unwrap();
        assert_eq!(registered.id, UserId::new(1000));

        let signed_in = p.authenticate("Ann@Example.com", "anything").unwrap();
        assert_eq!(signed_in.id, registered.id);
        assert_eq!(signed_in.name, "Ann Lee");
    }

    #[test]
    fn test_register_assigns_fresh_ids() {
        let p = provider();
        let a = p.register("A", "a@example.com", "pw").unwrap();
        let b = p.register("B", "b@example.com", "pw").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_register_duplicate_or_admin_email() {
        let p = provider();
        p.register("A", "a@example.com", "pw").unwrap();
        assert_eq!(
            p.register("A2", "A@example.com", "pw"),
            Err(AuthError::AlreadyRegistered)
        );
        assert_eq!(
            p.register("Mallory", "admin@customcraft.com", "pw"),
            Err(AuthError::AlreadyRegistered)
        );
    }

    #[test]
    fn test_register_requires_name() {
        assert_eq!(
            provider().register(" ", "a@example.com", "pw"),
            Err(AuthError::MissingField("name"))
        );
    }
}
