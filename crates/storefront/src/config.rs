//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://localhost:3000`);
//!   an `https://` URL turns on secure session cookies
//! - `STOREFRONT_ADMIN_EMAIL` - Demo admin login (default: admin@customcraft.com)
//! - `STOREFRONT_ADMIN_PASSWORD` - Demo admin password (default: admin)
//! - `STOREFRONT_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is free (default: 50)
//! - `STOREFRONT_SHIPPING_FEE` - Flat shipping fee (default: 5.99)
//! - `STOREFRONT_TAX_RATE` - Tax rate on the discounted subtotal (default: 0.08)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use customcraft_core::{Email, PricingPolicy};
use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_ADMIN_EMAIL: &str = "admin@customcraft.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Demo identity provider settings
    pub identity: IdentityConfig,
    /// Shipping and tax constants
    pub pricing: PricingPolicy,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Demo identity provider settings.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct IdentityConfig {
    /// Email that signs in as the store admin
    pub admin_email: Email,
    /// Password for the admin email
    pub admin_password: SecretString,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[REDACTED]")
            .finish()
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: default_base_url(),
            identity: IdentityConfig::default(),
            pricing: PricingPolicy::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            admin_password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = parse_or(parsed("STOREFRONT_HOST"), "STOREFRONT_HOST", defaults.host)?;
        let port = parse_or(parsed("STOREFRONT_PORT"), "STOREFRONT_PORT", defaults.port)?;
        let base_url = parse_or(
            parsed("STOREFRONT_BASE_URL"),
            "STOREFRONT_BASE_URL",
            defaults.base_url,
        )?;

        let admin_email = match parsed("STOREFRONT_ADMIN_EMAIL") {
            Some(value) => Email::parse(&value).map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_ADMIN_EMAIL".to_string(), e.to_string())
            })?,
            None => defaults.identity.admin_email,
        };
        let admin_password = parsed("STOREFRONT_ADMIN_PASSWORD")
            .map_or(defaults.identity.admin_password, SecretString::from);

        let pricing = PricingPolicy {
            free_shipping_threshold: parse_decimal(
                parsed("STOREFRONT_FREE_SHIPPING_THRESHOLD"),
                "STOREFRONT_FREE_SHIPPING_THRESHOLD",
                defaults.pricing.free_shipping_threshold,
            )?,
            shipping_fee: parse_decimal(
                parsed("STOREFRONT_SHIPPING_FEE"),
                "STOREFRONT_SHIPPING_FEE",
                defaults.pricing.shipping_fee,
            )?,
            tax_rate: parse_decimal(
                parsed("STOREFRONT_TAX_RATE"),
                "STOREFRONT_TAX_RATE",
                defaults.pricing.tax_rate,
            )?,
        };

        Ok(Self {
            host,
            port,
            base_url,
            identity: IdentityConfig {
                admin_email,
                admin_password,
            },
            pricing,
            sentry_dsn: parsed("SENTRY_DSN"),
            sentry_environment: parsed("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_base_url() -> Url {
    Url::parse("http://localhost:3000").unwrap_or_else(|_| unreachable!("static URL is valid"))
}

fn default_admin_email() -> Email {
    Email::parse(DEFAULT_ADMIN_EMAIL).unwrap_or_else(|_| unreachable!("static email is valid"))
}

/// Parse a value if present, otherwise use `default`.
fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |v| {
        v.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a non-negative decimal if present, otherwise use `default`.
fn parse_decimal(
    value: Option<String>,
    key: &str,
    default: Decimal,
) -> Result<Decimal, ConfigError> {
    let parsed = parse_or(value, key, default)?;
    if parsed.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(parsed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(!config.is_secure());
        assert_eq!(config.identity.admin_email.as_str(), "admin@customcraft.com");
        assert_eq!(config.identity.admin_password.expose_secret(), "admin");
        assert_eq!(config.pricing, PricingPolicy::default());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://shop.example.com"),
            ("STOREFRONT_TAX_RATE", "0.2"),
            ("STOREFRONT_SHIPPING_FEE", "4.50"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_secure());
        assert_eq!(config.pricing.tax_rate, Decimal::new(2, 1));
        assert_eq!(config.pricing.shipping_fee, Decimal::new(450, 2));
        assert_eq!(config.pricing.free_shipping_threshold, Decimal::from(50));
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("STOREFRONT_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_negative_tax_rate_rejected() {
        let err = load(&[("STOREFRONT_TAX_RATE", "-0.1")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_TAX_RATE"));
    }

    #[test]
    fn test_invalid_admin_email() {
        assert!(load(&[("STOREFRONT_ADMIN_EMAIL", "root")]).is_err());
    }

    #[test]
    fn test_identity_debug_redacts_password() {
        let config = load(&[("STOREFRONT_ADMIN_PASSWORD", "hunter2-super-secret")]).unwrap();
        let debug_output = format!("{:?}", config.identity);
        assert!(debug_output.contains("admin@customcraft.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2-super-secret"));
    }
}
