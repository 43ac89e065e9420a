//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartLineItem;
use crate::pricing::PriceBreakdown;
use crate::types::{Email, EmailError, OrderId, OrderStatus};

/// Errors validating checkout details.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustomerDetailsError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Who an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: Email,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl CustomerDetails {
    /// Validate raw checkout form values.
    ///
    /// # Errors
    ///
    /// Returns the first blank required field, or an invalid email.
    pub fn parse(
        name: &str,
        email: &str,
        address: &str,
        city: &str,
        postal_code: &str,
    ) -> Result<Self, CustomerDetailsError> {
        let required = |field: &'static str, value: &str| {
            let value = value.trim();
            if value.is_empty() {
                Err(CustomerDetailsError::MissingField(field))
            } else {
                Ok(value.to_owned())
            }
        };

        let name = required("name", name)?;
        let email = Email::parse(email)?;
        Ok(Self {
            name,
            email,
            address: required("address", address)?,
            city: required("city", city)?,
            postal_code: required("postal code", postal_code)?,
        })
    }
}

/// An order submitted at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub customer: CustomerDetails,
    pub items: Vec<CartLineItem>,
    pub breakdown: PriceBreakdown,
    pub coupon_code: Option<String>,
    pub status: OrderStatus,
}

impl Order {
    /// Total units ordered.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .map(|item| item.quantity.get())
            .fold(0, u32::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_details() {
        let details = CustomerDetails::parse(
            " Jane Smith ",
            "jane@example.com",
            "1 Main St",
            "Springfield",
            "12345",
        );
        let details = details.unwrap_or_else(|e| panic!("valid details rejected: {e}"));
        assert_eq!(details.name, "Jane Smith");
        assert_eq!(details.email.as_str(), "jane@example.com");
    }

    #[test]
    fn test_parse_reports_first_missing_field() {
        let result = CustomerDetails::parse("Jane", "jane@example.com", "", "", "12345");
        assert_eq!(result, Err(CustomerDetailsError::MissingField("address")));
    }

    #[test]
    fn test_parse_rejects_bad_email() {
        let result = CustomerDetails::parse("Jane", "jane", "1 Main St", "Springfield", "1");
        assert!(matches!(result, Err(CustomerDetailsError::InvalidEmail(_))));
    }
}
