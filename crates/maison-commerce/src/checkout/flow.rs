//! Checkout steps and contact details.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Contact and delivery information.
    Information,
    /// Payment method selection and order submission.
    Payment,
    /// Order placed; terminal.
    Confirmation,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Information => "information",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Confirmation => "confirmation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Information => "Information",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Confirmation => "Confirmation",
        }
    }

    /// Get the step number (1-indexed), for the breadcrumb.
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Information => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Confirmation => 3,
        }
    }

    /// Check if this is the terminal step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutStep::Confirmation)
    }
}

/// Contact and delivery details collected at the information step.
///
/// All fields except `save_info` are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactDetails {
    /// Customer email; the confirmation is sent here.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Delivery street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Postcode.
    pub postcode: String,
    /// Phone number.
    pub phone: String,
    /// Remember these details for next time.
    pub save_info: bool,
}

impl ContactDetails {
    /// Names of required fields that are empty after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("email", &self.email),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("postcode", &self.postcode),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        missing
    }

    /// Validate the details.
    ///
    /// Every required field must be non-empty; the email must look like
    /// `local@domain`. Postcode and phone shapes are deliberately not
    /// validated.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(CommerceError::MissingFields(
                missing.iter().map(|s| s.to_string()).collect(),
            ));
        }

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(CommerceError::InvalidEmail(email.to_string())),
        }
    }

    /// Full name for the delivery label.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}
