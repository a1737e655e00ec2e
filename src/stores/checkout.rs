use thiserror::Error;
use tracing::{info, instrument};

use crate::api::{ApiClient, ApiError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("phone number is required")]
    MissingPhone,
    #[error("delivery address is required")]
    MissingAddress,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Delivery details collected by the checkout form.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub phone: String,
    pub address: String,
}

impl CheckoutForm {
    pub fn new(phone: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Both fields must be non-empty after trimming. Runs before any network
    /// call; an invalid form never reaches the wire.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.phone.trim().is_empty() {
            return Err(CheckoutError::MissingPhone);
        }
        if self.address.trim().is_empty() {
            return Err(CheckoutError::MissingAddress);
        }
        Ok(())
    }
}

/// Checkout flow: one request converting the current cart into orders.
///
/// Success implies the backend emptied the cart; the caller reloads it
/// rather than verifying. Failure is a single generic error with no retry
/// and no per-line visibility.
pub struct CheckoutFlow {
    client: ApiClient,
}

impl CheckoutFlow {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, form))]
    pub async fn place_order(&self, form: &CheckoutForm) -> Result<(), CheckoutError> {
        form.validate()?;
        self.client
            .place_order(form.phone.trim(), form.address.trim())
            .await?;
        info!("Order placed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_phone_is_rejected() {
        let form = CheckoutForm::new("   ", "12 Main St");
        assert!(matches!(form.validate(), Err(CheckoutError::MissingPhone)));
    }

    #[test]
    fn blank_address_is_rejected() {
        let form = CheckoutForm::new("5551234", "");
        assert!(matches!(form.validate(), Err(CheckoutError::MissingAddress)));
    }

    #[test]
    fn complete_form_passes() {
        assert!(CheckoutForm::new("5551234", "12 Main St").validate().is_ok());
    }
}
