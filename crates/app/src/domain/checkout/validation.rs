//! Checkout request validation.

use smallvec::SmallVec;

use crate::domain::{
    checkout::data::{CheckoutLine, CheckoutRequest},
    newsletter::is_valid_email,
    orders::Address,
};

/// A rejected request field, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Path of the field, e.g. `items[0].quantity`.
    pub field: String,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: impl Into<String>, message: &'static str) -> Self {
        Self {
            field: field.into(),
            message,
        }
    }
}

pub type FieldErrors = SmallVec<[FieldError; 4]>;

/// Check a request's shape before anything is priced or persisted.
///
/// # Errors
///
/// Returns every problem found, not just the first.
pub fn validate(request: &CheckoutRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if request.items.is_empty() {
        errors.push(FieldError::new("items", "at least one item is required"));
    }

    for (index, line) in request.items.iter().enumerate() {
        validate_line(index, line, &mut errors);
    }

    if !is_valid_email(request.email.trim()) {
        errors.push(FieldError::new("email", "must be a valid email address"));
    }

    validate_address("shippingAddress", &request.shipping_address, &mut errors);

    if let Some(billing) = &request.billing_address {
        validate_address("billingAddress", billing, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_line(index: usize, line: &CheckoutLine, errors: &mut FieldErrors) {
    match (line.product_uuid, line.custom_drink_uuid) {
        (Some(_), None) | (None, Some(_)) => {}
        (None, None) => errors.push(FieldError::new(
            format!("items[{index}]"),
            "must reference a product or a custom drink",
        )),
        (Some(_), Some(_)) => errors.push(FieldError::new(
            format!("items[{index}]"),
            "cannot reference both a product and a custom drink",
        )),
    }

    if line.quantity < 1 {
        errors.push(FieldError::new(
            format!("items[{index}].quantity"),
            "must be at least 1",
        ));
    } else if u32::try_from(line.quantity).is_err() {
        errors.push(FieldError::new(
            format!("items[{index}].quantity"),
            "is too large",
        ));
    }
}

fn validate_address(prefix: &str, address: &Address, errors: &mut FieldErrors) {
    for field in address.blank_fields() {
        errors.push(FieldError::new(format!("{prefix}.{field}"), "is required"));
    }
}
