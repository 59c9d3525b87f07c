//! Account management module.
//!
//! Provides the account model and its validation rules.

mod model;
mod validation;

pub use model::{Account, normalize_email};
pub use validation::{
    ValidationError, is_gmail_address, is_six_digit_password, validate_login,
    validate_registration,
};
