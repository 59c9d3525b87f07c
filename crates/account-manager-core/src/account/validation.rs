//! Account field validation.
//!
//! Checks run in the same order the original forms applied them; the first
//! failing check is reported so a caller can surface one message at a time.

/// Validation error for account fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Display name is empty.
    EmptyName,
    /// Email address is empty.
    EmptyEmail,
    /// Password is empty.
    EmptyPassword,
    /// Email address is not a gmail.com address.
    InvalidEmail,
    /// Password is not exactly six decimal digits.
    InvalidPassword,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "Name is required",
            Self::EmptyEmail => "Email address is required",
            Self::EmptyPassword => "Password is required",
            Self::InvalidEmail => "Email must be a gmail.com address",
            Self::InvalidPassword => "Password must be exactly 6 digits",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword | Self::InvalidPassword => "password",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Check that an email is a gmail.com address.
///
/// Mirrors the original rule: a non-empty local part with no whitespace or
/// extra `@`, followed by `gmail.com`, compared case-insensitively.
#[must_use]
pub fn is_gmail_address(email: &str) -> bool {
    let email = email.trim();

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.contains(char::is_whitespace) || local.contains('@') {
        return false;
    }

    domain.eq_ignore_ascii_case("gmail.com")
}

/// Check that a password is exactly six ASCII decimal digits.
#[must_use]
pub fn is_six_digit_password(password: &str) -> bool {
    let password = password.trim();
    password.len() == 6 && password.bytes().all(|b| b.is_ascii_digit())
}

/// Validate registration input. Inputs are expected pre-trimmed.
///
/// # Errors
///
/// Returns the first failing [`ValidationError`].
pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if !is_gmail_address(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_six_digit_password(password) {
        return Err(ValidationError::InvalidPassword);
    }
    Ok(())
}

/// Validate login input. Inputs are expected pre-trimmed.
///
/// # Errors
///
/// Returns the first failing [`ValidationError`].
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if !is_gmail_address(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_six_digit_password(password) {
        return Err(ValidationError::InvalidPassword);
    }
    Ok(())
}
