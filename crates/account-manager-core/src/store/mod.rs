//! The account store.
//!
//! Owns the registered account list and the active session, enforces
//! validation and email uniqueness, and mirrors every mutation to the
//! [`StateRepository`]. In-memory state is authoritative; storage is only
//! read once, when the store is opened.

mod repository;

use tracing::{info, warn};

use crate::account::{
    Account, ValidationError, is_gmail_address, is_six_digit_password, normalize_email,
    validate_login, validate_registration,
};
use crate::error::{Error, Result};

pub use repository::{PersistedState, StateRepository};

/// Account list plus session identity, backed by persistent storage.
///
/// The session is either anonymous or points at exactly one registered
/// account. Every operation validates its input fully before touching
/// state, so a returned error never leaves a partial mutation behind.
pub struct AccountStore {
    repository: StateRepository,
    accounts: Vec<Account>,
    /// Stored email of the signed-in account, as it appears on the record.
    current_email: Option<String>,
}

impl AccountStore {
    /// Open a store over the given repository, loading persisted state.
    ///
    /// A persisted session that no longer resolves to a registered account
    /// is discarded and the store starts anonymous.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial load fails.
    pub async fn open(repository: StateRepository) -> Result<Self> {
        let state = repository.load().await?;

        let current_email = state.session_email.filter(|email| {
            let normalized = normalize_email(email);
            let resolves = state.accounts.iter().any(|a| a.matches_email(&normalized));
            if !resolves {
                warn!("Persisted session does not match any account, starting signed out");
            }
            resolves
        });

        Ok(Self {
            repository,
            accounts: state.accounts,
            current_email,
        })
    }

    /// All registered accounts, in registration order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// The signed-in account, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&Account> {
        let normalized = normalize_email(self.current_email.as_deref()?);
        self.accounts.iter().find(|a| a.matches_email(&normalized))
    }

    /// Whether a session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Register a new account and sign it in.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if any field is blank after trimming, the
    ///   email is not a gmail.com address, or the password is not exactly
    ///   six digits.
    /// - [`Error::DuplicateAccount`] if the normalized email is taken.
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> Result<()> {
        let name = name.trim();
        let email = email.trim();
        let password = password.trim();

        validate_registration(name, email, password)?;

        let normalized = normalize_email(email);
        if self.accounts.iter().any(|a| a.matches_email(&normalized)) {
            return Err(Error::DuplicateAccount { email: normalized });
        }

        self.accounts.push(Account::new(name, email, password));
        self.repository.save_accounts(&self.accounts).await?;

        self.current_email = Some(email.to_string());
        self.repository.save_session(Some(email)).await?;

        info!(email = %normalized, "Registered new account");
        Ok(())
    }

    /// Sign in to an existing account.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the email or password fails its pattern.
    /// - [`Error::AccountNotFound`] if no account matches the normalized email.
    /// - [`Error::InvalidCredentials`] if the password does not match.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let email = email.trim();
        let password = password.trim();

        validate_login(email, password)?;

        let normalized = normalize_email(email);
        let account = self
            .accounts
            .iter()
            .find(|a| a.matches_email(&normalized))
            .ok_or_else(|| Error::AccountNotFound(normalized.clone()))?;

        if account.password != password {
            return Err(Error::InvalidCredentials);
        }

        // Session points at the email as stored on the record, not as typed.
        let stored_email = account.email.clone();
        self.current_email = Some(stored_email.clone());
        self.repository.save_session(Some(&stored_email)).await?;

        info!(email = %normalized, "Signed in");
        Ok(())
    }

    /// Sign out. A no-op when already anonymous.
    ///
    /// # Errors
    ///
    /// Returns an error if removing the persisted session fails.
    pub async fn logout(&mut self) -> Result<()> {
        self.current_email = None;
        self.repository.save_session(None).await?;

        info!("Signed out");
        Ok(())
    }

    /// Update the signed-in account's profile.
    ///
    /// The record is located by its previous normalized email, rewritten in
    /// place, and the session follows the new email. A `None` or blank
    /// password keeps the existing one.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthenticated`] without an active session.
    /// - [`Error::Validation`] on blank name/email, a non-gmail email, or a
    ///   supplied password that is not six digits.
    /// - [`Error::DuplicateAccount`] if the new email collides with another
    ///   account.
    pub async fn update_profile(
        &mut self,
        name: &str,
        email: &str,
        password: Option<&str>,
    ) -> Result<()> {
        let current = self.current_user().ok_or(Error::Unauthenticated)?;
        let previous_normalized = current.normalized_email();
        let previous_password = current.password.clone();

        let name = name.trim();
        let email = email.trim();

        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if email.is_empty() {
            return Err(ValidationError::EmptyEmail.into());
        }
        if !is_gmail_address(email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let next_password = match password.map(str::trim) {
            Some(p) if !p.is_empty() => {
                if !is_six_digit_password(p) {
                    return Err(ValidationError::InvalidPassword.into());
                }
                p.to_string()
            }
            _ => previous_password,
        };

        let next_normalized = normalize_email(email);
        if next_normalized != previous_normalized
            && self
                .accounts
                .iter()
                .any(|a| a.matches_email(&next_normalized))
        {
            return Err(Error::DuplicateAccount {
                email: next_normalized,
            });
        }

        if let Some(account) = self
            .accounts
            .iter_mut()
            .find(|a| a.matches_email(&previous_normalized))
        {
            account.name = name.to_string();
            account.email = email.to_string();
            account.password = next_password;
        }
        self.repository.save_accounts(&self.accounts).await?;

        self.current_email = Some(email.to_string());
        self.repository.save_session(Some(email)).await?;

        info!(email = %next_normalized, "Updated profile");
        Ok(())
    }
}
