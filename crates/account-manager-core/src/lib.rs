//! # account-manager-core
//!
//! Core business logic for the `account-manager` demo application.
//!
//! This crate provides:
//! - The account model and its validation rules
//! - The [`AccountStore`], which owns the account list and the active session
//! - Local persistence (`SQLite`-backed key/value state)
//!
//! All registered accounts live in memory inside the store; storage is
//! rewritten wholesale on every mutation and read once at startup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
mod error;
pub mod store;

pub use account::{Account, ValidationError, normalize_email};
pub use error::{Error, Result};
pub use store::{AccountStore, StateRepository};
