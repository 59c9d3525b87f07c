//! `account-manager` - local-first account management CLI.
//!
//! A thin front end over [`account_manager_core`]: one subcommand per store
//! operation, with all state kept in a database file under the platform
//! data directory.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_manager_core::{Account, AccountStore, StateRepository};

/// Command-line interface definition.
#[derive(Parser)]
#[command(name = "account-manager", version, about)]
struct Cli {
    /// Override the database file location.
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// One subcommand per account store operation, plus read-only views.
#[derive(Subcommand)]
enum Command {
    /// Create a new account and sign it in.
    Register {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Email address (gmail.com only).
        #[arg(long)]
        email: String,
        /// Six-digit password.
        #[arg(long)]
        password: String,
    },
    /// Sign in to an existing account.
    Login {
        /// Email address.
        email: String,
        /// Six-digit password.
        password: String,
    },
    /// Sign out of the current session.
    Logout,
    /// Edit the signed-in account's profile.
    Update {
        /// New display name (defaults to the current one).
        #[arg(long)]
        name: Option<String>,
        /// New email address (defaults to the current one).
        #[arg(long)]
        email: Option<String>,
        /// New six-digit password (omit to keep the current one).
        #[arg(long)]
        password: Option<String>,
    },
    /// Show the signed-in account.
    Whoami,
    /// List all registered accounts.
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_manager=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let database = match cli.database {
        Some(path) => path,
        None => default_database_path()?,
    };
    if let Some(parent) = database.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory {}", parent.display()))?;
    }
    info!(database = %database.display(), "Opening account store");

    let repository = StateRepository::new(&database.to_string_lossy())
        .await
        .context("opening the account database")?;
    let mut store = AccountStore::open(repository)
        .await
        .context("loading persisted state")?;

    match cli.command {
        Command::Register {
            name,
            email,
            password,
        } => {
            store.register(&name, &email, &password).await?;
            println!("Registered and signed in as {}.", email.trim());
        }
        Command::Login { email, password } => {
            store.login(&email, &password).await?;
            if let Some(user) = store.current_user() {
                println!("Signed in as {} <{}>.", user.name, user.email);
            }
        }
        Command::Logout => {
            store.logout().await?;
            println!("Signed out.");
        }
        Command::Update {
            name,
            email,
            password,
        } => {
            let current = store
                .current_user()
                .context("not signed in; use `login` first")?;
            let name = name.unwrap_or_else(|| current.name.clone());
            let email = email.unwrap_or_else(|| current.email.clone());
            store
                .update_profile(&name, &email, password.as_deref())
                .await?;
            println!("Profile updated.");
        }
        Command::Whoami => match store.current_user() {
            Some(user) => print_account(user),
            None => println!("Not signed in."),
        },
        Command::List => {
            if store.accounts().is_empty() {
                println!("No accounts registered.");
            }
            for account in store.accounts() {
                println!("{} <{}>", account.name, account.email);
            }
        }
    }

    Ok(())
}

/// Print one account's profile fields.
fn print_account(account: &Account) {
    println!("Name:  {}", account.name);
    println!("Email: {}", account.email);
}

/// Database file under the platform data directory.
fn default_database_path() -> Result<PathBuf> {
    let base = dirs::data_dir().context("could not determine the platform data directory")?;
    Ok(base.join("account-manager").join("accounts.db"))
}
