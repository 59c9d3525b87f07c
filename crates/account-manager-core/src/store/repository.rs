//! Persistent state storage.
//!
//! Accounts and session live under two string keys in a `SQLite`-backed
//! key/value table. Each write replaces the whole value for its key; the
//! store never updates storage incrementally.

use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, warn};

use crate::Result;
use crate::account::Account;

/// Storage key holding the serialized account list.
const ACCOUNTS_KEY: &str = "account_manager:accounts";

/// Storage key holding the serialized session email.
const SESSION_KEY: &str = "account_manager:current_user_email";

/// State loaded from storage at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    /// All registered accounts.
    pub accounts: Vec<Account>,
    /// Email of the session persisted by the last run, if any.
    pub session_email: Option<String>,
}

/// Repository for persisted account-manager state.
///
/// Cloning is cheap (a pool handle) and clones share the same database,
/// which lets tests reopen a store over one in-memory database.
#[derive(Clone)]
pub struct StateRepository {
    pool: SqlitePool,
}

impl StateRepository {
    /// Create a new repository with the given database path.
    ///
    /// Creates the database and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Create an in-memory repository for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Load accounts and session from storage.
    ///
    /// Absent or malformed values degrade to an empty account list and no
    /// session rather than failing startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load(&self) -> Result<PersistedState> {
        let accounts = match self.get(ACCOUNTS_KEY).await? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(accounts) => accounts,
                Err(e) => {
                    warn!("Stored account list is malformed, starting empty: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let session_email = match self.get(SESSION_KEY).await? {
            Some(raw) => match serde_json::from_str::<String>(&raw) {
                Ok(email) if !email.is_empty() => Some(email),
                Ok(_) => None,
                Err(e) => {
                    warn!("Stored session is malformed, starting signed out: {e}");
                    None
                }
            },
            None => None,
        };

        debug!(
            accounts = accounts.len(),
            has_session = session_email.is_some(),
            "Loaded persisted state"
        );

        Ok(PersistedState {
            accounts,
            session_email,
        })
    }

    /// Overwrite the stored account list.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database query fails.
    pub async fn save_accounts(&self, accounts: &[Account]) -> Result<()> {
        let raw = serde_json::to_string(accounts)?;
        self.put(ACCOUNTS_KEY, &raw).await?;
        debug!(accounts = accounts.len(), "Persisted account list");
        Ok(())
    }

    /// Overwrite the stored session email, or remove the entry entirely
    /// when signing out.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database query fails.
    pub async fn save_session(&self, email: Option<&str>) -> Result<()> {
        match email {
            Some(email) => {
                let raw = serde_json::to_string(email)?;
                self.put(SESSION_KEY, &raw).await?;
                debug!("Persisted session");
            }
            None => {
                self.delete(SESSION_KEY).await?;
                debug!("Removed persisted session");
            }
        }
        Ok(())
    }

    /// Get the raw value stored under a key.
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get("value")))
    }

    /// Insert or replace the value stored under a key.
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO kv (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a key, if present.
    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
