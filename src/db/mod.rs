//! Database operations for journal entries.
//!
//! This module provides SQLite storage for journal entries using connection
//! pooling via r2d2, plus the `EntryStore` trait that the entry service
//! depends on. `Database` is the production implementation of that trait;
//! tests can substitute their own.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `entries`: Entry CRUD operations
//!
//! # Example
//!
//! ```no_run
//! use undertone::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/undertone.db"))?;
//! db.initialize_schema()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod entries;
pub mod schema;

use crate::errors::StoreError;
use crate::journal::JournalEntry;
use chrono::NaiveDate;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Storage interface for journal entries.
///
/// All methods are synchronous; SQLite operations here are short and the
/// pool hands out its own connections, so callers in async context invoke
/// them directly.
pub trait EntryStore: Send + Sync {
    /// Inserts a new entry. Fails if the id already exists.
    fn insert(&self, entry: &JournalEntry) -> Result<(), StoreError>;

    /// Fetches an entry by id, or `None` if it does not exist.
    fn get(&self, id: Uuid) -> Result<Option<JournalEntry>, StoreError>;

    /// Lists all entries, newest first by creation time.
    fn list(&self) -> Result<Vec<JournalEntry>, StoreError>;

    /// Overwrites an existing entry. Returns `false` if the id is unknown.
    fn update(&self, entry: &JournalEntry) -> Result<bool, StoreError>;

    /// Deletes an entry. Returns `false` if the id is unknown.
    fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Fetches entries dated on or after the cutoff, oldest first.
    fn entries_since(&self, cutoff: NaiveDate) -> Result<Vec<JournalEntry>, StoreError>;
}

/// Database handle with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates a SQLite database file.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database file cannot be opened or the
    /// connection pool cannot be initialized.
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        debug!("Opening database at: {:?}", db_path);

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(5) // Allow up to 5 concurrent connections
            .build(manager)?;

        // Fail now rather than on the first request
        let conn = pool.get()?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Opens an in-memory database.
    ///
    /// The pool is capped at a single connection: with
    /// `SqliteConnectionManager::memory()`, every pooled connection would
    /// otherwise get its own private, empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection pool cannot be initialized.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        debug!("Opening in-memory database");

        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;

        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> Result<PooledConnection, StoreError> {
        Ok(self.pool.get()?)
    }

    /// Initializes the database schema.
    ///
    /// Creates all necessary tables and indexes if they don't exist.
    /// This is idempotent and safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    pub fn initialize_schema(&self) -> Result<(), StoreError> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }
}

impl EntryStore for Database {
    fn insert(&self, entry: &JournalEntry) -> Result<(), StoreError> {
        let conn = self.get_conn()?;
        entries::insert_entry(&conn, entry)
    }

    fn get(&self, id: Uuid) -> Result<Option<JournalEntry>, StoreError> {
        let conn = self.get_conn()?;
        entries::get_entry(&conn, id)
    }

    fn list(&self) -> Result<Vec<JournalEntry>, StoreError> {
        let conn = self.get_conn()?;
        entries::list_entries(&conn)
    }

    fn update(&self, entry: &JournalEntry) -> Result<bool, StoreError> {
        let conn = self.get_conn()?;
        entries::update_entry(&conn, entry)
    }

    fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let conn = self.get_conn()?;
        entries::delete_entry(&conn, id)
    }

    fn entries_since(&self, cutoff: NaiveDate) -> Result<Vec<JournalEntry>, StoreError> {
        let conn = self.get_conn()?;
        entries::entries_since(&conn, cutoff)
    }
}
