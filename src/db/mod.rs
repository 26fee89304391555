// src/db/mod.rs

//! Database layer for the recipe store
//!
//! A single SQLite file holds the `US_recipes` table. Callers pass the
//! database path around explicitly; every operation opens its own
//! connection and drops it when done.

pub mod models;
pub mod schema;

use crate::error::{Error, Result};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Transaction};
use std::path::Path;
use tracing::{debug, info};

/// Default database file, relative to the working directory
pub const DEFAULT_DB_PATH: &str = "US_recipes.db";

/// SQL function folding text with full Unicode lowercasing
///
/// SQLite's built-in `LOWER()` only folds ASCII.
pub const FOLD_CASE_FN: &str = "fold_case";

/// Create the database file (and parent directory) and ensure the schema exists
pub fn init(db_path: impl AsRef<Path>) -> Result<()> {
    let path = db_path.as_ref();

    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    schema::create(&conn)?;

    info!("Database initialized at {}", path.display());
    Ok(())
}

/// Open an existing database
pub fn open(db_path: impl AsRef<Path>) -> Result<Connection> {
    let path = db_path.as_ref();
    if !path.exists() {
        return Err(Error::InitError(format!(
            "Database not found at {}; run `cookbook init` first",
            path.display()
        )));
    }

    debug!("Opening database {}", path.display());
    let conn = Connection::open(path)?;
    register_functions(&conn)?;
    Ok(conn)
}

/// Register the crate's SQL functions on a connection
///
/// `fold_case(x)` lowercases text and passes NULL through; other value
/// types fold to NULL.
pub fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        FOLD_CASE_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| match ctx.get_raw(0) {
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .map(|text| Some(text.to_lowercase()))
                .map_err(|e| rusqlite::Error::UserFunctionError(Box::new(e))),
            _ => Ok(None),
        },
    )?;
    Ok(())
}

/// Run `f` inside a transaction, committing on `Ok` and rolling back on `Err`
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Transaction) -> Result<T>,
{
    let tx = conn.transaction()?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}
