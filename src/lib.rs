// src/lib.rs

//! Cookbook recipe API
//!
//! Read-only listing and search over a recipe dataset kept in SQLite.
//!
//! # Architecture
//!
//! - Row store: one `US_recipes` table, opened per request
//! - Search is a two-stage predicate compiler: title, cuisine, total time and
//!   rating become one parameterized SQL query; the calorie condition, which
//!   lives inside the JSON nutrients text, is applied to the retrieved rows
//! - Bad user input never fails a request; it just removes that constraint
//! - Data enters only through the offline bulk loader

pub mod db;
mod error;
pub mod filter;
pub mod loader;
pub mod nutrients;
pub mod query;
pub mod record;

#[cfg(feature = "server")]
pub mod server;

pub use error::{Error, Result};
pub use filter::{CompiledSearch, Condition, Operator, SearchFilters};
pub use nutrients::Nutrients;
pub use query::{Page, list, search};
pub use record::RecipeRecord;
