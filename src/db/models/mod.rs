// src/db/models/mod.rs

//! Data models for the recipe store
//!
//! Structs mirror database rows and carry their own read/write queries.

mod recipe;

pub use recipe::Recipe;
