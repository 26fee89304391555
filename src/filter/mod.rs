// src/filter/mod.rs

//! Search filters: expression parsing, pushdown compilation and the
//! residual calorie pass

pub mod compile;
pub mod expr;
pub mod residual;

pub use compile::{Column, CompiledSearch, Predicate, SearchFilters, compile};
pub use expr::{Condition, Operator, parse};
pub use residual::{CalorieFilter, extract_calories};
