// src/filter/compile.rs

//! Search filter compiler
//!
//! Splits the requested filters into predicates SQLite can evaluate on
//! indexed columns and the residual calorie condition, which lives inside
//! the nutrients text and is checked after retrieval.

use crate::db::FOLD_CASE_FN;
use crate::filter::expr::{self, Condition};
use rusqlite::types::Value;
use tracing::debug;

/// Raw search inputs, as received from the query string
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub total_time: Option<String>,
    pub rating: Option<String>,
    pub calories: Option<String>,
}

/// Numeric column that accepts a pushed-down comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    TotalTime,
    Rating,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::TotalTime => "total_time",
            Column::Rating => "rating",
        }
    }
}

/// A filter the database evaluates
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring of the title (needle already lowercased)
    TitleContains(String),
    /// Case-insensitive exact cuisine (already lowercased)
    CuisineEquals(String),
    /// Numeric comparison on a column
    Compare { column: Column, condition: Condition },
}

impl Predicate {
    /// SQL fragment with a single `?` placeholder, plus its bound value
    pub fn to_sql(&self) -> (String, Value) {
        match self {
            Predicate::TitleContains(needle) => (
                format!("{FOLD_CASE_FN}(title) LIKE ? ESCAPE '\\'"),
                Value::Text(format!("%{}%", escape_like(needle))),
            ),
            Predicate::CuisineEquals(cuisine) => (
                format!("{FOLD_CASE_FN}(cuisine) = ?"),
                Value::Text(cuisine.clone()),
            ),
            Predicate::Compare { column, condition } => (
                format!("{} {} ?", column.as_str(), condition.op.sql()),
                Value::Real(condition.value),
            ),
        }
    }
}

/// Result of compiling a [`SearchFilters`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledSearch {
    /// Conditions combined with AND in the storage query
    pub pushable: Vec<Predicate>,
    /// Calorie condition applied to retrieved rows
    pub residual: Option<Condition>,
}

impl CompiledSearch {
    /// WHERE clause (without the keyword) and its parameters, in order
    ///
    /// The clause is empty when nothing is pushable.
    pub fn where_clause(&self) -> (String, Vec<Value>) {
        let (fragments, bind): (Vec<String>, Vec<Value>) =
            self.pushable.iter().map(Predicate::to_sql).unzip();
        (fragments.join(" AND "), bind)
    }
}

/// Classify each requested filter as pushable or residual
pub fn compile(filters: &SearchFilters) -> CompiledSearch {
    let mut pushable = Vec::new();

    if let Some(title) = non_empty(filters.title.as_deref()) {
        pushable.push(Predicate::TitleContains(title.to_lowercase()));
    }

    if let Some(cuisine) = non_empty(filters.cuisine.as_deref()) {
        pushable.push(Predicate::CuisineEquals(cuisine.to_lowercase()));
    }

    for (column, raw) in [
        (Column::TotalTime, filters.total_time.as_deref()),
        (Column::Rating, filters.rating.as_deref()),
    ] {
        match expr::parse_opt(raw) {
            Some(condition) => pushable.push(Predicate::Compare { column, condition }),
            None if non_empty(raw).is_some() => {
                debug!("Ignoring unparseable {} filter: {:?}", column.as_str(), raw);
            }
            None => {}
        }
    }

    let residual = expr::parse_opt(filters.calories.as_deref());
    if residual.is_none() && non_empty(filters.calories.as_deref()).is_some() {
        debug!("Ignoring unparseable calories filter: {:?}", filters.calories);
    }

    CompiledSearch { pushable, residual }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Escape LIKE wildcards so user text matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
