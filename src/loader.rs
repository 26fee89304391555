// src/loader.rs

//! Bulk loader for the recipe dataset
//!
//! Offline maintenance operation: reads a JSON export, normalizes numeric
//! attributes and replaces the whole store in one transaction. It must not
//! run concurrently with itself.

use crate::db;
use crate::db::models::Recipe;
use crate::error::{Error, Result};
use crate::nutrients::Nutrients;
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, info, warn};

/// Top-level keys that may wrap the item array
const WRAPPER_KEYS: [&str; 2] = ["US_recipes", "items"];

/// Non-finite literals emitted by pandas and Python's `json`
const NON_FINITE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// One recipe item from the source dataset, before normalization
///
/// Every attribute is optional and kept as raw JSON so that numbers,
/// numeral strings and `"NaN"` markers can all be accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecipe {
    pub cuisine: Value,
    pub title: Value,
    pub rating: Value,
    pub prep_time: Value,
    pub cook_time: Value,
    pub total_time: Value,
    pub description: Value,
    pub nutrients: Value,
    pub serves: Value,
}

impl RawRecipe {
    /// Normalize into a row ready for insertion
    pub fn to_recipe(&self) -> Recipe {
        Recipe {
            id: None,
            cuisine: text_value(&self.cuisine),
            title: text_value(&self.title),
            rating: normalize_number(&self.rating),
            prep_time: normalize_minutes(&self.prep_time),
            cook_time: normalize_minutes(&self.cook_time),
            total_time: normalize_minutes(&self.total_time),
            description: text_value(&self.description),
            nutrients: Some(Nutrients::from_value(self.nutrients.clone()).encode()),
            serves: text_value(&self.serves),
        }
    }
}

/// Numeric value of a loosely typed attribute
///
/// Numbers pass through unless non-finite. Strings are trimmed; blank and
/// `NaN` strings have no value, strings containing `.` parse as decimals and
/// the rest as integers. Everything else has no value.
pub fn normalize_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                return None;
            }
            let parsed = if s.contains('.') {
                s.parse::<f64>().ok()
            } else {
                s.parse::<i64>().ok().map(|i| i as f64)
            };
            parsed.filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Whole minutes for the integer time columns, rounded to nearest
fn normalize_minutes(value: &Value) -> Option<i64> {
    normalize_number(value).map(|minutes| minutes.round() as i64)
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Parse a dataset export into raw items
///
/// Accepts a top-level array, an object keyed by item number, or an object
/// wrapping the array under `US_recipes` or `items`.
pub fn parse_dataset(text: &str) -> Result<Vec<RawRecipe>> {
    let text = replace_non_finite_literals(text);
    let data: Value = serde_json::from_str(&text)?;

    let items = match data {
        Value::Array(items) => items,
        Value::Object(map) if map.keys().all(|k| is_item_number(k)) => numbered_items(map),
        Value::Object(mut map) => WRAPPER_KEYS
            .iter()
            .filter_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) if !items.is_empty() => Some(items),
                _ => None,
            })
            .next()
            .unwrap_or_default(),
        _ => {
            return Err(Error::ParseError(
                "Dataset must be a JSON array or object".to_string(),
            ));
        }
    };

    let mut recipes = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!("Skipping dataset item {}: not an object", index);
            continue;
        }
        recipes.push(serde_json::from_value(item)?);
    }

    Ok(recipes)
}

fn is_item_number(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Values of a digit-keyed object, in numeric key order
fn numbered_items(map: Map<String, Value>) -> Vec<Value> {
    let mut entries: Vec<(String, Value)> = map.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| compare_numeric_keys(a, b));
    entries.into_iter().map(|(_, value)| value).collect()
}

fn compare_numeric_keys(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Rewrite bare `NaN` / `Infinity` / `-Infinity` outside string literals to
/// `null` so that strict JSON parsing accepts pandas-style exports
fn replace_non_finite_literals(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut output: Option<String> = None;
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if b == b'"' {
            in_string = true;
            i += 1;
            continue;
        }

        if let Some(token) = NON_FINITE_TOKENS
            .iter()
            .find(|token| bytes[i..].starts_with(token.as_bytes()))
        {
            let buf = output.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(&text[copied..i]);
            buf.push_str("null");
            i += token.len();
            copied = i;
            continue;
        }

        i += 1;
    }

    match output {
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

/// Replace the store contents with `items`, returning how many were loaded
///
/// Existing rows are deleted and the new ones inserted in one transaction,
/// so reloading the same dataset never duplicates rows.
pub fn replace_all(conn: &mut Connection, items: &[RawRecipe]) -> Result<usize> {
    if items.is_empty() {
        warn!("No recipe items found in dataset; store will be empty");
    }

    db::transaction(conn, |tx| {
        let removed = Recipe::delete_all(tx)?;
        debug!("Cleared {} existing recipes", removed);

        for item in items {
            item.to_recipe().insert(tx)?;
        }

        Ok(items.len())
    })
}

/// Load a dataset file into the database at `db_path`, creating it if needed
pub fn load_file(db_path: &str, json_path: &Path) -> Result<usize> {
    info!("Loading recipes from {}", json_path.display());

    db::init(db_path)?;
    let text = std::fs::read_to_string(json_path)?;
    let items = parse_dataset(&text)?;

    let mut conn = db::open(db_path)?;
    let loaded = replace_all(&mut conn, &items)?;

    info!("Database seeded with {} recipes", loaded);
    Ok(loaded)
}
