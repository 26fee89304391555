// src/filter/residual.rs

//! Post-retrieval calorie filter
//!
//! Calories are free text inside the nutrients blob (`"389 kcal"`), so they
//! cannot be compared in SQL. The first numeral in the text is taken as the
//! calorie value.

use crate::filter::expr::Condition;
use crate::nutrients::Nutrients;
use regex::Regex;
use std::sync::LazyLock;

/// Nutrients key holding the calorie text
pub const CALORIES_KEY: &str = "calories";

static NUMERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]*)?|\.[0-9]+").expect("numeral regex is valid"));

/// First decimal numeral in `text`
pub fn first_numeral(text: &str) -> Option<f64> {
    NUMERAL_RE
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Calorie value of a recipe, if its nutrients carry a readable one
pub fn extract_calories(nutrients: &Nutrients) -> Option<f64> {
    let text = nutrients.text(CALORIES_KEY)?;
    first_numeral(&text)
}

/// Residual calorie condition applied to retrieved rows
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CalorieFilter {
    condition: Option<Condition>,
}

impl CalorieFilter {
    pub fn new(condition: Option<Condition>) -> Self {
        Self { condition }
    }

    pub fn is_active(&self) -> bool {
        self.condition.is_some()
    }

    /// Whether a row with these nutrients survives the filter
    ///
    /// Without a condition every row passes. With one, rows whose calories
    /// cannot be read are excluded.
    pub fn matches(&self, nutrients: &Nutrients) -> bool {
        let Some(condition) = self.condition else {
            return true;
        };

        match extract_calories(nutrients) {
            Some(calories) => condition.matches(calories),
            None => false,
        }
    }
}
