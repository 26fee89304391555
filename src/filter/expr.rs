// src/filter/expr.rs

//! Comparison expressions from query parameters
//!
//! Users write numeric filters as `">=4.5"`, `"<30"` or just `"120"`. An
//! expression that does not fit that shape is not an error; it simply means
//! "do not filter on this field".

use std::fmt;
use std::str::FromStr;

/// Numeric comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Operator tokens recognized by [`parse`], longest first so `<=` wins over `<`
const PREFIXES: [&str; 5] = ["<=", ">=", "==", "<", ">"];

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
        }
    }

    /// SQL comparison token
    pub fn sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "<>",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
        }
    }

    /// Evaluate `lhs <op> rhs` with IEEE-754 semantics
    pub fn apply(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Operator::Eq => lhs == rhs,
            Operator::Ne => lhs != rhs,
            Operator::Lt => lhs < rhs,
            Operator::Le => lhs <= rhs,
            Operator::Gt => lhs > rhs,
            Operator::Ge => lhs >= rhs,
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Ge),
            _ => Err(format!("Invalid comparison operator: {s}")),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed filter condition: compare a field against `value` using `op`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condition {
    pub op: Operator,
    pub value: f64,
}

impl Condition {
    pub fn new(op: Operator, value: f64) -> Self {
        Self { op, value }
    }

    /// Whether `actual` satisfies this condition
    pub fn matches(&self, actual: f64) -> bool {
        self.op.apply(actual, self.value)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.value)
    }
}

/// Parse `"<op><numeral>"` or a bare numeral
///
/// Returns `None` for empty input and for anything that is not an optional
/// operator from `<=`, `>=`, `==`, `<`, `>` directly followed by a decimal
/// numeral (digits with at most one `.`).
pub fn parse(expr: &str) -> Option<Condition> {
    let expr = expr.trim();
    if expr.is_empty() {
        return None;
    }

    let prefixed = PREFIXES
        .iter()
        .find_map(|token| expr.strip_prefix(token).map(|rest| (*token, rest)));

    let (op, numeral) = match prefixed {
        Some((token, rest)) => (token.parse::<Operator>().ok()?, rest),
        None => (Operator::Eq, expr),
    };

    if !is_numeral(numeral) {
        return None;
    }

    numeral.parse::<f64>().ok().map(|value| Condition::new(op, value))
}

/// [`parse`] for an optional query parameter
pub fn parse_opt(expr: Option<&str>) -> Option<Condition> {
    expr.and_then(parse)
}

/// ASCII digits with at most one `.` and at least one digit
fn is_numeral(s: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;

    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }

    digits > 0 && dots <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_prefix() {
        let cases = [
            ("<=400", Operator::Le, 400.0),
            (">=4.5", Operator::Ge, 4.5),
            ("==120", Operator::Eq, 120.0),
            ("<30", Operator::Lt, 30.0),
            (">3", Operator::Gt, 3.0),
        ];

        for (input, op, value) in cases {
            assert_eq!(parse(input), Some(Condition::new(op, value)), "input: {input}");
        }
    }

    #[test]
    fn test_parse_bare_numeral_defaults_to_eq() {
        assert_eq!(parse("120"), Some(Condition::new(Operator::Eq, 120.0)));
        assert_eq!(parse("4.5"), Some(Condition::new(Operator::Eq, 4.5)));
        assert_eq!(parse(".5"), Some(Condition::new(Operator::Eq, 0.5)));
        assert_eq!(parse("5."), Some(Condition::new(Operator::Eq, 5.0)));
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        assert_eq!(parse("  >=4.5 "), Some(Condition::new(Operator::Ge, 4.5)));
        assert_eq!(parse("\t30\n"), Some(Condition::new(Operator::Eq, 30.0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in [
            "", "   ", "abc", ">", "<=", "> 5", "=5", "!=5", "=>5", "<<5", "1.2.3", ".", "-3",
            "+3", "1e3", "inf", "NaN", "5kcal", ">=4.5x",
        ] {
            assert_eq!(parse(input), None, "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_opt() {
        assert_eq!(parse_opt(None), None);
        assert_eq!(parse_opt(Some("")), None);
        assert_eq!(parse_opt(Some("<30")), Some(Condition::new(Operator::Lt, 30.0)));
    }

    #[test]
    fn test_operator_from_str_roundtrips_as_str() {
        for op in [
            Operator::Eq,
            Operator::Ne,
            Operator::Lt,
            Operator::Le,
            Operator::Gt,
            Operator::Ge,
        ] {
            assert_eq!(op.as_str().parse::<Operator>(), Ok(op));
        }
        assert!("=".parse::<Operator>().is_err());
    }

    #[test]
    fn test_operator_apply() {
        assert!(Operator::Eq.apply(400.0, 400.0));
        assert!(Operator::Ne.apply(399.0, 400.0));
        assert!(Operator::Lt.apply(399.9, 400.0));
        assert!(!Operator::Lt.apply(400.0, 400.0));
        assert!(Operator::Le.apply(400.0, 400.0));
        assert!(Operator::Gt.apply(400.1, 400.0));
        assert!(Operator::Ge.apply(400.0, 400.0));
        assert!(!Operator::Ge.apply(f64::NAN, 400.0));
    }

    #[test]
    fn test_condition_display() {
        assert_eq!(Condition::new(Operator::Ge, 4.5).to_string(), ">=4.5");
        assert_eq!(Condition::new(Operator::Lt, 30.0).to_string(), "<30");
    }
}
