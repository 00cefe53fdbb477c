use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // Longest leading decimal literal, after the whitespace a browser number parser skips.
    static ref LEADING_FLOAT_REGEX: Regex = Regex::new(
        r"^[\t\n\x0B\x0C\r \u{A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}]*([+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?))"
    )
    .expect("leading float pattern is valid");
}

/// A single value in a report row.
///
/// Rows arrive as JSON objects, so a cell can hold anything JSON can. Arrays and
/// objects are not expected from the API and are kept as their JSON text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    pub fn is_number(&self) -> bool {
        matches!(self, Scalar::Number(_))
    }

    /// Text shown for this value in the table and used for width hints.
    ///
    /// Integral numbers print without a fraction (`30`, not `30.0`) and `null`
    /// prints as an empty string.
    pub fn display_text(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => format_number(n),
            Scalar::Text(s) => s.clone(),
        }
    }

    /// Loose numeric detection: a number, or anything whose text starts with a
    /// decimal literal. Empty text is never numeric.
    pub fn is_loosely_numeric(&self) -> bool {
        self.is_number() || parse_leading_float(&self.display_text()).is_some()
    }
}

impl From<serde_json::Value> for Scalar {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Scalar::Null,
            serde_json::Value::Bool(b) => Scalar::Bool(b),
            serde_json::Value::Number(n) => Scalar::Number(n),
            serde_json::Value::String(s) => Scalar::Text(s),
            other => Scalar::Text(other.to_string()),
        }
    }
}

impl From<Scalar> for serde_json::Value {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::Bool(b),
            Scalar::Number(n) => serde_json::Value::Number(n),
            Scalar::Text(s) => serde_json::Value::String(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        // Non-finite floats have no JSON form
        serde_json::Number::from_f64(value).map_or(Scalar::Null, Scalar::Number)
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.abs() >= 1e21 || f.abs() < 1e-6 => exponent_form(f),
        Some(f) if f.fract() == 0.0 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

// Shortest digits with a signed exponent: 1e+21, 1.5e-7
fn exponent_form(f: f64) -> String {
    let text = format!("{:e}", f);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

/// Parse the leading decimal literal of `text`, ignoring anything after it.
///
/// Returns `None` when the text does not start with a number, which covers the
/// empty string.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let caps = LEADING_FLOAT_REGEX.captures(text)?;
    let literal = caps.get(1)?.as_str();
    match literal {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => literal.parse::<f64>().ok(),
    }
}

/// One projected table cell: escaped at render time, tagged for alignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayCell {
    pub text: String,
    pub numeric: bool,
}

impl DisplayCell {
    pub fn empty() -> Self {
        DisplayCell {
            text: String::new(),
            numeric: false,
        }
    }

    pub fn from_value(value: Option<&Scalar>) -> Self {
        match value {
            Some(v) => DisplayCell {
                text: v.display_text(),
                numeric: v.is_loosely_numeric(),
            },
            None => DisplayCell::empty(),
        }
    }
}
