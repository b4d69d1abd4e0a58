//! Words and values
//!
//! A `Word` is a program term: either a literal to push, or a name to resolve
//! and apply. A `Value` is what lives on the stack. Names are only ever program
//! terms, never stack values; the data counterpart of a name is a `Symbol`.
//!
//! # Interchange form
//!
//! Words serialize to a compact structured form (used by hosts that load
//! programs from JSON):
//!
//! - a number is a number literal: `42`
//! - `{"sym": "double"}` is a symbol literal
//! - an array is a quotation literal: `[1, "swap"]`
//! - a bare string is a name: `"dup"`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A single program term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Word {
    /// Resolve through the dictionary and apply
    Name(String),
    /// Push the carried value
    Literal(Value),
}

impl Word {
    /// Literal word pushing `value`
    pub fn lit(value: impl Into<Value>) -> Self {
        Word::Literal(value.into())
    }

    /// Name word referring to `name`
    pub fn name(name: impl Into<String>) -> Self {
        Word::Name(name.into())
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Word::Name(name) => Some(name),
            Word::Literal(_) => None,
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Word::Name(name) => write!(f, "{}", name),
            Word::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// Symbol: a name carried as data (e.g. the name operand of `def`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Symbol {
    #[serde(rename = "sym")]
    name: String,
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Quotation: an unevaluated sequence of words
///
/// The body is shared, so duplicating a quotation on the stack or binding it
/// in the dictionary never copies the words.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quotation(Arc<[Word]>);

impl Quotation {
    pub fn new(body: impl Into<Arc<[Word]>>) -> Self {
        Quotation(body.into())
    }

    pub fn body(&self) -> &[Word] {
        &self.0
    }
}

impl Deref for Quotation {
    type Target = [Word];

    fn deref(&self) -> &[Word] {
        &self.0
    }
}

impl From<Vec<Word>> for Quotation {
    fn from(body: Vec<Word>) -> Self {
        Quotation(body.into())
    }
}

impl FromIterator<Word> for Quotation {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Quotation(iter.into_iter().collect())
    }
}

/// Value: what the stack holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    // Untagged matching is ordered, and a struct also accepts a sequence,
    // so Quotation has to be tried before Symbol.
    Quotation(Quotation),
    Symbol(Symbol),
}

/// The shape of a value, used when reporting operand mismatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Number,
    Symbol,
    Quotation,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Number => "number",
            Shape::Symbol => "symbol",
            Shape::Quotation => "quotation",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    pub fn sym(name: impl Into<String>) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    pub fn quotation(body: impl Into<Quotation>) -> Self {
        Value::Quotation(body.into())
    }

    pub fn shape(&self) -> Shape {
        match self {
            Value::Number(_) => Shape::Number,
            Value::Symbol(_) => Shape::Symbol,
            Value::Quotation(_) => Shape::Quotation,
        }
    }

    /// True for values that can be applied (quotations), false for inert data
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Quotation(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_quotation(&self) -> Option<&Quotation> {
        match self {
            Value::Quotation(q) => Some(q),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<Quotation> for Value {
    fn from(q: Quotation) -> Self {
        Value::Quotation(q)
    }
}

impl From<Vec<Word>> for Value {
    fn from(body: Vec<Word>) -> Self {
        Value::Quotation(body.into())
    }
}

/// Format a number the way JavaScript's `Number.prototype.toString` does:
/// plain decimal for exponents in `-7 < e < 21`, otherwise `d.ddde+N`.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return f.write_str("0");
    }
    if n < 0.0 {
        f.write_str("-")?;
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.25e-7"
    let sci = format!("{:e}", n.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((&sci, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
    let k = digits.len() as i32;
    // Decimal point position relative to the start of `digits`
    let point = exponent + 1;

    if k <= point && point <= 21 {
        write!(f, "{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        write!(f, "{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        write!(f, "0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            write!(f, "{}e{}{}", lead, sign, exponent.abs())
        } else {
            write!(f, "{}.{}e{}{}", lead, rest, sign, exponent.abs())
        }
    }
}

/// Renders numbers as JavaScript would, quotations as an opaque `{...}` and
/// symbols with a leading backslash.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write_number(f, *n),
            Value::Symbol(s) => write!(f, "\\{}", s.name()),
            Value::Quotation(_) => f.write_str("{...}"),
        }
    }
}
