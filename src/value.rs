//! Cell values extracted from rows by column accessors.
//!
//! A [`CellValue`] is the only view of a row the default sort and filter
//! algorithms ever see. Hosts convert their field types into it through the
//! `From` impls below, which keeps accessors short:
//!
//! ```rust
//! use bubbletea_datagrid::CellValue;
//!
//! struct Runner { name: String, bib: Option<u32> }
//!
//! let runner = Runner { name: "Amy".into(), bib: None };
//! assert_eq!(CellValue::from(runner.name.as_str()), CellValue::Text("Amy".into()));
//! assert_eq!(CellValue::from(runner.bib), CellValue::Null);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A single extracted field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing value. Displays as an empty string and always sorts last.
    #[default]
    Null,
    /// Free text.
    Text(String),
    /// Integer number.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
}

impl CellValue {
    /// Returns `true` for [`CellValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            CellValue::Int(i) => Some(Number::Int(*i)),
            CellValue::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn cmp(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Int(a), Number::Float(b)) => (a as f64).total_cmp(&b),
            (Number::Float(a), Number::Int(b)) => a.total_cmp(&(b as f64)),
            (Number::Float(a), Number::Float(b)) => a.total_cmp(&b),
        }
    }
}

/// Compares two non-null values using the default ordering rules.
///
/// Text against text uses [`locale_compare`], numbers compare numerically
/// (integers and floats may be mixed), and any other pairing falls back to
/// comparing the displayed strings. Null handling and direction are the
/// caller's concern.
pub(crate) fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Text(a), CellValue::Text(b)) => locale_compare(a, b),
        _ => match (a.as_number(), b.as_number()) {
            (Some(a), Some(b)) => a.cmp(b),
            _ => locale_compare(&a.to_string(), &b.to_string()),
        },
    }
}

/// Case-insensitive, human-oriented string ordering.
///
/// Strings are ordered by their lowercase form first. When two strings only
/// differ by case, lowercase letters sort before uppercase ones, and any
/// remaining tie is broken by code point so the ordering stays total.
///
/// ```rust
/// use bubbletea_datagrid::value::locale_compare;
/// use std::cmp::Ordering;
///
/// assert_eq!(locale_compare("alice", "Bob"), Ordering::Less);
/// assert_eq!(locale_compare("amy", "Amy"), Ordering::Less);
/// assert_eq!(locale_compare("Zed", "zed"), Ordering::Greater);
/// ```
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if folded != Ordering::Equal {
        return folded;
    }

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        return match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => ca.cmp(&cb),
        };
    }
    a.cmp(b)
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<f32> for CellValue {
    fn from(value: f32) -> Self {
        CellValue::Float(f64::from(value))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellValue {
                fn from(value: $t) -> Self {
                    CellValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        i64::try_from(value)
            .map(CellValue::Int)
            .unwrap_or(CellValue::Float(value as f64))
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(CellValue::Int)
            .unwrap_or(CellValue::Float(value as f64))
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}
