//! Vimscript values and their conversions.
//!
//! [`VimValue`] is the evaluator's only data type. Conversions follow Vim's
//! rules: a String used as a Number is read like a numeric literal
//! (`"0x1F"` is 31, `"12abc"` is 12, `"abc"` is 0), and the container types
//! refuse to become Numbers or Strings with a specific error each.

use std::fmt::Write as _;

use crate::error::ScriptError;

/// A Vimscript value.
#[derive(Debug, Clone, PartialEq)]
pub enum VimValue {
    Number(i64),
    Float(f64),
    String(String),
    List(Vec<VimValue>),
    Dict(Dictionary),
    /// A reference to a builtin function, by name.
    Funcref(String),
    Blob(Vec<u8>),
}

/// Dictionary with string keys kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: Vec<(String, VimValue)>,
}

impl Dictionary {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&VimValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Insert or replace. A replaced key keeps its position.
    pub fn insert(&mut self, key: String, value: VimValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<VimValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VimValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, VimValue)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (String, VimValue)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}

// ---------------------------------------------------------------------------
// Type numbers
// ---------------------------------------------------------------------------

/// `type()` results (`v:t_number` and friends).
pub mod type_id {
    pub const NUMBER: i64 = 0;
    pub const STRING: i64 = 1;
    pub const FUNC: i64 = 2;
    pub const LIST: i64 = 3;
    pub const DICT: i64 = 4;
    pub const FLOAT: i64 = 5;
    pub const BLOB: i64 = 10;
}

impl VimValue {
    /// Shorthand for a String value.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::String(text.into())
    }

    /// Number for a boolean (1 or 0).
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        Self::Number(value as i64)
    }

    /// `type()` of this value.
    #[must_use]
    pub const fn type_number(&self) -> i64 {
        match self {
            Self::Number(_) => type_id::NUMBER,
            Self::String(_) => type_id::STRING,
            Self::Funcref(_) => type_id::FUNC,
            Self::List(_) => type_id::LIST,
            Self::Dict(_) => type_id::DICT,
            Self::Float(_) => type_id::FLOAT,
            Self::Blob(_) => type_id::BLOB,
        }
    }

    /// Value in a Number context where a Float is still accepted
    /// (arithmetic operands before promotion).
    ///
    /// # Errors
    ///
    /// E745, E728, E703, E974 for the container types and Funcrefs.
    pub fn to_number(&self) -> Result<i64, ScriptError> {
        match self {
            Self::Number(n) => Ok(*n),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) => Ok(float_to_number(*f)),
            Self::String(s) => Ok(string_to_number(s)),
            Self::List(_) => Err(ScriptError::ListAsNumber),
            Self::Dict(_) => Err(ScriptError::DictAsNumber),
            Self::Funcref(_) => Err(ScriptError::FuncrefAsNumber),
            Self::Blob(_) => Err(ScriptError::BlobAsNumber),
        }
    }

    /// Value in an integer-only context: bitwise functions, indexes, and
    /// boolean tests. A Float fails here.
    ///
    /// # Errors
    ///
    /// E805 for a Float, otherwise as [`to_number`](Self::to_number).
    pub fn to_integer(&self) -> Result<i64, ScriptError> {
        match self {
            Self::Float(_) => Err(ScriptError::FloatAsNumber),
            other => other.to_number(),
        }
    }

    /// Truth value for `&&`, `||`, `?:`, and `!`.
    ///
    /// # Errors
    ///
    /// As [`to_integer`](Self::to_integer).
    pub fn to_bool(&self) -> Result<bool, ScriptError> {
        Ok(self.to_integer()? != 0)
    }

    /// Float value for arithmetic promotion.
    ///
    /// # Errors
    ///
    /// As [`to_number`](Self::to_number).
    #[allow(clippy::cast_precision_loss)]
    pub fn to_float(&self) -> Result<f64, ScriptError> {
        match self {
            Self::Float(f) => Ok(*f),
            other => Ok(other.to_number()? as f64),
        }
    }

    /// Value as a String operand of `.` / `..`, a regex, or a dictionary
    /// key.
    ///
    /// # Errors
    ///
    /// E806, E730, E731, E729, E976 for values with no string form.
    pub fn to_str(&self) -> Result<String, ScriptError> {
        match self {
            Self::Number(n) => Ok(n.to_string()),
            Self::String(s) => Ok(s.clone()),
            Self::Float(_) => Err(ScriptError::FloatAsString),
            Self::List(_) => Err(ScriptError::ListAsString),
            Self::Dict(_) => Err(ScriptError::DictAsString),
            Self::Funcref(_) => Err(ScriptError::FuncrefAsString),
            Self::Blob(_) => Err(ScriptError::BlobAsString),
        }
    }

    /// Text `:echo` prints: strings bare, everything else as
    /// [`repr`](Self::repr).
    #[must_use]
    pub fn echo_text(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Funcref(name) => name.clone(),
            other => other.repr(),
        }
    }

    /// `string()`: the form that reads back as the same value.
    #[must_use]
    pub fn repr(&self) -> String {
        let mut out = String::new();
        self.write_repr(&mut out);
        out
    }

    fn write_repr(&self, out: &mut String) {
        match self {
            Self::Number(n) => {
                let _ = write!(out, "{n}");
            }
            Self::Float(f) => out.push_str(&format_float(*f)),
            Self::String(s) => {
                out.push('\'');
                out.push_str(&s.replace('\'', "''"));
                out.push('\'');
            }
            Self::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_repr(out);
                }
                out.push(']');
            }
            Self::Dict(dict) => {
                out.push('{');
                for (i, (key, value)) in dict.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    Self::String(key.to_string()).write_repr(out);
                    out.push_str(": ");
                    value.write_repr(out);
                }
                out.push('}');
            }
            Self::Funcref(name) => {
                let _ = write!(out, "function('{name}')");
            }
            Self::Blob(bytes) => {
                out.push_str("0z");
                for byte in bytes {
                    let _ = write!(out, "{byte:02X}");
                }
            }
        }
    }

    /// `empty()`.
    #[must_use]
    pub fn is_empty_value(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0,
            Self::Float(f) => *f == 0.0,
            Self::String(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Dict(dict) => dict.is_empty(),
            Self::Funcref(name) => name.is_empty(),
            Self::Blob(bytes) => bytes.is_empty(),
        }
    }
}

impl From<i64> for VimValue {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for VimValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for VimValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Float truncated toward zero, saturating at the i64 range (`float2nr()`).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn float_to_number(f: f64) -> i64 {
    if f.is_nan() {
        0
    } else {
        // `as` saturates for out-of-range floats.
        f.trunc() as i64
    }
}

/// Read a String as a Number the way Vim does: optional sign, then a
/// decimal, `0x` hex, `0b` binary, `0o` or leading-zero octal literal.
/// Parsing stops at the first char that does not fit; no digits gives 0.
#[must_use]
pub fn string_to_number(text: &str) -> i64 {
    let s = text.trim_start();
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let value = parse_unsigned(body, None);
    if negative { value.wrapping_neg() } else { value }
}

/// `str2nr()`: like [`string_to_number`] with an explicit base (2, 8, 10,
/// or 16). The base's own prefix is allowed; other prefixes stop parsing.
#[must_use]
pub fn str2nr(text: &str, base: u32) -> i64 {
    let s = text.trim_start();
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let value = parse_unsigned(body, Some(base));
    if negative { value.wrapping_neg() } else { value }
}

fn parse_unsigned(body: &str, base: Option<u32>) -> i64 {
    let lower = body.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits) = match (lower.as_deref(), base) {
        (Some("0x"), None | Some(16)) => (16, &body[2..]),
        (Some("0b"), None | Some(2)) => (2, &body[2..]),
        (Some("0o"), None | Some(8)) => (8, &body[2..]),
        (_, Some(base)) => (base, body),
        (_, None) => {
            let run: &str = &body[..body.bytes().take_while(u8::is_ascii_digit).count()];
            if run.len() > 1 && run.starts_with('0') && run.bytes().all(|b| b < b'8') {
                (8, body)
            } else {
                (10, body)
            }
        }
    };
    let mut value: i64 = 0;
    for ch in digits.chars() {
        let Some(d) = ch.to_digit(radix) else { break };
        value = value.saturating_mul(i64::from(radix)).saturating_add(i64::from(d));
    }
    value
}

/// Format a Float as `:echo` shows it: `%g` with six significant digits,
/// always with a decimal point (`1.0`, `0.333333`, `1.0e20`).
#[must_use]
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{f:.5e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-4..6).contains(&exp) {
        return format!("{}e{exp}", with_point(trim_zeros(mantissa)));
    }
    let decimals = usize::try_from(5 - exp).unwrap_or(0);
    with_point(trim_zeros(&format!("{f:.decimals$}")))
}

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn with_point(text: &str) -> String {
    if text.contains('.') {
        text.to_string()
    } else {
        format!("{text}.0")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -- String to Number ---------------------------------------------------

    #[test]
    fn strings_read_as_literals() {
        assert_eq!(string_to_number("35"), 35);
        assert_eq!(string_to_number("0xFF"), 255);
        assert_eq!(string_to_number("0b101"), 5);
        assert_eq!(string_to_number("017"), 15);
        assert_eq!(string_to_number("019"), 19);
        assert_eq!(string_to_number("0o17"), 15);
        assert_eq!(string_to_number("-12abc"), -12);
        assert_eq!(string_to_number("  +7"), 7);
        assert_eq!(string_to_number("abc"), 0);
        assert_eq!(string_to_number(""), 0);
    }

    #[test]
    fn str2nr_with_base() {
        assert_eq!(str2nr("ff", 16), 255);
        assert_eq!(str2nr("0xff", 16), 255);
        assert_eq!(str2nr("0xff", 10), 0);
        assert_eq!(str2nr("777", 8), 511);
        assert_eq!(str2nr("-11", 2), -3);
    }

    // -- Conversions --------------------------------------------------------

    #[test]
    fn containers_refuse_number_context() {
        assert_eq!(VimValue::List(vec![]).to_number(), Err(ScriptError::ListAsNumber));
        assert_eq!(VimValue::Dict(Dictionary::new()).to_number(), Err(ScriptError::DictAsNumber));
        assert_eq!(VimValue::Funcref("abs".into()).to_number(), Err(ScriptError::FuncrefAsNumber));
        assert_eq!(VimValue::Blob(vec![]).to_number(), Err(ScriptError::BlobAsNumber));
        assert_eq!(VimValue::Float(1.5).to_integer(), Err(ScriptError::FloatAsNumber));
        assert_eq!(VimValue::Float(1.5).to_number(), Ok(1));
    }

    #[test]
    fn string_context() {
        assert_eq!(VimValue::Number(-4).to_str(), Ok("-4".to_string()));
        assert_eq!(VimValue::Float(1.0).to_str(), Err(ScriptError::FloatAsString));
        assert_eq!(VimValue::List(vec![]).to_str(), Err(ScriptError::ListAsString));
        assert_eq!(VimValue::Dict(Dictionary::new()).to_str(), Err(ScriptError::DictAsString));
        assert_eq!(VimValue::Funcref("f".into()).to_str(), Err(ScriptError::FuncrefAsString));
    }

    // -- Rendering ----------------------------------------------------------

    #[test]
    fn floats_format_like_percent_g() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(1.5), "1.5");
        assert_eq!(format_float(1.0 / 3.0), "0.333333");
        assert_eq!(format_float(1000.0), "1000.0");
        assert_eq!(format_float(1e20), "1.0e20");
        assert_eq!(format_float(1.5e-5), "1.5e-5");
        assert_eq!(format_float(-2.25), "-2.25");
        assert_eq!(format_float(123_456_789.0), "1.23457e8");
    }

    #[test]
    fn repr_nests() {
        let dict: Dictionary = [
            ("a".to_string(), VimValue::Number(1)),
            ("b".to_string(), VimValue::List(vec![VimValue::string("it's"), VimValue::Float(2.0)])),
        ]
        .into_iter()
        .collect();
        assert_eq!(VimValue::Dict(dict).repr(), "{'a': 1, 'b': ['it''s', 2.0]}");
        assert_eq!(VimValue::Blob(vec![0xff, 0]).repr(), "0zFF00");
        assert_eq!(VimValue::string("x").echo_text(), "x");
    }

    #[test]
    fn dictionary_keeps_insertion_order() {
        let mut dict = Dictionary::new();
        dict.insert("z".into(), 1.into());
        dict.insert("a".into(), 2.into());
        dict.insert("z".into(), 3.into());
        let keys: Vec<&str> = dict.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(dict.get("z"), Some(&VimValue::Number(3)));
        assert_eq!(dict.remove("z"), Some(VimValue::Number(3)));
        assert_eq!(dict.len(), 1);
    }

    proptest! {
        #[test]
        fn decimal_strings_round_trip(n in any::<i64>()) {
            prop_assert_eq!(string_to_number(&n.to_string()), n);
        }

        #[test]
        fn hex_strings_round_trip(n in 0..i64::MAX) {
            prop_assert_eq!(string_to_number(&format!("0x{n:x}")), n);
        }
    }
}
