//! Value Formatting
//!
//! Turns one [`PropertyValue`] into display text. When formatting is enabled,
//! strings go through the datetime and integer heuristics (first match wins),
//! integers are digit-grouped and Empty/Null get visible markers. Formatting
//! never fails: every path ends in some text.

pub mod array;
pub mod datetime;
pub mod grouping;
pub mod integer;

use crate::value::PropertyValue;
use grouping::{format_integer, DEFAULT_GROUP_SEPARATOR};

pub const EMPTY_MARKER: &str = "<empty>";
pub const NULL_MARKER: &str = "<null>";
pub const CONVERSION_FAILED: &str = "<conversion failed>";

/// Type-directed value formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFormatter {
    separator: String,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP_SEPARATOR)
    }
}

impl ValueFormatter {
    /// Formatter using `separator` between digit groups.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn format(&self, value: &PropertyValue, apply_formatting: bool) -> String {
        let grouped = apply_formatting;
        let sep = self.separator.as_str();
        match value {
            PropertyValue::Empty => marker(EMPTY_MARKER, apply_formatting),
            PropertyValue::Null => marker(NULL_MARKER, apply_formatting),
            PropertyValue::String(raw) => {
                if apply_formatting {
                    self.reinterpret(raw)
                } else {
                    raw.clone()
                }
            }
            PropertyValue::I8(v) => format_integer(v, grouped, sep),
            PropertyValue::I16(v) => format_integer(v, grouped, sep),
            PropertyValue::I32(v) => format_integer(v, grouped, sep),
            PropertyValue::I64(v) => format_integer(v, grouped, sep),
            PropertyValue::U8(v) => format_integer(v, grouped, sep),
            PropertyValue::U16(v) => format_integer(v, grouped, sep),
            PropertyValue::U32(v) => format_integer(v, grouped, sep),
            PropertyValue::U64(v) => format_integer(v, grouped, sep),
            PropertyValue::Boolean(true) => "True".to_string(),
            PropertyValue::Boolean(false) => "False".to_string(),
            PropertyValue::Real(v) => v.to_string(),
            PropertyValue::Array(array) => array::format_array(array),
            PropertyValue::Other(opaque) => opaque
                .text
                .clone()
                .unwrap_or_else(|| CONVERSION_FAILED.to_string()),
        }
    }

    fn reinterpret(&self, raw: &str) -> String {
        datetime::try_format(raw)
            .or_else(|| integer::try_parse(raw, &self.separator))
            .unwrap_or_else(|| raw.to_string())
    }
}

fn marker(text: &str, apply_formatting: bool) -> String {
    if apply_formatting {
        text.to_string()
    } else {
        String::new()
    }
}
