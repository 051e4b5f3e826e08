//! Detection of integers serialized as strings.
//!
//! 64-bit integers arrive as text to avoid precision loss in transport. A
//! string that is nothing but an optional `-` and digits is re-rendered as a
//! grouped number.

use crate::format::grouping::format_integer;

/// Returns the grouped rendering of `raw` when it is a plain decimal integer.
pub fn try_parse(raw: &str, separator: &str) -> Option<String> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if negative {
        raw.parse::<i64>()
            .ok()
            .map(|v| format_integer(v, true, separator))
    } else {
        digits
            .parse::<u64>()
            .ok()
            .map(|v| format_integer(v, true, separator))
    }
}
