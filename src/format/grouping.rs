//! Digit grouping for integer display.

use std::fmt::Display;

/// Separator used when the locale does not supply one.
pub const DEFAULT_GROUP_SEPARATOR: &str = ",";

const GROUP_SIZE: usize = 3;

/// Insert `separator` every three digits counting from the right.
///
/// `digits` must be the unsigned digit text; the sign is handled by
/// [`format_integer`].
pub fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + (len / GROUP_SIZE) * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (len - i) % GROUP_SIZE == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Render an integer as decimal text, optionally grouped.
pub fn format_integer<T: Display>(value: T, grouped: bool, separator: &str) -> String {
    let text = value.to_string();
    if !grouped {
        return text;
    }
    match text.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, separator)),
        None => group_digits(&text, separator),
    }
}
