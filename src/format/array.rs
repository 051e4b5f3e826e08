//! Array rendering.

use crate::value::{ElementType, PropertyArray, PropertyValue};

const ELEMENT_SEPARATOR: &str = ",";

/// String arrays are joined with `,` using each element's raw text. Any other
/// element type is summarized as `<array of {type}>`.
pub fn format_array(array: &PropertyArray) -> String {
    match array.element() {
        ElementType::String => array
            .items()
            .iter()
            .map(|item| match item {
                PropertyValue::String(s) => s.as_str(),
                _ => "",
            })
            .collect::<Vec<_>>()
            .join(ELEMENT_SEPARATOR),
        other => format!("<array of {}>", other.name()),
    }
}
