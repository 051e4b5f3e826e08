//! Property values returned by a management query.
//!
//! A queried object is a [`PropertySet`]: an ordered list of name/value pairs
//! whose values are loosely typed. The source serializes 64-bit integers and
//! timestamps as strings, so the type recorded here is the transport type, not
//! necessarily the intended one. See [`crate::format`] for the display rules.

use crate::error::ValueError;
use serde::{Deserialize, Serialize};

/// Element type of a homogeneous array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    String,
    Sint8,
    Sint16,
    Sint32,
    Sint64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Boolean,
    Real64,
    /// Opaque element type, identified by its source type name.
    Other(String),
}

impl ElementType {
    pub fn name(&self) -> &str {
        match self {
            ElementType::String => "string",
            ElementType::Sint8 => "sint8",
            ElementType::Sint16 => "sint16",
            ElementType::Sint32 => "sint32",
            ElementType::Sint64 => "sint64",
            ElementType::Uint8 => "uint8",
            ElementType::Uint16 => "uint16",
            ElementType::Uint32 => "uint32",
            ElementType::Uint64 => "uint64",
            ElementType::Boolean => "boolean",
            ElementType::Real64 => "real64",
            ElementType::Other(name) => name,
        }
    }
}

/// A value with no reliable text form. Only a type name and an optional
/// best-effort conversion are exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueValue {
    pub type_name: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl OpaqueValue {
    pub fn new(type_name: impl Into<String>, text: Option<String>) -> Self {
        Self {
            type_name: type_name.into(),
            text,
        }
    }
}

/// One property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Empty,
    Null,
    String(String),
    #[serde(rename = "sint8")]
    I8(i8),
    #[serde(rename = "sint16")]
    I16(i16),
    #[serde(rename = "sint32")]
    I32(i32),
    #[serde(rename = "sint64")]
    I64(i64),
    #[serde(rename = "uint8")]
    U8(u8),
    #[serde(rename = "uint16")]
    U16(u16),
    #[serde(rename = "uint32")]
    U32(u32),
    #[serde(rename = "uint64")]
    U64(u64),
    Boolean(bool),
    #[serde(rename = "real64")]
    Real(f64),
    Array(PropertyArray),
    Other(OpaqueValue),
}

impl PropertyValue {
    /// Build an array value, checking that every element has `element` type.
    pub fn array(element: ElementType, items: Vec<PropertyValue>) -> Result<Self, ValueError> {
        PropertyArray::new(element, items).map(PropertyValue::Array)
    }

    /// Element type this value would have inside an array. `None` for
    /// Empty, Null and nested arrays.
    pub fn element_type(&self) -> Option<ElementType> {
        let element = match self {
            PropertyValue::Empty | PropertyValue::Null | PropertyValue::Array(_) => return None,
            PropertyValue::String(_) => ElementType::String,
            PropertyValue::I8(_) => ElementType::Sint8,
            PropertyValue::I16(_) => ElementType::Sint16,
            PropertyValue::I32(_) => ElementType::Sint32,
            PropertyValue::I64(_) => ElementType::Sint64,
            PropertyValue::U8(_) => ElementType::Uint8,
            PropertyValue::U16(_) => ElementType::Uint16,
            PropertyValue::U32(_) => ElementType::Uint32,
            PropertyValue::U64(_) => ElementType::Uint64,
            PropertyValue::Boolean(_) => ElementType::Boolean,
            PropertyValue::Real(_) => ElementType::Real64,
            PropertyValue::Other(opaque) => ElementType::Other(opaque.type_name.clone()),
        };
        Some(element)
    }

    /// Type annotation shown by `--show-types`.
    pub fn type_name(&self) -> String {
        match self {
            PropertyValue::Empty => "empty".to_string(),
            PropertyValue::Null => "null".to_string(),
            PropertyValue::Array(array) => format!("{}[]", array.element().name()),
            other => other
                .element_type()
                .map(|element| element.name().to_string())
                .unwrap_or_default(),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

/// A homogeneous array. Construction rejects mixed element types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawArray")]
pub struct PropertyArray {
    element: ElementType,
    items: Vec<PropertyValue>,
}

#[derive(Deserialize)]
struct RawArray {
    element: ElementType,
    #[serde(default)]
    items: Vec<PropertyValue>,
}

impl TryFrom<RawArray> for PropertyArray {
    type Error = ValueError;

    fn try_from(raw: RawArray) -> Result<Self, Self::Error> {
        PropertyArray::new(raw.element, raw.items)
    }
}

impl PropertyArray {
    pub fn new(element: ElementType, items: Vec<PropertyValue>) -> Result<Self, ValueError> {
        for (index, item) in items.iter().enumerate() {
            if item.element_type().as_ref() != Some(&element) {
                return Err(ValueError::HeterogeneousArray {
                    expected: element.name().to_string(),
                    found: item.type_name(),
                    index,
                });
            }
        }
        Ok(Self { element, items })
    }

    pub fn element(&self) -> &ElementType {
        &self.element
    }

    pub fn items(&self) -> &[PropertyValue] {
        &self.items
    }
}

/// A single named property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

/// One object returned by a query. Names are kept in source order and may repeat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySet {
    properties: Vec<Property>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.push(Property {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    /// First value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Width of the longest property name, in characters.
    pub fn longest_name(&self) -> usize {
        self.names().map(|n| n.chars().count()).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Into<String>> FromIterator<(N, PropertyValue)> for PropertySet {
    fn from_iter<T: IntoIterator<Item = (N, PropertyValue)>>(iter: T) -> Self {
        let mut set = PropertySet::new();
        for (name, value) in iter {
            set.push(name, value);
        }
        set
    }
}
