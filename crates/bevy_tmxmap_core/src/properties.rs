//! Custom properties.
//!
//! Maps, layers, tilesets and tiles carry user-authored `<property>` nodes.
//! Their values arrive as strings; [`CustomProperties::coerce`] turns them into
//! typed [`PropertyValue`]s according to the declared `type` attribute.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bevy::log::debug;
use serde::{Deserialize, Serialize};

use crate::error::TmxError;

/// The `type` attribute of a property node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Bool,
    Color,
    Float,
    File,
    Int,
    String,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Bool => "bool",
            PropertyType::Color => "color",
            PropertyType::Float => "float",
            PropertyType::File => "file",
            PropertyType::Int => "int",
            PropertyType::String => "string",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bool" => Ok(PropertyType::Bool),
            "color" => Ok(PropertyType::Color),
            "float" => Ok(PropertyType::Float),
            "file" => Ok(PropertyType::File),
            "int" => Ok(PropertyType::Int),
            "string" => Ok(PropertyType::String),
            _ => Err(()),
        }
    }
}

/// A coerced property value.
///
/// Float, color and file properties are kept as [`PropertyValue::String`]
/// until they get dedicated variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    String(String),
}

impl PropertyValue {
    fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Int(_) => "int",
            PropertyValue::String(_) => "string",
        }
    }
}

/// A `<property>` node as it appears in the document, before coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProperty {
    pub name: String,
    /// Empty when the node has no `type` attribute.
    pub property_type: String,
    pub value: String,
}

impl RawProperty {
    pub fn new(
        name: impl Into<String>,
        property_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            property_type: property_type.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomProperty {
    pub name: String,
    pub property_type: PropertyType,
    pub value: PropertyValue,
}

impl CustomProperty {
    pub fn as_bool(&self) -> Option<bool> {
        bool::from_property(&self.value)
    }

    pub fn as_int(&self) -> Option<i32> {
        i32::from_property(&self.value)
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Strict accessor: fails when the property is not a bool.
    pub fn value_bool(&self) -> Result<bool, TmxError> {
        self.as_bool().ok_or_else(|| TmxError::PropertyTypeMismatch {
            name: self.name.clone(),
            expected: "bool",
            actual: self.value.kind(),
        })
    }
}

/// Types that can be read out of a [`PropertyValue`].
///
/// # Example
/// ```
/// use bevy_tmxmap_core::{FromPropertyValue, PropertyValue};
///
/// assert_eq!(u32::from_property(&PropertyValue::Int(3)), Some(3));
/// assert_eq!(u32::from_property(&PropertyValue::Int(-3)), None);
/// ```
pub trait FromPropertyValue: Sized {
    /// Returns `None` when the value holds a different kind.
    fn from_property(value: &PropertyValue) -> Option<Self>;
}

impl FromPropertyValue for bool {
    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromPropertyValue for i32 {
    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromPropertyValue for u32 {
    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Int(i) => u32::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl FromPropertyValue for String {
    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Properties keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomProperties(HashMap<String, CustomProperty>);

impl CustomProperties {
    /// Coerce raw property nodes into typed properties.
    ///
    /// `bool` is true only for the literal `"true"`, `int` must parse as an
    /// `i32`, and every other declared type (including none at all) is kept as
    /// a string. A repeated name overwrites the earlier entry.
    pub fn coerce<'a>(
        raw: impl IntoIterator<Item = &'a RawProperty>,
    ) -> Result<Self, TmxError> {
        let mut properties = HashMap::new();

        for prop in raw {
            let (property_type, value) = match prop.property_type.as_str() {
                "bool" => (PropertyType::Bool, PropertyValue::Bool(prop.value == "true")),
                "int" => {
                    let parsed = prop.value.parse::<i32>().map_err(|source| {
                        TmxError::InvalidIntegerProperty {
                            name: prop.name.clone(),
                            value: prop.value.clone(),
                            source,
                        }
                    })?;
                    (PropertyType::Int, PropertyValue::Int(parsed))
                }
                // Tiled omits `type` for string properties
                _ => (PropertyType::String, PropertyValue::String(prop.value.clone())),
            };

            let replaced = properties.insert(
                prop.name.clone(),
                CustomProperty {
                    name: prop.name.clone(),
                    property_type,
                    value,
                },
            );
            if replaced.is_some() {
                debug!("Property {:?} declared twice, keeping the last value", prop.name);
            }
        }

        Ok(Self(properties))
    }

    pub fn get(&self, name: &str) -> Option<&CustomProperty> {
        self.0.get(name)
    }

    /// Read `name` as `T`, or `fallback` if it is missing or holds another kind.
    pub fn get_or<T: FromPropertyValue>(&self, name: &str, fallback: T) -> T {
        self.0
            .get(name)
            .and_then(|prop| T::from_property(&prop.value))
            .unwrap_or(fallback)
    }

    pub fn get_bool(&self, name: &str, fallback: bool) -> bool {
        self.get_or(name, fallback)
    }

    pub fn get_int(&self, name: &str, fallback: i32) -> i32 {
        self.get_or(name, fallback)
    }

    pub fn get_string<'a>(&'a self, name: &str, fallback: &'a str) -> &'a str {
        self.0
            .get(name)
            .and_then(CustomProperty::as_str)
            .unwrap_or(fallback)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CustomProperty)> {
        self.0.iter().map(|(name, prop)| (name.as_str(), prop))
    }
}
