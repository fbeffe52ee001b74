use serde::Deserialize;

/// The type portion shared by type declarations, parameters and array items.
///
/// Exactly one of `type_name` and `reference` is normally set. `enum_values`
/// is present for string enums; `items` for arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DataType {
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub items: Option<Box<DataType>>,
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<String>>,
}

impl DataType {
    /// True when the declared type is the given primitive name.
    pub fn is(&self, name: &str) -> bool {
        self.type_name.as_deref() == Some(name)
    }

    /// True for `object` types.
    pub fn is_object(&self) -> bool {
        self.is("object")
    }

    /// True for string enums.
    pub fn is_string_enum(&self) -> bool {
        self.is("string") && self.enum_values.is_some()
    }
}

/// A named, typed member: a command/event parameter, a return value, or a
/// property of an object type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(flatten)]
    pub data_type: DataType,
}
